//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool is a named callable the model's text output can request by
//! replying in the `Name(arg)` wire format. Each tool accepts one
//! optional string argument and returns a string.
//!
//! Failure contract: tools catch internally and return a descriptive
//! string. Nothing is raised across the registry boundary, there is no
//! sandboxing and no timeout — a hanging tool hangs the session.

use async_trait::async_trait;
use std::collections::HashMap;

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "echo", "clock").
    fn name(&self) -> &str;

    /// A description of what this tool does (rendered into the agent
    /// identity so the model knows what it can call).
    fn description(&self) -> &str;

    /// Execute the tool. `None` means the model supplied an empty
    /// argument list, as in `Clock()`.
    async fn invoke(&self, arg: Option<&str>) -> String;
}

/// A registry of available tools.
///
/// Built once at startup, then shared read-only across the session.
/// The dispatch loop uses it to resolve a parsed invocation; a miss is
/// not an error — the loop falls open to treating the model's reply as
/// a direct answer.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name. Lookup is case-sensitive, matching the wire
    /// grammar.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Render a `- Name: description` listing for the identity prompt.
    pub fn render_descriptions(&self) -> String {
        let mut entries: Vec<_> = self.tools.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
            .iter()
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "Echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        async fn invoke(&self, arg: Option<&str>) -> String {
            match arg {
                Some(text) => format!("Echo: {text}"),
                None => "Echo:".into(),
            }
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("Echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_none());
    }

    #[tokio::test]
    async fn invoke_with_and_without_arg() {
        let tool = EchoTool;
        assert_eq!(tool.invoke(Some("test")).await, "Echo: test");
        assert_eq!(tool.invoke(None).await, "Echo:");
    }

    #[test]
    fn render_descriptions_lists_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let listing = registry.render_descriptions();
        assert!(listing.contains("- Echo: Echoes back the input"));
    }
}
