//! Agent identity — the system instructions sent on every turn.

use hearth_core::tool::ToolRegistry;

/// Build the default identity: the base system prompt plus usage
/// instructions for every registered tool.
pub fn default_identity(tools: &ToolRegistry) -> String {
    let mut identity = String::from(
        "You are a tool-calling agent that may use tools by responding \
         according to their instructions.\n",
    );

    if !tools.is_empty() {
        identity.push_str(
            "You may use the following tools to assist with user queries.\n\
             Avoid using tools if the user query can be answered without them.\n\
             Here are the tools you can use:\n",
        );
        identity.push_str(&tools.render_descriptions());
        identity.push_str(
            "\nWhen you decide to use a tool, respond with the format \
             'ToolName(arg)' where ToolName is the name of the tool and \
             arg is the argument to pass to the tool. \
             If the tool does not require an argument, use 'ToolName()'.\n\
             Only use one tool per response.\n",
        );
    }

    identity
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hearth_core::tool::Tool;

    struct NoopTool;

    #[async_trait]
    impl Tool for NoopTool {
        fn name(&self) -> &str {
            "Noop"
        }
        fn description(&self) -> &str {
            "Does nothing"
        }
        async fn invoke(&self, _arg: Option<&str>) -> String {
            String::new()
        }
    }

    #[test]
    fn identity_lists_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(NoopTool));
        let identity = default_identity(&registry);
        assert!(identity.contains("- Noop: Does nothing"));
        assert!(identity.contains("ToolName(arg)"));
        assert!(identity.contains("Only use one tool per response"));
    }

    #[test]
    fn empty_registry_skips_tool_instructions() {
        let registry = ToolRegistry::new();
        let identity = default_identity(&registry);
        assert!(identity.contains("tool-calling agent"));
        assert!(!identity.contains("ToolName(arg)"));
    }
}
