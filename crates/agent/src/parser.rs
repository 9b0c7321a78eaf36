//! Reply parsing against the tool-invocation wire grammar.
//!
//! A reply requests a tool iff, after trimming, it has the exact form
//! `Identifier(Argument)`: a maximal run of word characters at the
//! start, an opening paren, and everything up to the *last* closing
//! paren as the argument (newlines included). No nested calls, no
//! multiple calls per reply — only the first match is honored.

use regex::Regex;
use std::sync::LazyLock;

static TOOL_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(\w+)\((.*)\)$").expect("tool grammar regex"));

/// A parsed tool request. Transient — never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    pub arg: String,
}

impl ToolInvocation {
    /// The argument as the registry expects it: `None` for an empty
    /// argument list, as in `Clock()`.
    pub fn arg(&self) -> Option<&str> {
        if self.arg.is_empty() {
            None
        } else {
            Some(&self.arg)
        }
    }
}

/// Match a model reply against the tool grammar.
pub fn parse_tool_invocation(reply: &str) -> Option<ToolInvocation> {
    let caps = TOOL_CALL.captures(reply.trim())?;
    Some(ToolInvocation {
        name: caps[1].to_string(),
        arg: caps[2].to_string(),
    })
}
