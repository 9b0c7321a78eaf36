//! Echo tool — repeats the argument back.
//!
//! Mostly useful for verifying the tool-dispatch path end to end.

use async_trait::async_trait;
use hearth_core::tool::Tool;

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "Echo"
    }

    fn description(&self) -> &str {
        "Echoes the argument back. Usage: Echo(some text)"
    }

    async fn invoke(&self, arg: Option<&str>) -> String {
        match arg {
            Some(text) => format!("Echo: {text}"),
            None => "Echo:".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_with_arg() {
        assert_eq!(EchoTool.invoke(Some("test")).await, "Echo: test");
    }

    #[tokio::test]
    async fn echo_without_arg() {
        assert_eq!(EchoTool.invoke(None).await, "Echo:");
    }
}
