//! Clock tool — reports the current local time and date.

use async_trait::async_trait;
use chrono::Local;
use hearth_core::tool::Tool;

pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "Clock"
    }

    fn description(&self) -> &str {
        "Reports the current time and date. Takes no argument. Usage: Clock()"
    }

    async fn invoke(&self, _arg: Option<&str>) -> String {
        let now = Local::now();
        format!(
            "The current time is {} on {}.",
            now.format("%H:%M"),
            now.format("%A, %B %d, %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clock_output_format() {
        let result = ClockTool.invoke(None).await;
        assert!(result.contains("The current time is"));
        assert!(result.contains("on"));
    }

    #[tokio::test]
    async fn clock_ignores_argument() {
        let with_arg = ClockTool.invoke(Some("ignored")).await;
        assert!(with_arg.contains("The current time is"));
    }
}
