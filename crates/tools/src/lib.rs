//! Built-in tool implementations for hearth.
//!
//! Tools are what the model's `Name(arg)` replies can reach: echoing
//! text, reading the clock, doing arithmetic. Each catches its own
//! failures and answers with a descriptive string.

pub mod calculator;
pub mod clock;
pub mod echo;

use hearth_core::tool::ToolRegistry;

/// Create the default tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(echo::EchoTool));
    registry.register(Box::new(clock::ClockTool));
    registry.register(Box::new(calculator::CalculatorTool));
    registry
}
