//! The hearth dispatch loop.
//!
//! One turn runs: read user input → assemble prompt from identity,
//! summary, and the recent-interaction window → one model call → parse
//! the reply as either a tool invocation or a direct answer → update
//! memory → append to the session transcript.

pub mod dispatch;
pub mod identity;
pub mod parser;
pub mod prompt;
pub mod transcript;

pub use dispatch::Agent;
pub use identity::default_identity;
pub use parser::{ToolInvocation, parse_tool_invocation};
pub use prompt::assemble_prompt;
pub use transcript::Transcript;
