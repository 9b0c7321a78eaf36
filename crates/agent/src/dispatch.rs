//! The dispatch loop: one user turn from input to logged answer.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use hearth_core::error::Result;
use hearth_core::message::Message;
use hearth_core::model::ChatModel;
use hearth_core::tool::ToolRegistry;
use hearth_memory::MemoryManager;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::parser::parse_tool_invocation;
use crate::prompt::assemble_prompt;
use crate::transcript::Transcript;

/// The agent owns the conversation state for one session: the memory
/// manager (window + summary) exclusively, the tool registry and model
/// client shared read-only.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    tools: Arc<ToolRegistry>,
    identity: String,
    memory: MemoryManager,
    temperature: f32,
    transcript_dir: PathBuf,
}

impl Agent {
    pub fn new(
        model: Arc<dyn ChatModel>,
        tools: Arc<ToolRegistry>,
        identity: impl Into<String>,
        memory: MemoryManager,
    ) -> Self {
        Self {
            model,
            tools,
            identity: identity.into(),
            memory,
            temperature: 0.7,
            transcript_dir: PathBuf::from("transcripts"),
        }
    }

    /// Set the sampling temperature for the primary call.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set where session transcripts are written.
    pub fn with_transcript_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.transcript_dir = dir.into();
        self
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    /// Process one user input through to its answer.
    ///
    /// At most one primary model call and at most one tool call. An
    /// upstream failure becomes the turn's answer verbatim; no retry,
    /// no fallback. The session continues.
    pub async fn process_turn(&mut self, input: &str) -> String {
        let messages = assemble_prompt(
            &self.identity,
            self.memory.context_summary(),
            self.memory.window(),
            input,
        );

        let answer = match self.model.complete(&messages, self.temperature).await {
            Ok(reply) => self.resolve_reply(reply).await,
            Err(e) => {
                warn!(error = %e, "Primary model call failed");
                e.to_string()
            }
        };

        let answer = answer.trim().to_string();

        self.memory
            .observe(Message::user(input), Message::assistant(&answer))
            .await;

        answer
    }

    /// Interpret the model's reply: a registered tool invocation runs
    /// once; anything else — including a call to an unknown tool — is
    /// the answer verbatim.
    async fn resolve_reply(&self, reply: String) -> String {
        let Some(call) = parse_tool_invocation(&reply) else {
            return reply;
        };

        match self.tools.get(&call.name) {
            Some(tool) => {
                debug!(tool = %call.name, "Dispatching tool invocation");
                tool.invoke(call.arg()).await
            }
            None => {
                debug!(tool = %call.name, "Unknown tool, answering with raw reply");
                reply
            }
        }
    }

    /// Run an interactive session over `reader` until EOF or an exit
    /// sentinel (`exit`/`quit`, case-insensitive, trimmed).
    ///
    /// Returns the transcript path, or `None` when no turns occurred
    /// and the file was discarded.
    pub async fn run_session<R>(&mut self, reader: R) -> Result<Option<PathBuf>>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut transcript = Transcript::create_in(&self.transcript_dir)?;
        let mut lines = reader.lines();

        println!("Type 'exit' or 'quit' to end the chat.");

        loop {
            print!("You: ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break; // EOF (Ctrl+D)
            };
            let input = line.trim();

            if input.is_empty() {
                continue;
            }

            if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                println!("Goodbye!");
                break;
            }

            let answer = self.process_turn(input).await;
            println!("Agent: {answer}");

            transcript.append_turn(input, &answer)?;
        }

        Ok(transcript.finalize()?)
    }
}
