//! Session transcript log.
//!
//! Plain text: a header line, repeated `You:`/`Agent:` blocks, a
//! footer line. The file is opened, appended, and closed once per
//! turn; a session with zero turns leaves no file behind.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const HEADER: &str = "Agent Transcript\n================\n\n";
const FOOTER: &str = "================\n\n";

/// An append-only transcript for one session.
pub struct Transcript {
    path: PathBuf,
    turns: usize,
}

impl Transcript {
    /// Create a timestamped transcript file in `dir`, writing the
    /// header immediately. Creates `dir` if needed.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("transcript_{stamp}.txt"));
        std::fs::write(&path, HEADER)?;
        Ok(Self { path, turns: 0 })
    }

    /// Append one completed turn. Opens and closes the file; no handle
    /// is held between turns.
    pub fn append_turn(&mut self, user: &str, agent: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        write!(file, "You: {user}\n\nAgent: {agent}\n\n")?;
        self.turns += 1;
        Ok(())
    }

    /// Close out the session: write the footer, or delete the file if
    /// no turns were logged. Returns the surviving path, if any.
    pub fn finalize(self) -> io::Result<Option<PathBuf>> {
        if self.turns == 0 {
            debug!(path = %self.path.display(), "Discarding empty transcript");
            std::fs::remove_file(&self.path)?;
            return Ok(None);
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(FOOTER.as_bytes())?;
        Ok(Some(self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn turns(&self) -> usize {
        self.turns
    }
}
