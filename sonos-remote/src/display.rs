//! Two-line status output

use std::io::{self, Write};

use tracing::{info, warn};

/// Second line while discovery runs
pub const CONNECTING: &str = "connecting..";
/// Second line once the zone is selected
pub const CONNECTED: &str = "connected!";
/// First line when the zone was not found
pub const CONNECTION_ERROR: &str = "Connection error";
/// Second line when the zone was not found
pub const RETRY_HINT: &str = ">| to repeat";
pub const PLAYING: &str = "playing";
pub const PAUSED: &str = "paused";
pub const COMMAND_FAILED: &str = "command failed";

/// Receiver of status updates; fire-and-forget
pub trait StatusDisplay {
    fn publish_status(&mut self, line1: &str, line2: &str);
}

/// Writes each status as two lines to a writer (stdout by default)
pub struct ConsoleDisplay<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleDisplay {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusDisplay for ConsoleDisplay<W> {
    fn publish_status(&mut self, line1: &str, line2: &str) {
        let written = writeln!(self.out, "{}\n{}", line1, line2).and_then(|_| self.out.flush());
        if let Err(e) = written {
            warn!("status output failed: {}", e);
        }
    }
}

/// Emits each status as a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn publish_status(&mut self, line1: &str, line2: &str) {
        info!(line1, line2, "status");
    }
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for Box<T> {
    fn publish_status(&mut self, line1: &str, line2: &str) {
        (**self).publish_status(line1, line2);
    }
}
