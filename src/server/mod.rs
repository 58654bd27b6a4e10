//! Line-protocol service.
//!
//! One textual message per line in, one reply per line out. The service wraps
//! a [`Context`] and drives it over any `BufRead`/`Write` pair, which keeps
//! the transport (stdio, TCP) out of the core; the daemon binary supplies the
//! streams. Each connection gets its own [`ClientSession`] addressed via the
//! `Connection` actor.

use std::io::{self, BufRead, Write};

use uuid::Uuid;

use crate::context::Context;
use crate::error::Result;
use crate::object::{unknown_selector, NULL_REPLY};
use crate::session::Session;

/// Per-connection state addressed via the `Connection` actor.
pub struct ClientSession {
    id: Uuid,
    closed: bool,
}

impl ClientSession {
    /// Fresh session with a random identifier.
    pub fn new() -> ClientSession {
        ClientSession {
            id: Uuid::new_v4(),
            closed: false,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True once the client has asked the connection to close.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for ClientSession {
    fn receive(&mut self, selector: &str, _arguments: &[String]) -> Result<String> {
        match selector {
            "getId" => Ok(format!("\"{}\"", self.id)),
            "close" => {
                self.closed = true;
                Ok(NULL_REPLY.to_string())
            }
            _ => Err(unknown_selector(SESSION_OPS, selector)),
        }
    }
}

const SESSION_OPS: &[(&str, usize)] = &[("getId", 0), ("close", 0)];

/// Service wrapper that drives a [`Context`] over a line transport.
pub struct LineService {
    context: Context,
}

impl LineService {
    /// Wrap a dispatcher.
    pub fn new(context: Context) -> LineService {
        LineService { context }
    }

    /// Process one connection: read lines, dispatch, write replies.
    ///
    /// Blank lines are skipped. The loop ends at end-of-stream or after the
    /// reply to a `Connection close` has been written.
    pub fn handle<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<()> {
        let mut session = ClientSession::new();
        tracing::info!(session = %session.id(), "session opened");
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = self.context.execute(&line, &mut session);
            writer.write_all(reply.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            if session.is_closed() {
                break;
            }
        }
        tracing::info!(session = %session.id(), "session closed");
        Ok(())
    }
}
