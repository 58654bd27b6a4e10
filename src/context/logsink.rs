//! Append-only execution log.
//!
//! Each dispatched message leaves exactly one record:
//! `[YYYY-MM-DD HH:MM:SS] <trimmed-input> -> <reply>`. Records go to the
//! configured logfile when one is open, otherwise to stdout unless quiet mode
//! suppresses the fallback. Sink failures never disturb the reply.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

/// Destination for `input -> reply` records.
#[derive(Debug)]
pub struct LogSink {
    logfile: Option<File>,
    quiet: bool,
}

impl LogSink {
    /// Open the sink, creating or appending to `path` when one is given.
    pub fn open(path: Option<&Path>, quiet: bool) -> io::Result<LogSink> {
        let logfile = match path {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };
        Ok(LogSink { logfile, quiet })
    }

    /// Append one record for a dispatched message.
    pub fn record(&mut self, input: &str, reply: &str) {
        let timestamp = Local::now().format("[%Y-%m-%d %H:%M:%S]");
        let line = format!("{} {} -> {}", timestamp, input.trim(), reply);
        match &mut self.logfile {
            Some(file) => {
                let _ = writeln!(file, "{line}");
            }
            None if !self.quiet => println!("{line}"),
            None => {}
        }
    }
}
