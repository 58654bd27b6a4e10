//! varspace – command-dispatch core of a small in-memory object server
//!
//! Clients submit textual messages of the form `actor messageName: arg1, …`.
//! The dispatcher classifies the leading actor token — a type name, the
//! `Context` keyword, a registered variable, or the `Connection` keyword —
//! constructs or looks up typed value instances, routes the message to the
//! right operation table, and returns a textual reply. Failures never escape:
//! every error surfaces as a stable wire code in the reply, and each
//! dispatched line leaves one timestamped `input -> reply` log record.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Registry and dispatcher.
pub mod context;
/// Dispatch error taxonomy with stable wire codes.
pub mod error;
/// Actor grammar and line parser.
pub mod message;
/// Typed value instances.
pub mod object;
/// Line-protocol service and per-connection sessions.
pub mod server;
/// Collaborator trait for the `Connection` actor.
pub mod session;

// Re-export key types for convenience
pub use context::{Context, ContextConfig, SetupError};
pub use error::Exception;
pub use message::{parse_message, Message};
pub use server::{ClientSession, LineService};
pub use session::Session;

/// Current version of the varspace crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
