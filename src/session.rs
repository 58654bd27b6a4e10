//! Collaborator surface for the `Connection` actor.

use crate::error::Result;

/// Receiver for messages addressed to the `Connection` actor.
///
/// The dispatcher forwards the parsed selector and arguments verbatim and
/// passes the reply through unchanged; a failing implementor surfaces its
/// wire code exactly like any other handler.
pub trait Session {
    /// Handle one `(selector, arguments)` pair addressed to this connection.
    fn receive(&mut self, selector: &str, arguments: &[String]) -> Result<String>;
}
