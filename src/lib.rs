// src/lib.rs

//! edgesock - a non-blocking, callback-driven socket core for reactor-driven event loops.
//!
//! A [`Socket`] wraps a single native descriptor and turns it into a state machine that
//! accepts asynchronous requests (connect, accept, read, read-until-delimiter, write).
//! The crate never polls on its own: an external reactor asks the socket what it wants
//! ([`Socket::wants_read`], [`Socket::wants_write`], [`Socket::interest`]) and calls
//! [`Socket::do_read`] / [`Socket::do_write`] once the OS reports readiness. Queued
//! callbacks are then resolved in submission order.

/// Defines custom error types used throughout the library.
pub mod error;
/// Socket state machine, framing queues, options and monitor events.
pub mod socket;
/// Endpoint representation handed to `bind` / `connect`.
pub mod transport;

pub use error::SocketError;
pub use socket::core::{AcceptCallback, ConnectCallback, ReadCallback, Socket, WriteCallback};
pub use socket::events::{MonitorReceiver, MonitorSender, SocketEvent};
pub use socket::options::{CloseDisposal, ReadBoundary, SocketOptions};
pub use socket::state::{Interest, SocketState};
pub use transport::endpoint::Endpoint;

// Re-exported so callers can name domains/types for `Socket::open` without a direct dependency.
pub use socket2::{Domain, Protocol, Type};

// --- Top-Level Library Information Functions ---

/// Major version number of the edgesock library.
const VERSION_MAJOR: i32 = 0;
/// Minor version number of the edgesock library.
const VERSION_MINOR: i32 = 1;
/// Patch version number of the edgesock library.
const VERSION_PATCH: i32 = 0;

/// Returns the library version as a tuple (major, minor, patch).
///
/// # Examples
///
/// ```
/// let (major, minor, patch) = edgesock::version();
/// println!("edgesock version: {}.{}.{}", major, minor, patch);
/// ```
pub fn version() -> (i32, i32, i32) {
  (VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}
