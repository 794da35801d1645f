// src/error.rs

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive] // Allows adding more variants later without breaking change
pub enum SocketError {
  // --- I/O Errors ---
  /// An OS-level failure. The native error code is available via [`SocketError::raw_os_error`].
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  // --- Connection Errors ---
  #[error("Connection closed by peer")]
  ConnectionClosed,
  /// The socket was closed while the request was still queued.
  #[error("Operation cancelled: socket closed")]
  Cancelled,

  // --- Endpoint Errors ---
  #[error("Invalid endpoint format: {0}")]
  InvalidEndpoint(String),
  #[error("Transport scheme not supported or enabled: {0}")]
  UnsupportedTransport(String),

  // --- Option Errors ---
  #[error("Invalid socket option ID: {0}")]
  InvalidOption(i32),
  #[error("Invalid value provided for option ID {0}")]
  InvalidOptionValue(i32),
}

impl SocketError {
  /// Returns the native OS error code, if this error carries one.
  pub fn raw_os_error(&self) -> Option<i32> {
    match self {
      SocketError::Io(e) => e.raw_os_error(),
      _ => None,
    }
  }

  /// Builds an equivalent error value. Used when one terminal failure has to be
  /// delivered to several queued callbacks.
  pub(crate) fn replicate(&self) -> Self {
    match self {
      SocketError::Io(e) => SocketError::Io(match e.raw_os_error() {
        Some(code) => io::Error::from_raw_os_error(code),
        None => io::Error::new(e.kind(), e.to_string()),
      }),
      SocketError::ConnectionClosed => SocketError::ConnectionClosed,
      SocketError::Cancelled => SocketError::Cancelled,
      SocketError::InvalidEndpoint(s) => SocketError::InvalidEndpoint(s.clone()),
      SocketError::UnsupportedTransport(s) => SocketError::UnsupportedTransport(s.clone()),
      SocketError::InvalidOption(id) => SocketError::InvalidOption(*id),
      SocketError::InvalidOptionValue(id) => SocketError::InvalidOptionValue(*id),
    }
  }
}

// --- io::Error classification helpers ---

/// "No more progress right now": retry on the next readiness signal.
pub(crate) fn is_transient(e: &io::Error) -> bool {
  matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted)
}

/// Transient conditions for `accept(2)`. An aborted handshake just means the
/// connection vanished before we picked it up.
pub(crate) fn is_transient_accept(e: &io::Error) -> bool {
  is_transient(e) || e.kind() == io::ErrorKind::ConnectionAborted
}

/// A non-blocking `connect(2)` that has been started but not finished.
/// `EAGAIN` is not one of them: for Unix-domain sockets it means the listener's
/// backlog is full and nothing is pending.
pub(crate) fn is_connect_in_progress(e: &io::Error) -> bool {
  e.raw_os_error() == Some(libc::EINPROGRESS) || e.kind() == io::ErrorKind::Interrupted
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_os_error_is_preserved_through_replicate() {
    let err = SocketError::Io(io::Error::from_raw_os_error(libc::ECONNRESET));
    let copy = err.replicate();
    assert_eq!(copy.raw_os_error(), Some(libc::ECONNRESET));
    assert_eq!(err.raw_os_error(), copy.raw_os_error());
  }

  #[test]
  fn replicate_keeps_kind_without_os_code() {
    let err = SocketError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
    match err.replicate() {
      SocketError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
      other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(SocketError::Cancelled.replicate(), SocketError::Cancelled));
  }

  #[test]
  fn transient_classification() {
    assert!(is_transient(&io::Error::from(io::ErrorKind::WouldBlock)));
    assert!(is_transient(&io::Error::from(io::ErrorKind::Interrupted)));
    assert!(!is_transient(&io::Error::from(io::ErrorKind::ConnectionReset)));

    assert!(is_transient_accept(&io::Error::from(io::ErrorKind::ConnectionAborted)));
    assert!(!is_transient_accept(&io::Error::from_raw_os_error(libc::EMFILE)));

    assert!(is_connect_in_progress(&io::Error::from_raw_os_error(libc::EINPROGRESS)));
    assert!(is_connect_in_progress(&io::Error::from_raw_os_error(libc::EINTR)));
    assert!(!is_connect_in_progress(&io::Error::from_raw_os_error(libc::ECONNREFUSED)));
    assert!(!is_connect_in_progress(&io::Error::from_raw_os_error(libc::EAGAIN)));
    assert!(!is_connect_in_progress(&io::Error::from(io::ErrorKind::WouldBlock)));
  }
}
