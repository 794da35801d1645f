// src/socket/state.rs

use bitflags::bitflags;

/// Lifecycle state of a [`Socket`](crate::Socket).
///
/// ```text
/// Closed -> Opened -> Bound -> Listening
///             |         |
///             +----+----+
///                  v
///             Connecting -> Connected
/// ```
/// Every state returns to `Closed` on `close()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SocketState {
  #[default]
  Closed,
  Opened,
  Bound,
  Listening,
  Connecting,
  Connected,
}

impl SocketState {
  pub fn as_str(&self) -> &'static str {
    match self {
      SocketState::Closed => "Closed",
      SocketState::Opened => "Opened",
      SocketState::Bound => "Bound",
      SocketState::Listening => "Listening",
      SocketState::Connecting => "Connecting",
      SocketState::Connected => "Connected",
    }
  }
}

impl std::fmt::Display for SocketState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

bitflags! {
    /// Readiness a socket currently wants the reactor to watch for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Interest: u8 {
        const READABLE = 0b01;
        const WRITABLE = 0b10;
    }
}
