// src/socket/options.rs

use crate::error::SocketError;

// --- Option IDs accepted by `Socket::set_option` ---
pub const READ_CHUNK_SIZE: i32 = 1;
pub const TCP_NODELAY: i32 = 2;
pub const REUSEADDR: i32 = 3;
pub const NONBLOCKING: i32 = 4;
pub const READ_BOUNDARY: i32 = 5;
pub const CLOSE_DISPOSAL: i32 = 6;

/// Bytes requested from the descriptor per `read(2)` during a drain.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;
/// Backlog used by `Socket::listen_default`.
pub const DEFAULT_BACKLOG: i32 = 128;

/// When a fixed-size read of `n` bytes counts as satisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadBoundary {
  /// Resolve once at least `n` bytes are buffered.
  #[default]
  AtLeast,
  /// Resolve only once strictly more than `n` bytes are buffered.
  Exceeds,
}

impl ReadBoundary {
  pub(crate) fn is_satisfied(self, buffered: usize, wanted: usize) -> bool {
    match self {
      ReadBoundary::AtLeast => buffered >= wanted,
      ReadBoundary::Exceeds => buffered > wanted,
    }
  }
}

/// What happens to queued callbacks when the socket is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseDisposal {
  /// Every outstanding callback is invoked with `SocketError::Cancelled`.
  #[default]
  Cancel,
  /// Outstanding callbacks are dropped without being invoked.
  Drop,
}

/// Holds parsed and validated socket options.
#[derive(Debug, Clone)]
pub struct SocketOptions {
  /// Zero is treated as one.
  pub read_chunk_size: usize,
  /// `None` leaves the OS default untouched.
  pub tcp_nodelay: Option<bool>,
  /// Applied right before `bind`.
  pub reuse_address: bool,
  /// Applied right after `open` and to accepted descriptors.
  pub nonblocking: bool,
  pub read_boundary: ReadBoundary,
  pub close_disposal: CloseDisposal,
}

impl Default for SocketOptions {
  fn default() -> Self {
    Self {
      read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
      tcp_nodelay: None,
      reuse_address: true,
      nonblocking: true,
      read_boundary: ReadBoundary::AtLeast,
      close_disposal: CloseDisposal::Cancel,
    }
  }
}

impl SocketOptions {
  /// Clamps values that the public fields allow but a socket cannot use.
  pub(crate) fn normalized(mut self) -> Self {
    self.read_chunk_size = self.read_chunk_size.max(1);
    self
  }

  pub fn with_read_chunk_size(mut self, size: usize) -> Self {
    self.read_chunk_size = size.max(1);
    self
  }

  pub fn with_tcp_nodelay(mut self, enabled: bool) -> Self {
    self.tcp_nodelay = Some(enabled);
    self
  }

  pub fn with_reuse_address(mut self, enabled: bool) -> Self {
    self.reuse_address = enabled;
    self
  }

  pub fn with_nonblocking(mut self, enabled: bool) -> Self {
    self.nonblocking = enabled;
    self
  }

  pub fn with_read_boundary(mut self, boundary: ReadBoundary) -> Self {
    self.read_boundary = boundary;
    self
  }

  pub fn with_close_disposal(mut self, disposal: CloseDisposal) -> Self {
    self.close_disposal = disposal;
    self
  }

  /// Applies a raw option value. Values are native-endian `i32`s.
  pub fn apply(&mut self, option: i32, value: &[u8]) -> Result<(), SocketError> {
    match option {
      READ_CHUNK_SIZE => {
        let size = parse_i32_option(value, option)?;
        if size <= 0 {
          return Err(SocketError::InvalidOptionValue(option));
        }
        self.read_chunk_size = size as usize;
      }
      TCP_NODELAY => self.tcp_nodelay = Some(parse_bool_option(value, option)?),
      REUSEADDR => self.reuse_address = parse_bool_option(value, option)?,
      NONBLOCKING => self.nonblocking = parse_bool_option(value, option)?,
      READ_BOUNDARY => {
        self.read_boundary = match parse_i32_option(value, option)? {
          0 => ReadBoundary::AtLeast,
          1 => ReadBoundary::Exceeds,
          _ => return Err(SocketError::InvalidOptionValue(option)),
        }
      }
      CLOSE_DISPOSAL => {
        self.close_disposal = match parse_i32_option(value, option)? {
          0 => CloseDisposal::Cancel,
          1 => CloseDisposal::Drop,
          _ => return Err(SocketError::InvalidOptionValue(option)),
        }
      }
      _ => return Err(SocketError::InvalidOption(option)),
    }
    Ok(())
  }
}

// --- Helper functions for parsing option values ---
/// Parses a byte slice representing an integer option.
pub(crate) fn parse_i32_option(value: &[u8], option: i32) -> Result<i32, SocketError> {
  let arr: [u8; 4] = value
    .try_into()
    .map_err(|_| SocketError::InvalidOptionValue(option))?;
  Ok(i32::from_ne_bytes(arr))
}

/// Parses a byte slice representing a boolean option (0 or 1).
pub(crate) fn parse_bool_option(value: &[u8], option: i32) -> Result<bool, SocketError> {
  Ok(parse_i32_option(value, option)? == 1)
}
