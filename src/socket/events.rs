// src/socket/events.rs

/// Lifecycle and failure events reported through [`Socket::monitor`](crate::Socket::monitor).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive] // Allow adding more events later
pub enum SocketEvent {
  /// A descriptor was created.
  Opened,
  /// Socket bound to a local address.
  Bound { endpoint: String },
  /// Socket has started listening.
  Listening { backlog: i32 },
  /// Accepted a new connection. `peer_addr` is the address of the remote peer, if known.
  Accepted { peer_addr: Option<String> },
  /// Failed to accept a new connection.
  AcceptFailed { error_msg: String },

  /// Connection established (immediately or after a probe).
  Connected { endpoint: Option<String> },
  /// Connect is in progress; resolution will follow a readiness probe.
  ConnectDelayed { endpoint: String },
  /// Connection attempt failed. The socket has been closed.
  ConnectFailed { error_msg: String },

  /// Peer closed its sending side.
  Disconnected,
  /// Terminal read failure. The socket has been closed.
  ReadFailed { error_msg: String },
  /// Terminal write failure. The socket has been closed.
  WriteFailed { error_msg: String },
  /// Descriptor released.
  Closed,
}

// Type alias for the channel sender used for monitor events
pub type MonitorSender = async_channel::Sender<SocketEvent>;
// Type alias for the channel receiver used for monitor events
pub type MonitorReceiver = async_channel::Receiver<SocketEvent>;

// Default capacity for monitor channel
pub const DEFAULT_MONITOR_CAPACITY: usize = 100;

/// Creates a monitor channel with the default capacity.
pub(crate) fn monitor_channel() -> (MonitorSender, MonitorReceiver) {
  async_channel::bounded(DEFAULT_MONITOR_CAPACITY)
}
