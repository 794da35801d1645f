// src/socket/core.rs

//! The socket core: descriptor ownership, lifecycle state machine, submit-only
//! requests, readiness predicates and readiness-driven drains.

use crate::error::{self, SocketError};
use crate::socket::events::{monitor_channel, MonitorReceiver, MonitorSender, SocketEvent};
use crate::socket::framing::{ReadKind, ReadQueue, WriteQueue};
pub use crate::socket::framing::{ReadCallback, WriteCallback};
use crate::socket::options::{self, CloseDisposal, SocketOptions, DEFAULT_BACKLOG};
use crate::socket::state::{Interest, SocketState};
use crate::transport::endpoint::Endpoint;
use bytes::Bytes;
use socket2::{Domain, Protocol, SockAddr, Type};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, IntoRawFd, RawFd};

/// Invoked once a connect attempt resolves.
pub type ConnectCallback = Box<dyn FnOnce(Result<(), SocketError>)>;
/// Invoked with the freshly accepted connection, which it then owns.
pub type AcceptCallback = Box<dyn FnOnce(Result<Socket, SocketError>)>;

#[cfg(target_os = "linux")]
const SEND_FLAGS: libc::c_int = libc::MSG_NOSIGNAL;
#[cfg(not(target_os = "linux"))]
const SEND_FLAGS: libc::c_int = 0;

/// A non-blocking, callback-driven wrapper around one socket descriptor.
///
/// Requests (`accept`, `read`, `read_until`, `write`) are only queued. They are
/// resolved, in submission order per queue, from [`Socket::do_read`] and
/// [`Socket::do_write`], which the owning reactor calls once the descriptor is ready.
/// Calling an operation outside the states it is documented for is a contract
/// violation and panics.
///
/// The socket is single-threaded by construction (callbacks are not `Send`).
pub struct Socket {
  descriptor: Option<socket2::Socket>,
  state: SocketState,
  options: SocketOptions,
  reads: ReadQueue,
  writes: WriteQueue,
  pending_accepts: VecDeque<AcceptCallback>,
  pending_connect: Option<ConnectCallback>,
  /// End-of-stream observed on the descriptor.
  peer_closed: bool,
  monitor: Option<MonitorSender>,
}

impl Default for Socket {
  fn default() -> Self {
    Self::new()
  }
}

impl Socket {
  /// Creates an empty socket in the `Closed` state.
  pub fn new() -> Self {
    Self::with_options(SocketOptions::default())
  }

  pub fn with_options(options: SocketOptions) -> Self {
    Self {
      descriptor: None,
      state: SocketState::Closed,
      options: options.normalized(),
      reads: ReadQueue::default(),
      writes: WriteQueue::default(),
      pending_accepts: VecDeque::new(),
      pending_connect: None,
      peer_closed: false,
      monitor: None,
    }
  }

  /// Creates a socket and opens it in one step.
  pub fn open_new(domain: Domain, ty: Type, protocol: Option<Protocol>) -> Result<Self, SocketError> {
    let mut socket = Self::new();
    socket.open(domain, ty, protocol)?;
    Ok(socket)
  }

  /// Wraps a descriptor handed out by `accept(2)`.
  fn from_accepted(descriptor: socket2::Socket, options: SocketOptions) -> io::Result<Self> {
    configure_descriptor(&descriptor, &options)?;
    let mut socket = Self::with_options(options);
    socket.descriptor = Some(descriptor);
    socket.state = SocketState::Connected;
    Ok(socket)
  }

  // --- Accessors ---

  pub fn state(&self) -> SocketState {
    self.state
  }

  pub fn options(&self) -> &SocketOptions {
    &self.options
  }

  /// The native descriptor, or `None` while closed.
  pub fn raw_fd(&self) -> Option<RawFd> {
    self.descriptor.as_ref().map(|s| s.as_raw_fd())
  }

  pub fn local_addr(&self) -> Result<SockAddr, SocketError> {
    Ok(self.descriptor()?.local_addr()?)
  }

  pub fn peer_addr(&self) -> Result<SockAddr, SocketError> {
    Ok(self.descriptor()?.peer_addr()?)
  }

  /// Bytes read from the descriptor but not yet delivered to a read request.
  pub fn buffered_read_len(&self) -> usize {
    self.reads.buffered()
  }

  /// Bytes accepted by `write` but not yet sent.
  pub fn buffered_write_len(&self) -> usize {
    self.writes.buffered()
  }

  pub fn pending_reads(&self) -> usize {
    self.reads.pending()
  }

  pub fn pending_writes(&self) -> usize {
    self.writes.pending()
  }

  pub fn pending_accepts(&self) -> usize {
    self.pending_accepts.len()
  }

  pub fn has_pending_connect(&self) -> bool {
    self.pending_connect.is_some()
  }

  /// Whether the peer's end-of-stream has been observed.
  pub fn is_peer_closed(&self) -> bool {
    self.peer_closed
  }

  /// Starts delivering [`SocketEvent`]s. Replaces any previous monitor.
  pub fn monitor(&mut self) -> MonitorReceiver {
    let (tx, rx) = monitor_channel();
    self.monitor = Some(tx);
    rx
  }

  // --- Configuration ---

  /// Applies a raw option (see the constants in [`crate::socket::options`]).
  /// Options that map onto the descriptor take effect immediately when it is open.
  pub fn set_option(&mut self, option: i32, value: &[u8]) -> Result<(), SocketError> {
    self.options.apply(option, value)?;
    if let Some(sock) = &self.descriptor {
      match option {
        options::TCP_NODELAY => {
          if let Some(nodelay) = self.options.tcp_nodelay {
            sock.set_nodelay(nodelay)?;
          }
        }
        options::NONBLOCKING => sock.set_nonblocking(self.options.nonblocking)?,
        _ => {}
      }
    }
    Ok(())
  }

  pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<(), SocketError> {
    self.descriptor()?.set_nonblocking(nonblocking)?;
    self.options.nonblocking = nonblocking;
    Ok(())
  }

  // --- Lifecycle ---

  /// `Closed -> Opened`. On failure the socket stays `Closed`.
  pub fn open(&mut self, domain: Domain, ty: Type, protocol: Option<Protocol>) -> Result<(), SocketError> {
    self.expect_state(&[SocketState::Closed], "open");
    let descriptor = socket2::Socket::new(domain, ty, protocol)?;
    configure_descriptor(&descriptor, &self.options)?;

    tracing::debug!(fd = descriptor.as_raw_fd(), ?domain, ?ty, "Socket opened");
    self.descriptor = Some(descriptor);
    self.state = SocketState::Opened;
    self.peer_closed = false;
    self.emit(SocketEvent::Opened);
    Ok(())
  }

  /// `Opened -> Bound`.
  pub fn bind(&mut self, endpoint: &Endpoint) -> Result<(), SocketError> {
    self.expect_state(&[SocketState::Opened], "bind");
    let addr = endpoint.to_sock_addr()?;
    let sock = self.descriptor()?;
    if self.options.reuse_address {
      sock.set_reuse_address(true)?;
    }
    sock.bind(&addr)?;

    tracing::debug!(fd = sock.as_raw_fd(), %endpoint, "Socket bound");
    self.state = SocketState::Bound;
    self.emit(SocketEvent::Bound {
      endpoint: endpoint.to_string(),
    });
    Ok(())
  }

  /// Binds to a textual IP address and port.
  pub fn bind_addr(&mut self, address: &str, port: u16) -> Result<(), SocketError> {
    let endpoint = Endpoint::new(address, port)?;
    self.bind(&endpoint)
  }

  /// `Bound -> Listening`.
  pub fn listen(&mut self, backlog: i32) -> Result<(), SocketError> {
    self.expect_state(&[SocketState::Bound], "listen");
    let sock = self.descriptor()?;
    sock.listen(backlog)?;

    tracing::debug!(fd = sock.as_raw_fd(), backlog, "Socket listening");
    self.state = SocketState::Listening;
    self.emit(SocketEvent::Listening { backlog });
    Ok(())
  }

  pub fn listen_default(&mut self) -> Result<(), SocketError> {
    self.listen(DEFAULT_BACKLOG)
  }

  /// `Opened|Bound -> Connecting|Connected`.
  ///
  /// Immediate success or failure invokes `callback` before returning; a failed
  /// attempt also closes the socket. An attempt the OS reports as in progress moves
  /// to `Connecting` and is resolved by a later [`Socket::do_read`] / [`Socket::do_write`].
  pub fn connect<F>(&mut self, endpoint: &Endpoint, callback: F)
  where
    F: FnOnce(Result<(), SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Opened, SocketState::Bound], "connect");

    let attempt = endpoint
      .to_sock_addr()
      .and_then(|addr| Ok(self.descriptor()?.connect(&addr)?));
    match attempt {
      Ok(()) => {
        tracing::debug!(fd = ?self.raw_fd(), %endpoint, "Socket connected immediately");
        self.state = SocketState::Connected;
        self.emit(SocketEvent::Connected {
          endpoint: Some(endpoint.to_string()),
        });
        callback(Ok(()));
      }
      Err(SocketError::Io(e)) if error::is_connect_in_progress(&e) => {
        tracing::debug!(fd = ?self.raw_fd(), %endpoint, "Connect in progress");
        self.state = SocketState::Connecting;
        self.pending_connect = Some(Box::new(callback));
        self.emit(SocketEvent::ConnectDelayed {
          endpoint: endpoint.to_string(),
        });
      }
      Err(e) => {
        tracing::debug!(fd = ?self.raw_fd(), %endpoint, error = %e, "Connect failed");
        self.emit(SocketEvent::ConnectFailed { error_msg: e.to_string() });
        self.close_quietly();
        callback(Err(e));
      }
    }
  }

  /// Connects to a textual IP address and port.
  pub fn connect_addr<F>(&mut self, address: &str, port: u16, callback: F)
  where
    F: FnOnce(Result<(), SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Opened, SocketState::Bound], "connect");
    match Endpoint::new(address, port) {
      Ok(endpoint) => self.connect(&endpoint, callback),
      Err(e) => {
        self.close_quietly();
        callback(Err(e));
      }
    }
  }

  /// Releases the descriptor and returns to `Closed`. Calling it on a closed socket
  /// is a no-op that succeeds.
  ///
  /// Requests still queued are disposed of according to
  /// [`SocketOptions::close_disposal`].
  pub fn close(&mut self) -> Result<(), SocketError> {
    let Some(descriptor) = self.descriptor.take() else {
      return Ok(());
    };
    let fd = descriptor.into_raw_fd();
    self.state = SocketState::Closed;

    // SAFETY: `fd` came from `into_raw_fd`, so we are its only owner and it is closed exactly once.
    let status = unsafe { libc::close(fd) };
    let result = if status == 0 {
      Ok(())
    } else {
      Err(SocketError::Io(io::Error::last_os_error()))
    };

    tracing::debug!(fd, ok = result.is_ok(), "Socket closed");
    self.emit(SocketEvent::Closed);
    self.dispose_pending();
    self.peer_closed = false;
    result
  }

  fn close_quietly(&mut self) {
    if let Err(e) = self.close() {
      tracing::warn!(error = %e, "Error closing socket");
    }
  }

  fn dispose_pending(&mut self) {
    match self.options.close_disposal {
      CloseDisposal::Cancel => {
        let cancelled = SocketError::Cancelled;
        let mut count = self.reads.fail_all(&cancelled) + self.writes.fail_all(&cancelled);
        for callback in std::mem::take(&mut self.pending_accepts) {
          callback(Err(SocketError::Cancelled));
          count += 1;
        }
        if let Some(callback) = self.pending_connect.take() {
          callback(Err(SocketError::Cancelled));
          count += 1;
        }
        if count > 0 {
          tracing::debug!(count, "Cancelled pending requests on close");
        }
      }
      CloseDisposal::Drop => {
        let mut count = self.reads.pending() + self.writes.pending() + self.pending_accepts.len();
        count += usize::from(self.pending_connect.take().is_some());
        self.pending_accepts.clear();
        self.reads.clear();
        self.writes.clear();
        if count > 0 {
          tracing::warn!(count, "Dropped pending requests on close without notification");
        }
      }
    }
    self.reads.clear();
    self.writes.clear();
  }

  // --- Submit-only requests ---

  /// Queues an accept. Precondition: `Listening`.
  pub fn accept<F>(&mut self, callback: F)
  where
    F: FnOnce(Result<Socket, SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Listening], "accept");
    self.pending_accepts.push_back(Box::new(callback));
  }

  /// Queues a read of exactly `size` bytes. Precondition: `Connecting` or `Connected`.
  pub fn read<F>(&mut self, size: usize, callback: F)
  where
    F: FnOnce(Result<Bytes, SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Connecting, SocketState::Connected], "read");
    self.reads.push(ReadKind::Exactly(size), Box::new(callback));
  }

  /// Queues a read of everything up to and including the next `delim` byte.
  /// Precondition: `Connecting` or `Connected`.
  pub fn read_until<F>(&mut self, delim: u8, callback: F)
  where
    F: FnOnce(Result<Bytes, SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Connecting, SocketState::Connected], "read_until");
    self.reads.push(ReadKind::Until(delim), Box::new(callback));
  }

  /// Buffers `data` for sending and queues its completion. The bytes are buffered
  /// even if the descriptor is not writable yet. Precondition: `Connecting` or `Connected`.
  pub fn write<F>(&mut self, data: &[u8], callback: F)
  where
    F: FnOnce(Result<usize, SocketError>) + 'static,
  {
    self.expect_state(&[SocketState::Connecting, SocketState::Connected], "write");
    self.writes.push(data, Box::new(callback));
  }

  /// Resolves read requests that bytes already buffered can satisfy, without
  /// touching the descriptor. Useful after queueing reads from outside a drain.
  pub fn deliver_buffered(&mut self) -> usize {
    self.reads.resolve_ready(self.options.read_boundary)
  }

  // --- Readiness predicates ---

  /// Whether the reactor should watch this socket for read readiness.
  pub fn wants_read(&self) -> bool {
    match self.state {
      SocketState::Connecting => true,
      // After end-of-stream only a queued read still needs a drain (to fail it).
      SocketState::Connected => !self.peer_closed || self.reads.pending() > 0,
      SocketState::Listening => !self.pending_accepts.is_empty(),
      _ => false,
    }
  }

  /// Whether the reactor should watch this socket for write readiness.
  pub fn wants_write(&self) -> bool {
    self.state == SocketState::Connected && (self.writes.buffered() > 0 || self.writes.pending() > 0)
  }

  /// Both predicates as flags. A connecting socket also asks for writability, which
  /// is how POSIX reports connect completion.
  pub fn interest(&self) -> Interest {
    let mut interest = Interest::empty();
    if self.wants_read() {
      interest |= Interest::READABLE;
    }
    if self.wants_write() || self.state == SocketState::Connecting {
      interest |= Interest::WRITABLE;
    }
    interest
  }

  // --- Readiness-driven drains ---

  /// Called by the reactor when the descriptor is readable.
  /// Valid in `Listening`, `Connecting` and `Connected`.
  ///
  /// A drain can close the socket (failed connect, terminal I/O error). A reactor
  /// that got several readiness bits in one tick must re-check [`Socket::state`] or
  /// [`Socket::interest`] before calling the next drain.
  pub fn do_read(&mut self) {
    match self.state {
      SocketState::Listening => self.accept_one(),
      SocketState::Connecting => self.probe_connect(),
      SocketState::Connected => self.drain_read(),
      _ => self.contract_violation("do_read"),
    }
  }

  /// Called by the reactor when the descriptor is writable.
  /// Valid in `Connecting` and `Connected`. See [`Socket::do_read`] for drains
  /// that close the socket.
  pub fn do_write(&mut self) {
    match self.state {
      SocketState::Connecting => self.probe_connect(),
      SocketState::Connected => self.drain_write(),
      _ => self.contract_violation("do_write"),
    }
  }

  fn accept_one(&mut self) {
    if self.pending_accepts.is_empty() {
      return;
    }
    let accepted = match self.descriptor() {
      Ok(sock) => sock.accept(),
      Err(e) => Err(e),
    };

    match accepted {
      Ok((descriptor, peer)) => {
        let peer_addr = peer.as_socket().map(|addr| addr.to_string());
        let result = Socket::from_accepted(descriptor, self.options.clone()).map_err(SocketError::from);
        match &result {
          Ok(child) => {
            tracing::debug!(listener_fd = ?self.raw_fd(), fd = ?child.raw_fd(), ?peer_addr, "Accepted connection");
            self.emit(SocketEvent::Accepted { peer_addr });
          }
          Err(e) => {
            tracing::warn!(listener_fd = ?self.raw_fd(), error = %e, "Failed to configure accepted connection");
            self.emit(SocketEvent::AcceptFailed { error_msg: e.to_string() });
          }
        }
        if let Some(callback) = self.pending_accepts.pop_front() {
          callback(result);
        }
      }
      Err(e) if error::is_transient_accept(&e) => {
        tracing::trace!(listener_fd = ?self.raw_fd(), error = %e, "No connection to accept yet");
      }
      Err(e) => {
        tracing::warn!(listener_fd = ?self.raw_fd(), error = %e, "Accept failed");
        self.emit(SocketEvent::AcceptFailed { error_msg: e.to_string() });
        if let Some(callback) = self.pending_accepts.pop_front() {
          callback(Err(SocketError::Io(e)));
        }
      }
    }
  }

  /// Resolves an in-progress connect: pending socket error first, then a
  /// zero-length read, then whether a peer address exists yet.
  fn probe_connect(&mut self) {
    let outcome = self.descriptor().and_then(connect_probe);
    match outcome {
      Ok(false) => {
        tracing::trace!(fd = ?self.raw_fd(), "Connect still in progress");
      }
      Ok(true) => {
        tracing::debug!(fd = ?self.raw_fd(), "Connect completed");
        self.state = SocketState::Connected;
        let endpoint = self
          .peer_addr()
          .ok()
          .and_then(|addr| addr.as_socket())
          .map(|addr| Endpoint::from(addr).to_string());
        self.emit(SocketEvent::Connected { endpoint });
        if let Some(callback) = self.pending_connect.take() {
          callback(Ok(()));
        }
        // Requests queued while connecting may already be serviceable.
        self.drain_read();
        if self.wants_write() {
          self.drain_write();
        }
      }
      Err(e) => {
        tracing::debug!(fd = ?self.raw_fd(), error = %e, "Connect failed");
        let callback = self.pending_connect.take();
        self.emit(SocketEvent::ConnectFailed { error_msg: e.to_string() });
        self.close_quietly();
        if let Some(callback) = callback {
          callback(Err(SocketError::Io(e)));
        }
      }
    }
  }

  /// Reads everything the descriptor has to offer, then frames it for the queued reads.
  fn drain_read(&mut self) {
    let Some(sock) = self.descriptor.as_ref() else {
      return;
    };
    let mut reader: &socket2::Socket = sock;
    let mut chunk = vec![0u8; self.options.read_chunk_size];
    let mut total = 0usize;
    let mut eof = false;
    let mut failure = None;

    loop {
      match reader.read(&mut chunk) {
        Ok(0) => {
          eof = true;
          break;
        }
        Ok(n) => {
          self.reads.extend(&chunk[..n]);
          total += n;
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) if error::is_transient(&e) => break,
        Err(e) => {
          failure = Some(e);
          break;
        }
      }
    }

    tracing::trace!(fd = sock.as_raw_fd(), bytes = total, buffered = self.reads.buffered(), eof, "Read drain finished");
    self.reads.resolve_ready(self.options.read_boundary);

    if let Some(e) = failure {
      self.fail_terminal(e, "read");
    } else if eof {
      self.handle_peer_closed();
    }
  }

  /// Sends as much of the write buffer as the OS takes, resolving writes whose
  /// bytes have all left the buffer.
  fn drain_write(&mut self) {
    let Some(sock) = self.descriptor.as_ref() else {
      return;
    };
    let mut total = 0usize;
    let mut failure = None;

    loop {
      let unsent = self.writes.unsent();
      if unsent.is_empty() {
        break;
      }
      match sock.send_with_flags(unsent, SEND_FLAGS) {
        Ok(0) => break,
        Ok(n) => {
          total += n;
          self.writes.consume(n);
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) if error::is_transient(&e) => break,
        Err(e) => {
          failure = Some(e);
          break;
        }
      }
    }
    // Zero-length writes have nothing to send but still need resolving.
    self.writes.consume(0);

    tracing::trace!(fd = sock.as_raw_fd(), bytes = total, buffered = self.writes.buffered(), "Write drain finished");
    if let Some(e) = failure {
      self.fail_terminal(e, "write");
    }
  }

  fn handle_peer_closed(&mut self) {
    if !self.peer_closed {
      tracing::debug!(fd = ?self.raw_fd(), "Peer closed the connection");
      self.peer_closed = true;
      self.emit(SocketEvent::Disconnected);
    }
    let failed = self.reads.fail_all(&SocketError::ConnectionClosed);
    if failed > 0 {
      tracing::debug!(fd = ?self.raw_fd(), failed, "Failed reads that end-of-stream left unsatisfiable");
    }
  }

  /// A non-transient I/O failure: every queued read and write learns about it,
  /// then the socket is closed.
  fn fail_terminal(&mut self, e: io::Error, direction: &'static str) {
    let err = SocketError::Io(e);
    tracing::error!(fd = ?self.raw_fd(), direction, error = %err, "Terminal I/O failure, closing socket");
    let error_msg = err.to_string();
    self.emit(match direction {
      "read" => SocketEvent::ReadFailed { error_msg },
      _ => SocketEvent::WriteFailed { error_msg },
    });
    self.reads.fail_all(&err);
    self.writes.fail_all(&err);
    self.close_quietly();
  }

  // --- Helpers ---

  fn descriptor(&self) -> io::Result<&socket2::Socket> {
    self
      .descriptor
      .as_ref()
      .ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected))
  }

  fn emit(&self, event: SocketEvent) {
    if let Some(monitor) = &self.monitor {
      if let Err(e) = monitor.try_send(event) {
        tracing::trace!("Monitor event dropped: {}", e);
      }
    }
  }

  #[track_caller]
  fn expect_state(&self, allowed: &[SocketState], operation: &'static str) {
    if !allowed.contains(&self.state) {
      self.contract_violation(operation);
    }
  }

  #[track_caller]
  fn contract_violation(&self, operation: &'static str) -> ! {
    panic!("Socket::{} is not valid in state {}", operation, self.state)
  }
}

/// Applies the descriptor-level options shared by opened and accepted sockets.
fn configure_descriptor(sock: &socket2::Socket, options: &SocketOptions) -> io::Result<()> {
  sock.set_nonblocking(options.nonblocking)?;
  #[cfg(any(target_os = "macos", target_os = "ios"))]
  sock.set_nosigpipe(true)?;
  if let Some(nodelay) = options.tcp_nodelay {
    // Not every domain supports TCP_NODELAY (e.g. Unix sockets); that is not fatal.
    if let Err(e) = sock.set_nodelay(nodelay) {
      tracing::debug!(fd = sock.as_raw_fd(), error = %e, "TCP_NODELAY not applied");
    }
  }
  Ok(())
}

/// `Ok(true)` connected, `Ok(false)` still in progress, `Err` failed.
fn connect_probe(sock: &socket2::Socket) -> io::Result<bool> {
  if let Some(e) = sock.take_error()? {
    return Err(e);
  }
  let mut reader: &socket2::Socket = sock;
  match reader.read(&mut []) {
    Ok(_) => {}
    Err(e) if error::is_transient(&e) => {}
    Err(e) if e.raw_os_error() == Some(libc::ENOTCONN) => return Ok(false),
    Err(e) => return Err(e),
  }
  match sock.peer_addr() {
    Ok(_) => Ok(true),
    Err(e) if e.raw_os_error() == Some(libc::ENOTCONN) => Ok(false),
    Err(e) => Err(e),
  }
}

impl Drop for Socket {
  fn drop(&mut self) {
    if let Err(e) = self.close() {
      tracing::warn!(error = %e, "Error closing socket on drop");
    }
  }
}

impl AsRawFd for Socket {
  /// Returns `-1` while the socket is closed.
  fn as_raw_fd(&self) -> RawFd {
    self.raw_fd().unwrap_or(-1)
  }
}

impl std::fmt::Debug for Socket {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Socket")
      .field("fd", &self.raw_fd())
      .field("state", &self.state)
      .field("buffered_read", &self.reads.buffered())
      .field("buffered_write", &self.writes.buffered())
      .field("pending_accepts", &self.pending_accepts.len())
      .field("pending_reads", &self.reads.pending())
      .field("pending_writes", &self.writes.pending())
      .field("pending_connect", &self.pending_connect.is_some())
      .field("peer_closed", &self.peer_closed)
      .finish()
  }
}
