// tests/common.rs
#![allow(dead_code)] // Not every test binary uses every helper

use edgesock::{Domain, Endpoint, Interest, Socket, SocketError, SocketOptions, SocketState, Type};
use mio::unix::SourceFd;
use mio::{Events, Poll, Registry, Token};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use std::cell::RefCell;
use std::io;
use std::net::SocketAddr;
use std::os::fd::RawFd;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::{Duration, Instant};

pub const DRIVE_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

static IPC_ENDPOINT_COUNTER: AtomicUsize = AtomicUsize::new(0);

// Use std::sync::Once for one-time initialization
static TRACING_INIT: Once = Once::new();

// Setup function to initialize tracing
pub fn setup_tracing() {
  TRACING_INIT.call_once(|| {
    // Can be overridden by RUST_LOG env variable
    let default_filter = "edgesock=trace,info";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
      .with_max_level(tracing::Level::TRACE)
      .with_env_filter(env_filter)
      .with_target(true)
      .with_line_number(true)
      .with_span_events(FmtSpan::CLOSE)
      .with_test_writer()
      .finish();

    // Another test binary thread may already have installed one.
    let _ = tracing::subscriber::set_global_default(subscriber);
  });
}

/// A shared cell a callback can drop its result into.
pub type Slot<T> = Rc<RefCell<Option<T>>>;

pub fn slot<T>() -> Slot<T> {
  Rc::new(RefCell::new(None))
}

pub fn is_filled<T>(slot: &Slot<T>) -> bool {
  slot.borrow().is_some()
}

pub fn take<T>(slot: &Slot<T>) -> T {
  slot.borrow_mut().take().expect("slot was never filled")
}

type Armed = Option<(RawFd, mio::Interest)>;

fn to_mio(interest: Interest) -> Option<mio::Interest> {
  match (interest.contains(Interest::READABLE), interest.contains(Interest::WRITABLE)) {
    (true, true) => Some(mio::Interest::READABLE.add(mio::Interest::WRITABLE)),
    (true, false) => Some(mio::Interest::READABLE),
    (false, true) => Some(mio::Interest::WRITABLE),
    (false, false) => None,
  }
}

/// Brings the registration of `socket` in line with what it currently asks for.
/// `force` re-arms an unchanged registration so readiness that is still pending is
/// reported again.
fn arm(registry: &Registry, index: usize, socket: &Socket, armed: &mut Armed, force: bool) -> io::Result<()> {
  let wanted = socket.raw_fd().zip(to_mio(socket.interest()));
  if wanted == *armed && !force {
    return Ok(());
  }
  match (*armed, wanted) {
    (Some((old_fd, _)), Some((fd, interest))) if old_fd == fd => {
      registry.reregister(&mut SourceFd(&fd), Token(index), interest)?
    }
    // A different descriptor means the old one was closed, which already removed it.
    (_, Some((fd, interest))) => registry.register(&mut SourceFd(&fd), Token(index), interest)?,
    (Some((old_fd, _)), None) => {
      if socket.raw_fd() == Some(old_fd) {
        registry.deregister(&mut SourceFd(&old_fd))?;
      }
    }
    (None, None) => {}
  }
  *armed = wanted;
  Ok(())
}

/// Plays the external reactor for the given sockets on an edge-triggered `mio::Poll`
/// and calls their drain entry points, until `done` (which may inspect the sockets)
/// returns true. Returns false on timeout.
///
/// Registrations follow [`Socket::interest`]. A listener accepts one connection per
/// `do_read`, so it is re-armed after every dispatch; every other socket has to drain
/// until the OS would block or it will not hear about that readiness again.
pub fn drive(sockets: &mut [&mut Socket], mut done: impl FnMut(&[&mut Socket]) -> bool) -> bool {
  let mut poll = Poll::new().expect("failed to create poll instance");
  let mut events = Events::with_capacity(64);
  let mut armed: Vec<Armed> = vec![None; sockets.len()];
  let deadline = Instant::now() + DRIVE_TIMEOUT;

  loop {
    if done(sockets) {
      return true;
    }
    if Instant::now() > deadline {
      return false;
    }

    for (index, socket) in sockets.iter().enumerate() {
      arm(poll.registry(), index, socket, &mut armed[index], false).expect("failed to register socket");
    }

    match poll.poll(&mut events, Some(POLL_INTERVAL)) {
      Ok(()) => {}
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => panic!("poll failed: {}", e),
    }

    for event in events.iter() {
      let index = event.token().0;
      let socket = &mut *sockets[index];
      if armed[index].map(|(fd, _)| fd) != socket.raw_fd() {
        continue;
      }
      let readable = event.is_readable() || event.is_read_closed() || event.is_error();
      let writable = event.is_writable() || event.is_write_closed() || event.is_error();

      if readable && socket.wants_read() {
        socket.do_read();
      }
      // do_read may have closed the socket; the predicates are false once it has.
      if writable && (socket.wants_write() || socket.state() == SocketState::Connecting) {
        socket.do_write();
      }
      if socket.state() == SocketState::Listening {
        arm(poll.registry(), index, socket, &mut armed[index], true).expect("failed to re-arm listener");
      }
    }
  }
}

/// Runs the reactor for a fixed amount of time regardless of progress.
pub fn drive_for(sockets: &mut [&mut Socket], duration: Duration) {
  let until = Instant::now() + duration;
  drive(sockets, |_| Instant::now() >= until);
}

pub fn tcp_socket() -> Socket {
  setup_tracing();
  Socket::open_new(Domain::IPV4, Type::STREAM, None).expect("failed to open TCP socket")
}

/// A loopback listener on an ephemeral port, plus the address it ended up on.
pub fn listener() -> (Socket, SocketAddr) {
  let mut socket = tcp_socket();
  socket.bind_addr("127.0.0.1", 0).expect("bind failed");
  socket.listen(16).expect("listen failed");
  let addr = socket
    .local_addr()
    .expect("local_addr failed")
    .as_socket()
    .expect("not an inet address");
  (socket, addr)
}

/// Accepts one connection on `listener` from a fresh client.
/// Returns `(server_side, client_side)`, both `Connected`.
pub fn connected_pair_with(listener: &mut Socket, addr: SocketAddr, client_options: SocketOptions) -> (Socket, Socket) {
  let accepted: Slot<Result<Socket, SocketError>> = slot();
  let connected: Slot<Result<(), SocketError>> = slot();

  let accepted_cb = accepted.clone();
  listener.accept(move |res| *accepted_cb.borrow_mut() = Some(res));

  let mut client = Socket::with_options(client_options);
  client.open(Domain::IPV4, Type::STREAM, None).expect("client open failed");
  let connected_cb = connected.clone();
  client.connect(&Endpoint::from(addr), move |res| *connected_cb.borrow_mut() = Some(res));

  assert!(
    drive(&mut [&mut *listener, &mut client], |_| is_filled(&accepted) && is_filled(&connected)),
    "timed out establishing a connection"
  );
  take(&connected).expect("connect failed");
  let server = take(&accepted).expect("accept failed");
  assert_eq!(server.state(), SocketState::Connected);
  assert_eq!(client.state(), SocketState::Connected);
  (server, client)
}

pub fn connected_pair() -> (Socket, Socket) {
  let (mut listener, addr) = listener();
  connected_pair_with(&mut listener, addr, SocketOptions::default())
}

// Helper to generate unique IPC endpoints for tests
pub fn unique_ipc_path() -> std::path::PathBuf {
  let pid = std::process::id();
  let count = IPC_ENDPOINT_COUNTER.fetch_add(1, Ordering::Relaxed);
  std::env::temp_dir().join(format!("edgesock_test_{}_{}.sock", pid, count))
}
