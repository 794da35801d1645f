// src/socket/mod.rs

pub mod core; // Socket: state machine, requests, drains
pub mod events; // Monitor events
pub(crate) mod framing; // Read/write buffers and FIFO request queues
pub mod options; // Option constants and SocketOptions
pub mod state; // SocketState and Interest

pub use self::core::{AcceptCallback, ConnectCallback, ReadCallback, Socket, WriteCallback};
pub use events::{MonitorReceiver, MonitorSender, SocketEvent};
pub use options::SocketOptions;
pub use state::{Interest, SocketState};
