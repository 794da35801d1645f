// src/socket/framing.rs

//! Buffers and FIFO request queues for the read and write sides of a socket.
//!
//! Both queues are OS-independent: the socket core feeds them bytes it read from the
//! descriptor (or tells them how many bytes left it) and they resolve callbacks.

use crate::error::SocketError;
use crate::socket::options::ReadBoundary;
use bytes::{Buf, Bytes, BytesMut};
use std::collections::VecDeque;

/// Invoked with exactly the framed bytes of a completed read.
pub type ReadCallback = Box<dyn FnOnce(Result<Bytes, SocketError>)>;
/// Invoked with the byte count of a completed write.
pub type WriteCallback = Box<dyn FnOnce(Result<usize, SocketError>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadKind {
  /// Exactly this many bytes.
  Exactly(usize),
  /// Everything up to and including the first occurrence of the delimiter.
  Until(u8),
}

pub(crate) struct ReadRequest {
  kind: ReadKind,
  callback: ReadCallback,
}

/// Read buffer plus the queue of read requests waiting on it.
///
/// Only the head request is ever checked. A later request whose condition happens
/// to be met never jumps ahead of an earlier unmet one.
#[derive(Default)]
pub(crate) struct ReadQueue {
  buffer: BytesMut,
  requests: VecDeque<ReadRequest>,
}

impl ReadQueue {
  pub(crate) fn push(&mut self, kind: ReadKind, callback: ReadCallback) {
    self.requests.push_back(ReadRequest { kind, callback });
  }

  /// Appends bytes received from the descriptor.
  pub(crate) fn extend(&mut self, data: &[u8]) {
    self.buffer.extend_from_slice(data);
  }

  pub(crate) fn buffered(&self) -> usize {
    self.buffer.len()
  }

  pub(crate) fn pending(&self) -> usize {
    self.requests.len()
  }

  /// Resolves head requests for as long as the head is satisfiable, restarting the
  /// check after every resolution. Returns how many were resolved.
  pub(crate) fn resolve_ready(&mut self, boundary: ReadBoundary) -> usize {
    let mut resolved = 0;
    loop {
      let take = match self.requests.front() {
        None => break,
        Some(head) => match head.kind {
          ReadKind::Exactly(n) => boundary.is_satisfied(self.buffer.len(), n).then_some(n),
          ReadKind::Until(delim) => self.buffer.iter().position(|b| *b == delim).map(|i| i + 1),
        },
      };
      let Some(take) = take else { break };
      let Some(request) = self.requests.pop_front() else { break };

      let frame = self.buffer.split_to(take).freeze();
      tracing::trace!(kind = ?request.kind, bytes = frame.len(), remaining = self.buffer.len(), "Read request resolved");
      (request.callback)(Ok(frame));
      resolved += 1;
    }
    resolved
  }

  /// Resolves every queued request with a copy of `error`. Buffered bytes are kept.
  pub(crate) fn fail_all(&mut self, error: &SocketError) -> usize {
    let requests = std::mem::take(&mut self.requests);
    let count = requests.len();
    for request in requests {
      (request.callback)(Err(error.replicate()));
    }
    count
  }

  /// Drops every queued request without invoking it and clears the buffer.
  pub(crate) fn clear(&mut self) -> usize {
    let count = self.requests.len();
    self.requests.clear();
    self.buffer.clear();
    count
  }
}

pub(crate) struct WriteRequest {
  size: usize,
  callback: WriteCallback,
}

/// Write buffer plus the queue of write requests whose bytes it holds.
///
/// `sent` counts bytes that already left the buffer but do not yet add up to the
/// head request's size. It is always smaller than the head request's size.
#[derive(Default)]
pub(crate) struct WriteQueue {
  buffer: BytesMut,
  requests: VecDeque<WriteRequest>,
  sent: usize,
}

impl WriteQueue {
  /// Buffers `data` unconditionally and queues its completion.
  pub(crate) fn push(&mut self, data: &[u8], callback: WriteCallback) {
    self.buffer.extend_from_slice(data);
    self.requests.push_back(WriteRequest {
      size: data.len(),
      callback,
    });
  }

  /// Bytes waiting to be sent, oldest first.
  pub(crate) fn unsent(&self) -> &[u8] {
    &self.buffer
  }

  pub(crate) fn buffered(&self) -> usize {
    self.buffer.len()
  }

  pub(crate) fn pending(&self) -> usize {
    self.requests.len()
  }

  /// Records that `n` bytes from the head of the buffer were sent, then resolves
  /// every head request whose full byte count has now left the buffer. Returns how
  /// many requests were resolved.
  pub(crate) fn consume(&mut self, n: usize) -> usize {
    debug_assert!(n <= self.buffer.len());
    self.buffer.advance(n);
    self.sent += n;

    let mut resolved = 0;
    while self.requests.front().is_some_and(|head| head.size <= self.sent) {
      let Some(request) = self.requests.pop_front() else { break };
      self.sent -= request.size;
      tracing::trace!(bytes = request.size, remaining = self.buffer.len(), "Write request resolved");
      (request.callback)(Ok(request.size));
      resolved += 1;
    }
    resolved
  }

  /// Resolves every queued request with a copy of `error` and discards unsent bytes.
  pub(crate) fn fail_all(&mut self, error: &SocketError) -> usize {
    let requests = std::mem::take(&mut self.requests);
    self.buffer.clear();
    self.sent = 0;
    let count = requests.len();
    for request in requests {
      (request.callback)(Err(error.replicate()));
    }
    count
  }

  /// Drops every queued request without invoking it and discards unsent bytes.
  pub(crate) fn clear(&mut self) -> usize {
    let count = self.requests.len();
    self.requests.clear();
    self.buffer.clear();
    self.sent = 0;
    count
  }
}
