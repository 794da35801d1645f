// src/transport/endpoint.rs

use crate::error::SocketError;
use socket2::{Domain, SockAddr};
use std::net::{IpAddr, SocketAddr};
#[cfg(feature = "ipc")]
use std::path::{Path, PathBuf};

/// Represents a parsed and validated endpoint address.
///
/// Opaque to the socket core: `bind` and `connect` only ever ask for its
/// [`Domain`] and its OS-level address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
  Tcp(SocketAddr),
  #[cfg(feature = "ipc")]
  Ipc(PathBuf),
}

impl Endpoint {
  /// Builds a TCP endpoint from a textual IP address and a port.
  pub fn new(address: &str, port: u16) -> Result<Self, SocketError> {
    let ip = address.parse::<IpAddr>().map_err(|_| {
      tracing::debug!("Failed to parse IP address: {}", address);
      SocketError::InvalidEndpoint(address.to_string())
    })?;
    Ok(Endpoint::Tcp(SocketAddr::new(ip, port)))
  }

  /// Builds a Unix-domain endpoint for the given filesystem path.
  #[cfg(feature = "ipc")]
  pub fn ipc(path: impl AsRef<Path>) -> Result<Self, SocketError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
      return Err(SocketError::InvalidEndpoint(path.display().to_string()));
    }
    Ok(Endpoint::Ipc(path.to_path_buf()))
  }

  /// Parses an endpoint URI such as `tcp://127.0.0.1:5555` or `ipc:///tmp/sock`.
  pub fn parse(endpoint_str: &str) -> Result<Self, SocketError> {
    let invalid_endpoint_err = || SocketError::InvalidEndpoint(endpoint_str.to_string());

    let (scheme, address_part) = endpoint_str.split_once("://").ok_or_else(invalid_endpoint_err)?;
    match scheme {
      "tcp" => address_part
        .parse::<SocketAddr>()
        .map(Endpoint::Tcp)
        .map_err(|_| {
          tracing::debug!("Failed to parse TCP address: {}", address_part);
          invalid_endpoint_err()
        }),

      #[cfg(feature = "ipc")]
      "ipc" => {
        if address_part.is_empty() || address_part.contains('\0') {
          Err(invalid_endpoint_err())
        } else {
          Ok(Endpoint::Ipc(PathBuf::from(address_part)))
        }
      }

      _ => Err(SocketError::UnsupportedTransport(endpoint_str.to_string())),
    }
  }

  /// The address family a socket must be opened with to use this endpoint.
  pub fn domain(&self) -> Domain {
    match self {
      Endpoint::Tcp(SocketAddr::V4(_)) => Domain::IPV4,
      Endpoint::Tcp(SocketAddr::V6(_)) => Domain::IPV6,
      #[cfg(feature = "ipc")]
      Endpoint::Ipc(_) => Domain::UNIX,
    }
  }

  /// Converts into the OS-level address structure.
  pub fn to_sock_addr(&self) -> Result<SockAddr, SocketError> {
    match self {
      Endpoint::Tcp(addr) => Ok(SockAddr::from(*addr)),
      #[cfg(feature = "ipc")]
      Endpoint::Ipc(path) => SockAddr::unix(path).map_err(SocketError::from),
    }
  }
}

impl From<SocketAddr> for Endpoint {
  fn from(addr: SocketAddr) -> Self {
    Endpoint::Tcp(addr)
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Endpoint::Tcp(addr) => write!(f, "tcp://{}", addr),
      #[cfg(feature = "ipc")]
      Endpoint::Ipc(path) => write!(f, "ipc://{}", path.display()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_builds_tcp_endpoint() {
    let ep = Endpoint::new("127.0.0.1", 8080).unwrap();
    assert_eq!(ep, Endpoint::Tcp("127.0.0.1:8080".parse().unwrap()));
    assert_eq!(ep.domain(), Domain::IPV4);

    let ep6 = Endpoint::new("::1", 9000).unwrap();
    assert_eq!(ep6.domain(), Domain::IPV6);
  }

  #[test]
  fn new_rejects_hostnames() {
    assert!(matches!(
      Endpoint::new("localhost", 80),
      Err(SocketError::InvalidEndpoint(s)) if s == "localhost"
    ));
  }

  #[test]
  fn parse_tcp_uri() {
    let ep = Endpoint::parse("tcp://10.0.0.1:5555").unwrap();
    assert_eq!(ep, Endpoint::Tcp("10.0.0.1:5555".parse().unwrap()));
    assert_eq!(ep.to_string(), "tcp://10.0.0.1:5555");
    let addr = ep.to_sock_addr().unwrap();
    assert_eq!(addr.as_socket(), Some("10.0.0.1:5555".parse().unwrap()));
  }

  #[test]
  fn parse_rejects_bad_input() {
    assert!(matches!(Endpoint::parse("10.0.0.1:5555"), Err(SocketError::InvalidEndpoint(_))));
    assert!(matches!(Endpoint::parse("tcp://nope"), Err(SocketError::InvalidEndpoint(_))));
    assert!(matches!(
      Endpoint::parse("udp://10.0.0.1:5555"),
      Err(SocketError::UnsupportedTransport(_))
    ));
  }

  #[cfg(feature = "ipc")]
  #[test]
  fn parse_ipc_uri() {
    let ep = Endpoint::parse("ipc:///tmp/edgesock.sock").unwrap();
    assert_eq!(ep, Endpoint::Ipc(PathBuf::from("/tmp/edgesock.sock")));
    assert_eq!(ep.domain(), Domain::UNIX);
    assert!(Endpoint::parse("ipc://").is_err());
    assert!(Endpoint::ipc("").is_err());
  }
}
