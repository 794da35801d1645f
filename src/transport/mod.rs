// src/transport/mod.rs

pub mod endpoint;

pub use endpoint::Endpoint;
