//! Host side of the post client: real HTTP, terminal I/O, configuration.
//!
//! # Design
//! `post-core` never touches the network. This crate supplies the
//! `Transport` (reqwest), turns command-line flags into a `Config`, and runs
//! either a one-shot submission or an interactive prompt loop over any
//! async reader/writer pair, so tests can drive it without a terminal.

pub mod config;
pub mod render;
pub mod session;
pub mod transport;

pub use config::{Config, Mode};
pub use transport::ReqwestTransport;
