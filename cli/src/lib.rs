//! Terminal host for the board client.
//!
//! Supplies everything the sans-IO core leaves out: configuration, a ureq
//! transport, the confirmation prompt, text rendering and the input loop.

pub mod args;
pub mod error;
pub mod oneshot;
pub mod render;
pub mod session;
pub mod transport;

pub use error::CliError;
pub use session::Session;
pub use transport::UreqTransport;
