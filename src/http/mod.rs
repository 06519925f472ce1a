//! HTTP transport
//!
//! The narrow boundary between the fetch engine and the network: one
//! GET in, status and body out. The engine only ever sees the
//! `Transport` trait, so tests can script responses without a server.

mod rate_limit;
mod transport;

pub use rate_limit::{PacerConfig, RequestPacer};
pub use transport::{HttpTransport, HttpTransportConfig, Transport, TransportResponse};
