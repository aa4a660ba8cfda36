//! API Module
//!
//! HTTP transport around the core: transaction submission, balance and
//! history queries, simulation lifecycle and audit introspection.

mod server;

pub use server::Server;
