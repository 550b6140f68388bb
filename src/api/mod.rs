//! HTTP API for the dashboard.

pub mod handlers;
pub mod server;

pub use server::run;
