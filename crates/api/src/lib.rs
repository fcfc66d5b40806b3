//! HTTP API: server wiring, routing, and request/response mapping for order
//! processing.

pub mod app;
pub mod config;
pub mod middleware;
