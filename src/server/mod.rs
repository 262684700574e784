//! HTTP transport for the director.
//!
//! Decodes and validates observation payloads, hands them to the shared
//! [`Director`](crate::director::Director) and returns its instructions as
//! JSON.
//!
//! # Endpoints
//!
//! - `GET  /health`   — Liveness probe
//! - `POST /analyze`  — Stateful observation (default session)
//! - `POST /evaluate` — Stateless decision from a caller snapshot
//! - `/sessions/...`  — Per-session profiles

pub mod payload;
pub mod routes;

pub use routes::{app_router, AppState};
