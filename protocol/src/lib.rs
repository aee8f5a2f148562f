//! Wire types for the SnapVault REST API
//!
//! - `common`: records returned by the backend
//! - `api`: request payloads sent by the client

pub mod api;
pub mod common;
