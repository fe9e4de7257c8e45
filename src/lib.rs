//! License key issuance and verification server.
//!
//! Licenses are created by e-commerce webhooks (`POST /api/licenses`) and
//! verified by client applications at runtime (`POST /api/license/verify`),
//! which binds each license to the first machine that presents it.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod keygen;
pub mod models;
