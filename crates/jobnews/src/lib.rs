//! Job and news search gateway.
//!
//! Each search domain either calls its configured provider and normalizes the
//! payload into canonical records, or serves deterministic mock data when no
//! provider key is configured.

pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod search;
pub mod telemetry;
