//! HTTP inbound adapter: actix handlers over the driving ports.

pub mod auth;
pub mod error;
pub mod health;
pub mod library;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;
