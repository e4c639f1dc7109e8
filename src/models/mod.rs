//! Database models shared across the repository layer.

pub mod appointment;
#[cfg(feature = "server")]
pub mod auth;
pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod customer;
pub mod error_log;
pub mod job;
pub mod technician;
pub mod transaction;
pub mod vehicle;
