//! Pawshaven: pet shelter listing service.
//!
//! - [`store`] - pet record persistence (JSON file, SQLite, memory, remote table)
//! - [`validation`] - input sanitization and validation
//! - [`adoption`] - adoption application intake
//! - [`http`] - the REST API
//! - [`catalog`] - client-side filtering, favorites, and an API client
//! - [`config`] - layered configuration

pub mod adoption;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod http;
pub mod logging;
pub mod model;
pub mod paths;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
