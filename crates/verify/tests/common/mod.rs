//! Common test utilities for the verification harness.
//!
//! - [`dataset`] - In-memory copy of the records the scenarios expect
//! - [`stub_server`] - axum server serving that dataset under `/api`

#![allow(dead_code)]

pub mod dataset;
pub mod stub_server;

use swapi_verify::{ClientConfig, SwapiClient};

pub use stub_server::{Behavior, TestServer};

/// Builds a client pointed at a stub server.
pub fn client_for(server: &TestServer) -> SwapiClient {
    SwapiClient::new(ClientConfig::for_testing(server.api_url())).unwrap()
}
