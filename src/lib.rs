//! medboard - read-only HTTP analytics over a patient records table
//!
//! - `GET /patients` lists records, optionally filtered by condition
//! - `GET /analytics/disease_probabilities` computes the condition distribution
//! - `GET /dashboard` renders records as an HTML table
//! - `GET /health` reports liveness

pub mod analytics;
pub mod cli;
pub mod dashboard;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
