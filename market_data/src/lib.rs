//! Vendor-agnostic market data access.
//!
//! This crate defines the canonical daily-bar models, the universal request
//! parameters, and the async [`DataProvider`](providers::DataProvider) trait,
//! together with a concrete provider for Yahoo Finance's chart REST API.

pub mod models;
pub mod providers;
