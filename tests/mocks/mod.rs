//! Mock implementations for testing without a cluster.
//!
//! This module provides an in-memory `ServiceCatalog` backed by fixed
//! resources, with call recording and per-lookup failure injection.

pub mod catalog;

pub use catalog::*;
