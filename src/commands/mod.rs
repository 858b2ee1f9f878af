//! Command handlers for svcat
//!
//! This module contains implementations for the describe commands:
//! - `describe_class`: Show a class, its plans and optionally its broker
//! - `describe_plan`: Show a plan, its instances and optionally its class and broker
//!
//! Commands write sections as soon as each lookup returns, so a failing
//! lookup leaves the earlier sections on the writer.

pub mod describe_class;
pub mod describe_plan;
