//! Consultant workload saturation for the workshop consulting platform.
//!
//! Two independent models live side by side:
//!   - capacity model: active load over (available hours x productivity)
//!   - real model:     forecast hours over a fixed 40h week, plus a flat
//!                     surcharge per overdue item
//!
//! They answer different questions for different screens and are never
//! reconciled into one formula. Everything here is pure computation over
//! data the caller already fetched; only `store` touches a database.

pub mod calculator;
pub mod capacity;
pub mod capacity_model;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ranking;
pub mod real_model;
pub mod refresh;
pub mod store;
pub mod types;
pub mod work_item;
