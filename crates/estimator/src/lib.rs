//! Cost estimation library for lakehouse data platforms
//!
//! This crate provides the pricing core for:
//! - Job compute (DBU and instance) costs per tier
//! - S3 storage costs by direct sizing or table-based sizing
//! - SQL warehouse costs
//! - Aggregation and 12-month growth projection
//!
//! Calculators are pure functions over a [`Workload`] and a [`RateCard`].

pub mod calculator;
pub mod error;
pub mod models;
pub mod observability;
pub mod rates;
pub mod workload;

pub use calculator::{estimate, Estimate};
pub use error::{WorkloadError, WorkloadResult};
pub use models::*;
pub use observability::EstimateLogger;
pub use rates::RateCard;
