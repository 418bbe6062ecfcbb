//! Type definitions for the churn prediction pipeline

pub mod customer;
pub mod prediction;
