//! Analysis module for reading trends
//!
//! This module provides:
//! - Ordinary least-squares line fitting over the rolling history
//! - Pearson correlation of the fit

pub mod regression;

pub use regression::LinearFit;
