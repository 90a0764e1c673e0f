//! Mathematical utilities: least squares lines and correlation.

pub mod ols;

pub use ols::*;
