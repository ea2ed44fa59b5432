//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: shared test utilities
//! - `precedence`: layer precedence tests
//! - `environment`: environment variable mapping tests

mod helpers;
