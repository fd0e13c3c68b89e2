//! Test support shared by the chess backend integration test binaries:
//! one-time logging bootstrap, Problem Details assertions and unique
//! account data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
