//! Wire types and domain vocabulary shared by the scoring panel crates.

pub mod domain;
pub mod error;
pub mod protocol;

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
