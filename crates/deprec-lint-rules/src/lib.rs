#![forbid(unsafe_code)]

pub mod corrector;
pub mod engine;
pub mod lifecycle;

pub use engine::{Rule, RuleEngine, RuleRunSettings};

#[cfg(test)]
pub(crate) mod testutil;
