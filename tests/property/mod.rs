//! Property-based tests

pub mod grouping_proptest;
pub mod metrics_proptest;
pub mod observation_proptest;
pub mod resolver_proptest;
