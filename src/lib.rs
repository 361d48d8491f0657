pub mod config;
pub mod corpus;
pub mod digest;
pub mod errors;
pub mod extraction;
pub mod index;
pub mod metrics;
pub mod pipeline;
pub mod resolution;
pub mod types;
pub mod validation;
