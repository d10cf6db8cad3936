//! Algorithm runners.

pub mod vqe;

pub use vqe::{VqeResult, VqeRunner, provider_for, sampler_seed};
