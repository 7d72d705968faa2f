//! Publish strategy dispatch and trait-data shaping.
//!
//! Each asset kind the host can publish has a [`PublishStrategy`] that
//! knows the trait shape identifying the kind and how to build the
//! metadata payloads for the two publish phases. The [`PublishStrategies`]
//! catalog maps host asset-type tags to strategies and is built once at
//! adapter construction.

mod catalog;
mod strategies;
mod strategy;

pub use catalog::PublishStrategies;
pub use strategy::PublishStrategy;
