//! Trait payload data model for kassetio.
//!
//! Defines the types exchanged between the host adapter and asset-management
//! backends:
//! - [`TraitsData`] — an ordered bundle of traits-with-properties
//! - [`TraitPropertyValue`] — the primitive value types a trait property holds
//! - [`mediacreation`] / [`katana`] — the trait vocabulary as typed views
//!   over [`TraitsData`]
//! - [`specifications`] — fixed trait-set shapes describing whole entity
//!   kinds (work file, bitmap image, scene lighting, ...)
//!
//! A *trait* is a named, typed metadata facet attachable to an entity
//! description (e.g. `DisplayName`, `LocatableContent`). Backends advertise
//! and consume entity metadata exclusively through these payloads.

mod data;

pub mod katana;
pub mod mediacreation;
pub mod specifications;

pub use data::{TraitId, TraitPropertyValue, TraitSet, TraitsData};
