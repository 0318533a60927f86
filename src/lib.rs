#![forbid(unsafe_code)]
//! Computes the carbon footprint of an organization from its energy usage,
//! waste production and business travel.
//!
//! The [`Calculator`] maps a validated [`UsageInput`] to an [`EmissionResult`].
//! Gathering the input ([`collect`]) and rendering the result ([`report`]) are
//! kept apart from it.
pub mod advice;
pub mod collect;
pub(crate) mod csv;
mod engine;
mod factors;
mod input;
mod model;
#[cfg(feature = "report")]
pub mod report;
mod result;

pub use engine::*;
pub use factors::*;
pub use input::*;
pub use model::*;
pub use result::*;
