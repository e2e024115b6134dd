//! Event-driven simulation of elastic collisions among hard discs confined
//! to the unit box.
//!
//! Instead of stepping in fixed time increments, the engine advances exactly
//! to the moment of each physical event: every particle's future collisions
//! (against every other particle and against the four walls) are predicted in
//! closed form and held in a time-ordered priority queue. Predictions made
//! obsolete by a later collision are not removed eagerly; each event carries
//! a snapshot of its participants' collision counters and is discarded
//! lazily, at pop time, when the counters no longer match.
//!
//! The queue is a binary min-heap that can optionally be capped to retain
//! only the N smallest-time entries, and event records are recycled through
//! a free-list pool to avoid allocation churn in the prediction loop.
//!
//! Rendering, input handling, and frame loops are out of scope: consumers
//! drive [`CollisionSystem::update`] with a non-decreasing clock and read the
//! particle snapshot back. Initial layouts come from a particles file
//! ([`io`]) or seeded random placement ([`spawn`]). With the `python`
//! feature the same surface is exposed as a Python extension module.

pub mod core;
pub mod error;
pub mod io;
pub mod spawn;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{CollisionSystem, Particle};
pub use crate::error::{Error, Result};
