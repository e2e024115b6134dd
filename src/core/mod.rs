//! Core event-driven collision engine.
//!
//! Leaf-first: a bounded binary min-heap over events, a free-list event
//! pool, the particle collision math, and the [`CollisionSystem`] that owns
//! all of them and advances simulation time from event to event.

pub mod event;
pub mod heap;
pub mod particle;
pub mod pool;
pub mod sim;

pub use event::{Event, Participant};
pub use heap::BinaryMinHeap;
pub use particle::Particle;
pub use pool::EventPool;
pub use sim::CollisionSystem;
