//! Core engine types: card instance ids, RNG, configuration.
//!
//! These are the leaf building blocks every other module depends on.

pub mod config;
pub mod entity;
pub mod rng;

pub use config::{scale_rounded, CombatConfig, FallbackEffects};
pub use entity::{CardInstanceAllocator, CardInstanceId};
pub use rng::GameRng;
