//! Hand-landmark gesture recognition: per-frame pose and swipe classification
//! plus temporal debouncing into discrete gesture events.

pub mod actions;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod motion;
pub mod pipeline;
pub mod recording;
pub mod stabilizer;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use actions::{ActionBindings, ActionDispatcher, LogDispatcher, MediaAction};
pub use classifier::GestureClassifier;
pub use config::{AppConfig, ConfigError, GestureConfig};
pub use engine::GestureEngine;
pub use types::{FingerState, GestureEvent, GestureLabel, HandObservation, Handedness, Landmark};
