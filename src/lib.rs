//! Multi-touch gesture recognition over per-finger contact samples.
//!
//! Samples are collected in a [`buffer::TouchEventBuffer`], evaluated by the
//! [`detectors`] in priority order, and turned into begin/update/end
//! lifecycle events by the [`recognizer::GestureRecognizer`].

pub mod buffer;
pub mod config;
pub mod detectors;
pub mod device;
pub mod driver;
pub mod geometry;
pub mod gesture;
pub mod parser;
pub mod recognizer;
pub mod types;

pub use config::{ConfigError, GestureConfig};
pub use gesture::{Gesture, LifecycleEvent, LifecycleTag};
pub use recognizer::{GestureRecognizer, TickEvents, TickInput};
pub use types::{FingerId, Point, TouchSample, TouchStatus};
