//! A minimal application model for the examples.
//!
//! ## Scene
//!
//! Every example is a `Scene`: it sets its programs and buffers up once, updates and renders
//! them every frame and releases them once at the end. State that the examples used to keep
//! in globals becomes fields of the scene.
//!
//! ## Engine
//!
//! `Engine` is where we actually run the frame loop and fire the `Scene` hooks. Windowing is
//! not part of it: any `Window` implementation could be plugged in, and `HeadlessWindow`
//! serves tests and batch runs.

pub mod events;
pub mod settings;
pub mod time;
pub mod window;

mod engine;
mod scene;

pub use self::engine::Engine;
pub use self::events::{Event, Key};
pub use self::scene::{Context, Scene};
pub use self::settings::{EngineParams, Settings};

pub mod prelude {
    pub use super::window::{HeadlessWindow, Window};
    pub use super::{Context, Engine, EngineParams, Event, Key, Scene, Settings};
}
