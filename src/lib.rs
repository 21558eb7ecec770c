//! # redbook
//!
//! A thin harness for the OpenGL Programming Guide examples. The interesting part lives in
//! [`video`]: a `ProgramBuilder` that compiles an ordered list of shader stages, links them
//! into a single program and never leaks a native object on the way, no matter which step
//! fails.
//!
//! ```rust,ignore
//! use redbook::prelude::*;
//!
//! let specs = [
//!     StageSpec::file(ShaderStage::Vertex, "gouraud.vert"),
//!     StageSpec::file(ShaderStage::Fragment, "gouraud.frag"),
//! ];
//!
//! let program = ProgramBuilder::new()
//!     .with_root("assets/04")
//!     .build(&mut visitor, &specs)?;
//! ```
//!
//! Examples implement [`application::Scene`] and keep their programs, buffers and vertex
//! arrays as fields, instead of module level globals. The [`application::Engine`] runs the
//! scene against any [`application::window::Window`] implementation; windowing itself is left
//! to the caller.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[macro_use]
pub mod errors;

pub mod application;
pub mod prelude;
pub mod video;
