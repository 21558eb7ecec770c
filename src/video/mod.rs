//! Shader program creation on top of a narrow graphics-context seam.
//!
//! # Programs
//!
//! A program is built from an ordered list of `StageSpec`s. Each stage is created, fed with
//! its source, compiled and attached; after the last one the program is linked. The first
//! failure stops the build and is reported with the verbatim compiler or linker log.
//!
//! Stage objects never outlive a single build: they are released right after linking, or on
//! the way out of a failed build. A failed build also releases the program object, so the
//! caller either receives a usable `ProgramHandle` or nothing at all.
//!
//! # Backends
//!
//! Every native call goes through the `Visitor` trait. `GLVisitor` talks to a real OpenGL
//! context, while `HeadlessVisitor` simulates one and keeps track of live objects, which
//! makes it handy for headless runs and leak tests.

pub mod assets;
pub mod backends;
pub mod errors;

mod program;
pub use self::program::ProgramBuilder;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::headless::HeadlessVisitor;
    pub use super::backends::Visitor;
    pub use super::errors::BuildError;
    pub use super::ProgramBuilder;
}
