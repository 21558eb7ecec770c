//! The backend of the video module, which should be responsible for only one thing: talking
//! to the native graphics API about program and shader objects.

pub mod headless;

use std::ffi::CStr;

use super::assets::prelude::*;
use super::errors::*;

/// The narrow view of a graphics context the program builder needs.
///
/// Implementations are bound to the thread that owns the native context. Nothing here is
/// synchronized; callers serialize access themselves.
pub trait Visitor {
    /// Creates an empty program object.
    fn create_program(&mut self) -> Result<Option<ProgramHandle>>;

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()>;

    /// Creates a stage object, returns `None` if the driver hands out the null object.
    fn create_stage(&mut self, stage: ShaderStage) -> Result<Option<StageHandle>>;

    fn delete_stage(&mut self, handle: StageHandle) -> Result<()>;

    /// Replaces the source of `handle` and requests its compilation.
    fn compile_stage(&mut self, handle: StageHandle, source: &CStr) -> Result<()>;

    fn stage_compiled(&mut self, handle: StageHandle) -> Result<bool>;

    /// Returns the info log of the last compilation of `handle`.
    fn stage_log(&mut self, handle: StageHandle) -> Result<String>;

    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) -> Result<()>;

    fn set_separable(&mut self, program: ProgramHandle, separable: bool) -> Result<()>;

    fn link_program(&mut self, program: ProgramHandle) -> Result<()>;

    fn program_linked(&mut self, program: ProgramHandle) -> Result<bool>;

    /// Returns the info log of the last link of `program`.
    fn program_log(&mut self, program: ProgramHandle) -> Result<String>;

    /// Returns true if stages of this kind could be created on this context.
    fn supports(&self, stage: ShaderStage) -> bool;

    fn supports_separable(&self) -> bool;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;
