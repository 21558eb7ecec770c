use std::time::Duration;

use crate::errors::*;
use crate::video::assets::prelude::*;
use crate::video::backends::Visitor;
use crate::video::errors::{BuildError, Result as VideoResult};
use crate::video::ProgramBuilder;

use super::events::Event;

/// `Scene` is what an example implements. Its programs, buffers and vertex arrays live in
/// its own fields; the engine calls the hooks below in a fixed order.
pub trait Scene {
    /// Called once before the first frame. Anything created here should be released in
    /// `cleanup`. When `setup` fails, `cleanup` is not called.
    fn setup(&mut self, ctx: &mut Context) -> Result<()>;

    /// Called every frame with the duration of the previous one.
    fn update(&mut self, _: &mut Context, _: Duration) -> Result<()> {
        Ok(())
    }

    /// Called every frame after `update`.
    fn render(&mut self, _: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Receives the window events the engine does not handle itself.
    fn on_event(&mut self, _: &mut Context, _: Event) -> Result<()> {
        Ok(())
    }

    /// Called once after the last frame.
    fn cleanup(&mut self, ctx: &mut Context) -> Result<()>;
}

/// What a scene gets to see of the engine.
pub struct Context<'a> {
    pub(crate) video: &'a mut dyn Visitor,
    pub(crate) builder: &'a ProgramBuilder,
    pub(crate) frames: u64,
    pub(crate) shutdown: bool,
}

impl<'a> Context<'a> {
    #[inline]
    pub fn video(&mut self) -> &mut dyn Visitor {
        &mut *self.video
    }

    /// The builder configured by the engine settings, e.g. with the shader root applied.
    #[inline]
    pub fn builder(&self) -> &ProgramBuilder {
        self.builder
    }

    /// Builds a program with the engine's builder.
    pub fn build_program(&mut self, specs: &[StageSpec]) -> ::std::result::Result<ProgramHandle, BuildError> {
        self.builder.build(&mut *self.video, specs)
    }

    pub fn delete_program(&mut self, handle: ProgramHandle) -> VideoResult<()> {
        self.video.delete_program(handle)
    }

    /// Stops the engine before the next frame.
    #[inline]
    pub fn shutdown(&mut self) {
        self.shutdown = true;
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
