use crate::errors::*;
use crate::video::backends::headless::HeadlessVisitor;
use crate::video::backends::Visitor;
use crate::video::ProgramBuilder;

use super::events::{Event, Key};
use super::scene::{Context, Scene};
use super::settings::{EngineParams, Settings};
use super::time::Clock;
use super::window::{HeadlessWindow, Window};

/// `Engine` runs a `Scene`. It owns the window and the graphics context the scene renders
/// into, and takes care of trivial tasks like the execution order and frame pacing.
pub struct Engine<W = HeadlessWindow, V = HeadlessVisitor> {
    settings: Settings,
    builder: ProgramBuilder,
    window: W,
    video: V,
}

impl Engine<HeadlessWindow, HeadlessVisitor> {
    /// An engine without a window nor a GPU. Set `max_frames`, or have the scene shut the
    /// engine down, unless it is meant to run forever.
    pub fn headless(settings: Settings) -> Self {
        Engine::new(settings, HeadlessWindow::new(), HeadlessVisitor::new())
    }
}

impl<W: Window, V: Visitor> Engine<W, V> {
    pub fn new(settings: Settings, window: W, video: V) -> Self {
        let mut builder = ProgramBuilder::new();
        if let Some(ref root) = settings.shader_root {
            builder = builder.with_root(root.clone());
        }

        Engine {
            settings,
            builder,
            window,
            video,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn window(&self) -> &W {
        &self.window
    }

    #[inline]
    pub fn video(&self) -> &V {
        &self.video
    }

    #[inline]
    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    /// Runs the frame loop of `scene`, this will block the working thread until the window
    /// is closed, the scene shuts the engine down or `max_frames` frames are presented.
    ///
    /// `cleanup` runs whenever `setup` succeeded, even if a frame failed; the error of the
    /// frame is the one returned then.
    pub fn run<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<()> {
        info!("Running {}.", self.settings.title);

        let mut clock = Clock::new(&self.settings.engine);
        let mut ctx = Context {
            video: &mut self.video,
            builder: &self.builder,
            frames: 0,
            shutdown: false,
        };

        scene.setup(&mut ctx)?;

        let result = Self::execute(
            &mut self.window,
            &self.settings.engine,
            &mut clock,
            &mut ctx,
            scene,
        );

        if let Err(ref err) = result {
            warn!("{} stopped at frame {}: {}", self.settings.title, ctx.frames, err);
        }

        let cleanup = scene.cleanup(&mut ctx);
        info!("Stopped {} after {} frame(s).", self.settings.title, ctx.frames);
        result.and(cleanup)
    }

    fn execute<S: Scene + ?Sized>(
        window: &mut W,
        params: &EngineParams,
        clock: &mut Clock,
        ctx: &mut Context,
        scene: &mut S,
    ) -> Result<()> {
        let mut events = Vec::new();

        loop {
            if let Some(max) = params.max_frames {
                if ctx.frames >= max {
                    return Ok(());
                }
            }

            let dt = clock.advance();

            events.clear();
            window.poll_events(&mut events);

            for &v in &events {
                match v {
                    Event::Closed => ctx.shutdown(),
                    Event::KeyReleased(Key::Escape) if params.escape_to_quit => ctx.shutdown(),
                    _ => scene.on_event(ctx, v)?,
                }
            }

            if ctx.is_shutdown() {
                return Ok(());
            }

            scene.update(ctx, dt)?;
            scene.render(ctx)?;
            window.swap_buffers()?;
            ctx.frames += 1;
        }
    }
}
