extern crate env_logger;
extern crate redbook;

use std::time::Duration;

use redbook::prelude::*;

fn settings(max_frames: Option<u64>) -> Settings {
    let _ = env_logger::try_init();

    let mut settings = Settings::default();
    settings.title = "lifecycle".into();
    settings.shader_root = Some("tests/resources/shaders".into());
    settings.engine = EngineParams {
        max_fps: 0,
        max_frames,
        ..EngineParams::default()
    };
    settings
}

#[derive(Default)]
struct Gouraud {
    program: Option<ProgramHandle>,
    specs: Vec<StageSpec>,
    setups: u32,
    updates: u32,
    renders: u32,
    cleanups: u32,
    events: Vec<Event>,
    shutdown_at: Option<u64>,
    fail_update_at: Option<u32>,
    wireframe: bool,
}

impl Gouraud {
    fn new() -> Self {
        Gouraud {
            specs: vec![
                StageSpec::file(ShaderStage::Vertex, "valid.vert"),
                StageSpec::file(ShaderStage::Fragment, "valid.frag"),
            ],
            ..Gouraud::default()
        }
    }
}

impl Scene for Gouraud {
    fn setup(&mut self, ctx: &mut Context) -> Result<()> {
        self.setups += 1;
        self.program = Some(ctx.build_program(&self.specs)?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context, _: Duration) -> Result<()> {
        self.updates += 1;

        if Some(self.updates) == self.fail_update_at {
            return Err(err_msg("lost the vertex buffer"));
        }

        if Some(ctx.frames() + 1) == self.shutdown_at {
            ctx.shutdown();
        }

        Ok(())
    }

    fn render(&mut self, _: &mut Context) -> Result<()> {
        self.renders += 1;
        Ok(())
    }

    fn on_event(&mut self, _: &mut Context, event: Event) -> Result<()> {
        if event == Event::KeyPressed(Key::Char('M')) {
            self.wireframe = !self.wireframe;
        }

        self.events.push(event);
        Ok(())
    }

    fn cleanup(&mut self, ctx: &mut Context) -> Result<()> {
        self.cleanups += 1;
        if let Some(program) = self.program.take() {
            ctx.delete_program(program)?;
        }

        Ok(())
    }
}

fn err_msg(msg: &'static str) -> Error {
    ::failure::err_msg(msg)
}

#[test]
fn lifecycle() {
    let mut engine = Engine::headless(settings(Some(3)));
    let mut scene = Gouraud::new();

    engine.run(&mut scene).unwrap();

    assert_eq!(scene.setups, 1);
    assert_eq!(scene.updates, 3);
    assert_eq!(scene.renders, 3);
    assert_eq!(scene.cleanups, 1);
    assert_eq!(engine.window().presented(), 3);

    assert_eq!(engine.video().live_programs(), 0);
    assert_eq!(engine.video().live_stages(), 0);
    assert_eq!(engine.video().compiled_stages(), 2);
}

#[test]
fn escape_quits() {
    let window = HeadlessWindow::new()
        .then(vec![])
        .then(vec![
            Event::KeyPressed(Key::Escape),
            Event::KeyReleased(Key::Escape),
        ]);

    let mut engine = Engine::new(settings(Some(10)), window, HeadlessVisitor::new());
    let mut scene = Gouraud::new();
    engine.run(&mut scene).unwrap();

    assert_eq!(scene.renders, 1);
    assert_eq!(scene.cleanups, 1);
    assert_eq!(scene.events, vec![Event::KeyPressed(Key::Escape)]);
    assert_eq!(engine.video().live_programs(), 0);
}

#[test]
fn escape_is_forwarded_when_not_quitting() {
    let mut params = settings(Some(2));
    params.engine.escape_to_quit = false;

    let window = HeadlessWindow::new().then(vec![Event::KeyReleased(Key::Escape)]);
    let mut engine = Engine::new(params, window, HeadlessVisitor::new());
    let mut scene = Gouraud::new();
    engine.run(&mut scene).unwrap();

    assert_eq!(scene.renders, 2);
    assert_eq!(scene.events, vec![Event::KeyReleased(Key::Escape)]);
}

#[test]
fn closing_the_window_stops_the_loop() {
    let window = HeadlessWindow::new()
        .then(vec![])
        .then(vec![])
        .then(vec![Event::Closed]);

    let mut engine = Engine::new(settings(None), window, HeadlessVisitor::new());
    let mut scene = Gouraud::new();
    engine.run(&mut scene).unwrap();

    assert_eq!(scene.updates, 2);
    assert_eq!(scene.cleanups, 1);
    assert_eq!(engine.window().presented(), 2);
    assert!(scene.events.is_empty());
}

#[test]
fn scene_shutdown() {
    let mut engine = Engine::headless(settings(None));
    let mut scene = Gouraud::new();
    scene.shutdown_at = Some(4);

    engine.run(&mut scene).unwrap();

    // The frame that asked for it is still presented.
    assert_eq!(scene.renders, 4);
    assert_eq!(engine.window().presented(), 4);
    assert_eq!(scene.cleanups, 1);
}

#[test]
fn events_reach_the_scene() {
    let window = HeadlessWindow::new()
        .then(vec![Event::KeyPressed(Key::Char('M'))])
        .then(vec![Event::KeyReleased(Key::Char('M'))])
        .then(vec![Event::KeyPressed(Key::Char('M'))]);

    let mut engine = Engine::new(settings(Some(2)), window, HeadlessVisitor::new());
    let mut scene = Gouraud::new();
    engine.run(&mut scene).unwrap();

    assert!(scene.wireframe);
    assert_eq!(
        scene.events,
        vec![
            Event::KeyPressed(Key::Char('M')),
            Event::KeyReleased(Key::Char('M')),
        ]
    );
}

#[test]
fn setup_failure_skips_cleanup() {
    let mut engine = Engine::headless(settings(Some(3)));
    let mut scene = Gouraud::new();
    scene.specs[0] = StageSpec::file(ShaderStage::Vertex, "broken.vert");

    let err = engine.run(&mut scene).unwrap_err();
    let cause = err.downcast_ref::<BuildError>().unwrap();
    assert_eq!(cause.stage_index(), Some(0));

    assert_eq!(scene.setups, 1);
    assert_eq!(scene.updates, 0);
    assert_eq!(scene.cleanups, 0);
    assert_eq!(engine.window().presented(), 0);
    assert_eq!(engine.video().live_programs(), 0);
    assert_eq!(engine.video().live_stages(), 0);
}

#[test]
fn frame_failure_still_cleans_up() {
    let mut engine = Engine::headless(settings(Some(10)));
    let mut scene = Gouraud::new();
    scene.fail_update_at = Some(2);

    let err = engine.run(&mut scene).unwrap_err();
    assert_eq!(format!("{}", err), "lost the vertex buffer");

    assert_eq!(scene.updates, 2);
    assert_eq!(scene.renders, 1);
    assert_eq!(scene.cleanups, 1);
    assert_eq!(engine.video().live_programs(), 0);
}

#[test]
fn without_shader_root() {
    let mut params = settings(Some(1));
    params.shader_root = None;

    let mut engine = Engine::headless(params);
    let mut scene = Gouraud::new();
    assert!(engine.run(&mut scene).is_err());
    assert_eq!(scene.cleanups, 0);
}
