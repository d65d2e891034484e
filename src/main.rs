#[macro_use]
extern crate log;

use anyhow::Context;
use cubeview::camera::Camera;
use cubeview::clock::FrameClock;
use cubeview::config::SceneConfig;
use cubeview::scene::{GraphicsInitError, SceneRenderer};
use cubeview::session::Session;
use cubeview::texture::TextureSet;
use std::path::Path;

const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 600.0;
const CONFIG_PATH: &str = "cubeview.json";

fn main() {
    pretty_env_logger::init();

    if let Err(error) = run() {
        error!("{:#}", error);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    use glium::glutin;
    use glium::Surface;

    let config =
        SceneConfig::load(Path::new(CONFIG_PATH)).context("loading the scene configuration")?;

    let event_loop = glutin::event_loop::EventLoop::new();
    let window = glutin::window::WindowBuilder::new()
        .with_title("Cubeview")
        .with_inner_size(glutin::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(false);
    let context = glutin::ContextBuilder::new()
        .with_depth_buffer(24)
        .with_vsync(true);
    let display = glium::Display::new(window, context, &event_loop)
        .map_err(GraphicsInitError::from)
        .context("creating the window and GL context")?;

    let renderer = SceneRenderer::new(&display).context("building the scene renderer")?;
    let mut textures = TextureSet::load(&display, &config.texture_paths())
        .context("loading the face textures")?;
    info!("loaded {} face textures", textures.len());

    let mut session = Session::new(&config);
    let mut clock = FrameClock::new();
    let camera = Camera::new();
    let reload_every_frame = config.reload_textures_every_frame;
    if reload_every_frame {
        warn!("debug texture reload is on; every frame re-uploads all faces");
    }

    event_loop.run(move |event, _, control_flow| {
        use glutin::event::{Event, StartCause, WindowEvent};
        use glutin::event_loop::ControlFlow;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput { input, .. } => {
                    if let Some(key) = input.virtual_keycode {
                        session.key_event(input.state, key);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    session.pointer_moved(position.x, position.y);
                }
                _ => (),
            },
            Event::NewEvents(StartCause::Init)
            | Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                session.advance_frame();

                if reload_every_frame {
                    if let Err(error) = textures.reload(&display) {
                        warn!("texture reload failed, keeping the previous set: {}", error);
                    }
                }

                let mut frame = display.draw();
                let frame_size = frame.get_dimensions();
                let aspect_ratio = frame_size.0 as f32 / frame_size.1 as f32;
                let frustum = camera.frustum(aspect_ratio);

                frame.clear_color_and_depth((0.0, 0.0, 0.0, 1.0), 1.0);
                renderer.draw(
                    &mut frame,
                    &frustum,
                    camera.eye(),
                    &session.pose,
                    session.pointer,
                    session.spin_deg,
                    session.light_config(),
                    &textures,
                );
                frame.finish().expect("could not present the frame");

                let frame_count = clock.next_frame();
                if frame_count % 300 == 0 {
                    debug!(
                        "frame {} took {:.1} ms",
                        frame_count,
                        clock.previous_frame_seconds() * 1e3
                    );
                }

                *control_flow = ControlFlow::WaitUntil(clock.deadline());
            }
            _ => (),
        }
    })
}
