use anyhow::Context;
use waves_core::{AnimationState, Bounds, FrameClock, RecordingSurface, WaveNoise, WavesConfig};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

mod color;
mod gpu;

/// `waves-native [options.json]`: the JSON file uses the same camelCase keys
/// as the web options object.
fn load_config(path: Option<String>) -> anyhow::Result<WavesConfig> {
    let Some(path) = path else {
        return Ok(WavesConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let config = WavesConfig::from_json(&json).with_context(|| format!("parsing {}", path))?;
    log::info!("loaded options from {}", path);
    Ok(config)
}

fn bounds_of(size: winit::dpi::PhysicalSize<u32>) -> Bounds {
    Bounds::sized(size.width as f32, size.height as f32)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = load_config(std::env::args().nth(1))?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    let window = WindowBuilder::new()
        .with_title("Waves (native)")
        .build(&event_loop)
        .map_err(|e| anyhow::anyhow!("window: {e}"))?;

    let mut gpu = pollster::block_on(gpu::GpuState::new(&window, &config))?;
    let noise = WaveNoise::from_entropy();
    log::info!("waves-native starting (seed {})", noise.seed());
    let mut state = AnimationState::new(config, noise);
    state.resize(bounds_of(window.inner_size()));
    let mut surface = RecordingSurface::new();
    let mut clock = FrameClock::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    gpu.resize(size);
                    state.resize(bounds_of(size));
                }
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::CursorMoved { position, .. } => {
                    state.pointer_moved(position.x as f32, position.y as f32, 0.0);
                }
                WindowEvent::Touch(Touch {
                    phase: TouchPhase::Started | TouchPhase::Moved,
                    location,
                    ..
                }) => {
                    state.pointer_moved(location.x as f32, location.y as f32, 0.0);
                }
                WindowEvent::RedrawRequested => {
                    state.frame(clock.elapsed_ms(), &mut surface);
                    clock.frame();
                    match gpu.render(&surface) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("render error: out of memory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("render error: {:?}", e),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => gpu.window().request_redraw(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("event loop: {e}"))
}
