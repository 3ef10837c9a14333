use fnv::FnvHashMap;
use glam::Vec2;
use starfield_core::{StarField, Viewport};
use starfield_render::GpuState;
use std::time::{SystemTime, UNIX_EPOCH};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

/// Wall-clock milliseconds, the same time base the browser loop uses.
fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

fn logical_point(p: PhysicalPosition<f64>, scale: f64) -> Vec2 {
    let l = p.to_logical::<f32>(scale);
    Vec2::new(l.x, l.y)
}

fn logical_viewport(size: PhysicalSize<u32>, scale: f64) -> anyhow::Result<Viewport> {
    let l = size.to_logical::<f32>(scale);
    Ok(Viewport::new(l.width, l.height)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Starfield")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let scale = window.scale_factor();
    let viewport = logical_viewport(window.inner_size(), scale)?;
    let mut field = StarField::create(viewport.width(), viewport.height())?;
    let window = &window;
    let mut gpu = pollster::block_on(GpuState::new(window, viewport, scale as f32, field.scene()))?;

    // Active touch points by id, in logical pixels
    let mut touches: FnvHashMap<u64, Vec2> = FnvHashMap::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CursorMoved { position, .. } => {
                field.pointer_move(logical_point(position, window.scale_factor()));
            }
            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                match phase {
                    TouchPhase::Started | TouchPhase::Moved => {
                        touches.insert(id, logical_point(location, window.scale_factor()));
                        let points: Vec<Vec2> = touches.values().copied().collect();
                        field.touch(&points);
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        touches.remove(&id);
                    }
                }
            }
            WindowEvent::Resized(size) => {
                let scale = window.scale_factor();
                match logical_viewport(size, scale) {
                    Ok(viewport) => {
                        gpu.set_pixel_ratio(scale as f32);
                        field.resize(viewport, &mut gpu);
                    }
                    // Minimized windows report 0x0
                    Err(e) => log::warn!("[resize] ignored: {}", e),
                }
            }
            WindowEvent::CloseRequested => {
                field.dispose();
                elwt.exit();
            }
            _ => {}
        },
        Event::AboutToWait => {
            if !field.is_running() {
                elwt.exit();
                return;
            }
            match field.frame(now_ms(), &mut gpu) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[frame] out of GPU memory");
                    field.dispose();
                    elwt.exit();
                    return;
                }
                Err(e) => log::error!("[frame] render error: {:?}", e),
            }
            window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
