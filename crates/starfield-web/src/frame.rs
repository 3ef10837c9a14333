use crate::dom;
use starfield_core::{Camera, SceneRenderer, StarField, StarScene, Viewport};
use starfield_render::GpuState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// GPU renderer that also owns the canvas backing size.
pub struct CanvasRenderer {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState<'static>,
}

impl SceneRenderer for CanvasRenderer {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, viewport: Viewport) {
        // The GPU clamps to its texture limit; the canvas follows it
        self.gpu.resize(viewport);
        dom::sync_canvas_backing_size(&self.canvas, self.gpu.size());
    }

    fn render(&mut self, scene: &StarScene, camera: &Camera) -> Result<(), Self::Error> {
        self.gpu.render(scene, camera)
    }
}

/// Everything a mounted field mutates from DOM and animation callbacks.
pub struct App {
    pub field: StarField,
    pub renderer: CanvasRenderer,
}

impl App {
    pub fn frame(&mut self, now_ms: f64) {
        if let Err(e) = self.field.frame(now_ms, &mut self.renderer) {
            log::error!("[frame] render error: {:?}", e);
        }
    }

    pub fn resize(&mut self, viewport: Viewport, pixel_ratio: f32) {
        self.renderer.gpu.set_pixel_ratio(pixel_ratio);
        self.field.resize(viewport, &mut self.renderer);
    }
}

/// requestAnimationFrame loop driving one [`App`].
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    /// Each tick checks the field's cancel token, schedules the next frame,
    /// then advances and draws.
    pub fn start(app: Rc<RefCell<App>>) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let cancel = app.borrow().field.cancel_token();

        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if cancel.is_cancelled() {
                return;
            }
            pending_tick.set(request_frame(&tick_clone));
            app.borrow_mut().frame(js_sys::Date::now());
        }) as Box<dyn FnMut()>));

        pending.set(request_frame(&tick));
        Self { pending, tick }
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}
