#![cfg(target_arch = "wasm32")]
use starfield_core::StarField;
use starfield_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;

use events::Listeners;
use frame::{App, CanvasRenderer, FrameLoop};

const AUTO_MOUNT_ID: &str = "starfield";

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<StarFieldHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    let has_mount = dom::window_document()
        .and_then(|d| d.get_element_by_id(AUTO_MOUNT_ID))
        .is_some();
    if has_mount {
        spawn_local(async move {
            match init(AUTO_MOUNT_ID).await {
                Ok(handle) => AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(handle)),
                Err(e) => log::error!("init error: {:?}", e),
            }
        });
    }
    Ok(())
}

/// Mount a star field into the element with id `element_id`.
#[wasm_bindgen]
pub async fn mount(element_id: String) -> Result<StarFieldHandle, JsValue> {
    init(&element_id)
        .await
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

/// Stop and remove the field auto-mounted into `#starfield`.
/// Returns `false` when there was none.
#[wasm_bindgen]
pub fn dispose_auto() -> bool {
    // Dropping the handle tears it down
    AUTO_MOUNTED
        .with(|slot| slot.borrow_mut().take())
        .is_some()
}

/// A running star field. Call `dispose` (or free the handle) to stop it and
/// release its canvas.
#[wasm_bindgen]
pub struct StarFieldHandle {
    app: Rc<RefCell<App>>,
    frame_loop: FrameLoop,
    listeners: Listeners,
    canvas: web::HtmlCanvasElement,
}

#[wasm_bindgen]
impl StarFieldHandle {
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        self.teardown();
    }
}

impl StarFieldHandle {
    fn teardown(&mut self) {
        self.app.borrow().field.dispose();
        self.frame_loop.stop();
        self.listeners.remove_all();
        self.canvas.remove();
    }
}

impl Drop for StarFieldHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn init(element_id: &str) -> anyhow::Result<StarFieldHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let mount = dom::mount_element(&document, element_id)?;
    // Fail fast on a collapsed mount rather than build a degenerate projection
    let viewport = dom::measure(&mount)?;
    let pixel_ratio = dom::device_pixel_ratio();

    let canvas = dom::append_canvas(&document, &mount)?;
    dom::sync_canvas_backing_size(&canvas, viewport.physical_size(pixel_ratio));

    let field = StarField::create(viewport.width(), viewport.height())?;
    let gpu = match GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        viewport,
        pixel_ratio,
        field.scene(),
    )
    .await
    {
        Ok(gpu) => {
            dom::sync_canvas_backing_size(&canvas, gpu.size());
            gpu
        }
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    log::info!(
        "[mount] #{} {}x{} css px, ratio {:.2}",
        element_id,
        viewport.width(),
        viewport.height(),
        pixel_ratio
    );

    let app = Rc::new(RefCell::new(App {
        field,
        renderer: CanvasRenderer {
            canvas: canvas.clone(),
            gpu,
        },
    }));
    let listeners = events::wire_input_handlers(&app, &mount);
    let frame_loop = FrameLoop::start(app.clone());

    Ok(StarFieldHandle {
        app,
        frame_loop,
        listeners,
        canvas,
    })
}
