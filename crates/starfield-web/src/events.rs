use crate::dom;
use crate::frame::App;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Registered {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// DOM listeners added for one mounted field, kept so they can be detached.
#[derive(Default)]
pub struct Listeners {
    registered: Vec<Registered>,
}

impl Listeners {
    fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        closure: Closure<dyn FnMut(web::Event)>,
    ) {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[events] failed to add {} listener: {:?}", kind, e);
            return;
        }
        self.registered.push(Registered {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn remove_all(&mut self) {
        for r in self.registered.drain(..) {
            let _ = r
                .target
                .remove_event_listener_with_callback(r.kind, r.closure.as_ref().unchecked_ref());
        }
    }
}

// A dropped closure left registered would throw on the next event
impl Drop for Listeners {
    fn drop(&mut self) {
        self.remove_all();
    }
}

pub fn wire_input_handlers(app: &Rc<RefCell<App>>, mount: &web::HtmlElement) -> Listeners {
    let mut listeners = Listeners::default();
    wire_mousemove(&mut listeners, app, mount);
    wire_touch(&mut listeners, app, mount, "touchstart");
    wire_touch(&mut listeners, app, mount, "touchmove");
    if let Some(window) = web::window() {
        wire_resize(&mut listeners, app, mount, &window);
    }
    listeners
}

fn wire_mousemove(listeners: &mut Listeners, app: &Rc<RefCell<App>>, mount: &web::HtmlElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            app.borrow_mut().field.pointer_move(client);
        }
    }) as Box<dyn FnMut(web::Event)>);
    listeners.add(mount, "mousemove", true, closure);
}

// Non-passive so a consumed single-finger touch can stop page scrolling
fn wire_touch(
    listeners: &mut Listeners,
    app: &Rc<RefCell<App>>,
    mount: &web::HtmlElement,
    kind: &'static str,
) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        let touches = ev.touches();
        let points: Vec<Vec2> = (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| Vec2::new(t.page_x() as f32, t.page_y() as f32))
            .collect();
        if app.borrow_mut().field.touch(&points) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(web::Event)>);
    listeners.add(mount, kind, false, closure);
}

fn wire_resize(
    listeners: &mut Listeners,
    app: &Rc<RefCell<App>>,
    mount: &web::HtmlElement,
    window: &web::Window,
) {
    let app = app.clone();
    let mount = mount.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let viewport = match dom::measure(&mount) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[resize] ignored: {}", e);
                return;
            }
        };
        app.borrow_mut().resize(viewport, dom::device_pixel_ratio());
    }) as Box<dyn FnMut(web::Event)>);
    listeners.add(window, "resize", true, closure);
}
