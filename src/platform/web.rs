//! Browser host
//!
//! Paints through `CanvasRenderingContext2d` and drives the frame loop with
//! `requestAnimationFrame`. Closures hold only a `Weak` reference to the
//! controller and are kept alive by the host until unmount removes them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::bridge::{EventKind, InputEvent, PointerInput};
use crate::config::StarfieldConfig;
use crate::error::MountError;
use crate::lifecycle::{FrameHandle, Host, ListenerHandle, Starfield};
use crate::random::Shape;
use crate::surface::{Glow, Surface, Viewport};

type Controller = RefCell<Starfield<WebHost>>;

/// Canvas 2D drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Viewport,
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn set_size(&mut self, viewport: Viewport) {
        let (w, h) = viewport.pixel_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
    }

    fn fill_glow(&mut self, glow: &Glow) {
        let (x, y) = (glow.center.x as f64, glow.center.y as f64);
        let Ok(gradient) =
            self.ctx
                .create_radial_gradient(x, y, 0.0, x, y, glow.halo_radius() as f64)
        else {
            return;
        };
        for stop in glow.stops() {
            let _ = gradient.add_color_stop(stop.offset, &stop.color.to_css());
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);

        let r = glow.radius as f64;
        self.ctx.begin_path();
        match glow.shape {
            Shape::Circle => {
                let _ = self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
            }
            Shape::Diamond => {
                self.ctx.move_to(x, y - r);
                self.ctx.line_to(x + r, y);
                self.ctx.line_to(x, y + r);
                self.ctx.line_to(x - r, y);
                self.ctx.close_path();
            }
        }
        self.ctx.fill();
    }
}

/// Window-level listeners, animation frames and a canvas
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    controller: Weak<Controller>,
    on_frame: Closure<dyn FnMut(f64)>,
    listeners: Vec<(ListenerHandle, EventKind, Closure<dyn FnMut(Event)>)>,
    next_listener: u32,
}

impl WebHost {
    fn new(window: Window, canvas: HtmlCanvasElement, controller: Weak<Controller>) -> Self {
        let weak = controller.clone();
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(ctrl) = weak.upgrade() {
                match ctrl.try_borrow_mut() {
                    Ok(mut starfield) => starfield.frame(time),
                    Err(_) => log::warn!("Starfield busy, frame skipped"),
                }
            }
        });

        Self {
            window,
            canvas,
            controller,
            on_frame,
            listeners: Vec::new(),
            next_listener: 1,
        }
    }
}

/// Current window inner size
fn window_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn touch_points(event: &TouchEvent) -> Vec<Vec2> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

fn mouse_point(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// Convert a DOM event received on the `kind` listener
fn translate(kind: EventKind, event: &Event, window: &Window) -> InputEvent {
    match kind {
        EventKind::MouseMove => {
            InputEvent::Move(PointerInput::Mouse(mouse_point(event.unchecked_ref())))
        }
        EventKind::TouchMove => {
            InputEvent::Move(PointerInput::Touch(touch_points(event.unchecked_ref())))
        }
        EventKind::Click => {
            InputEvent::Press(PointerInput::Mouse(mouse_point(event.unchecked_ref())))
        }
        EventKind::TouchStart => {
            InputEvent::Press(PointerInput::Touch(touch_points(event.unchecked_ref())))
        }
        EventKind::Resize => InputEvent::Resize(window_viewport(window)),
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn acquire_surface(&mut self) -> Result<CanvasSurface, MountError> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(MountError::ContextUnavailable)?;

        Ok(CanvasSurface {
            canvas: self.canvas.clone(),
            ctx,
            size: Viewport::default(),
        })
    }

    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn listen(&mut self, kind: EventKind) -> Result<ListenerHandle, MountError> {
        let weak = self.controller.clone();
        let window = self.window.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let input = translate(kind, &event, &window);
            if let Some(ctrl) = weak.upgrade() {
                match ctrl.try_borrow_mut() {
                    Ok(mut starfield) => starfield.dispatch(input),
                    Err(_) => log::warn!("Starfield busy, {} dropped", kind.dom_name()),
                }
            }
        });

        self.window
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
            .map_err(|_| MountError::ListenerFailed(kind.dom_name()))?;

        let handle = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, kind, closure));
        Ok(handle)
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        let Some(idx) = self.listeners.iter().position(|(h, _, _)| *h == handle) else {
            log::warn!("Removing unknown listener {:?}", handle);
            return;
        };
        let (_, kind, closure) = self.listeners.swap_remove(idx);
        let _ = self
            .window
            .remove_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref());
    }

    fn seed(&self) -> u64 {
        crate::platform::clock_seed()
    }
}

/// A mounted starfield, returned to JavaScript
#[wasm_bindgen]
pub struct StarfieldHandle {
    controller: Rc<Controller>,
}

#[wasm_bindgen]
impl StarfieldHandle {
    /// Stop the animation and detach all listeners
    pub fn unmount(&self) {
        match self.controller.try_borrow_mut() {
            Ok(mut starfield) => starfield.unmount(),
            Err(_) => log::warn!("Starfield busy, unmount skipped"),
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.controller
            .try_borrow()
            .map(|s| s.is_mounted())
            .unwrap_or(false)
    }
}

/// Console logger and panic hook, once per page
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already installed on repeat calls
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount on the canvas with id `canvas_id`
pub fn mount(canvas_id: &str, config: StarfieldConfig) -> Result<StarfieldHandle, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoWindow)?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| MountError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::NotACanvas(canvas_id.to_string()))?;

    let style = canvas.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("inset", "0");
    let _ = style.set_property("width", "100vw");
    let _ = style.set_property("height", "100vh");
    let _ = style.set_property("display", "block");
    let _ = style.set_property("background", &config.backdrop);

    let controller = Rc::new_cyclic(|weak: &Weak<Controller>| {
        RefCell::new(Starfield::new(
            WebHost::new(window, canvas, weak.clone()),
            config,
        ))
    });
    controller.borrow_mut().mount()?;

    Ok(StarfieldHandle { controller })
}

/// JavaScript entry point. Returns `undefined` when the canvas or its 2D
/// context is unavailable, leaving the page background as is.
#[wasm_bindgen(js_name = mountStarfield)]
pub fn mount_starfield(canvas_id: &str, config_json: Option<String>) -> Option<StarfieldHandle> {
    init_logging();

    let config = match config_json {
        Some(json) => StarfieldConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("{}, using default config", e);
            StarfieldConfig::default()
        }),
        None => StarfieldConfig::default(),
    };

    match mount(canvas_id, config) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Starfield disabled: {}", e);
            None
        }
    }
}
