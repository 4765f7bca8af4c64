//! Browser host.
//!
//! [`start`] finds the page's canvas by id and runs the backdrop on its
//! `2d` context, re-arming `requestAnimationFrame` after every frame. A
//! page without the canvas (or a canvas without a `2d` context) gets an
//! inert backdrop: no listeners, no frame callbacks.
//!
//! ```js
//! import init, { start, wire_page } from "./pkg/plexus.js";
//! await init();
//! start("bg-canvas");
//! wire_page("me@example.com");
//! ```

mod page;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::canvas::Canvas;
use crate::config::{FieldConfig, Rgba};
use crate::frame::{Backdrop, FrameLoop};

pub use page::wire_page;

/// [`Canvas`] over an HTML canvas element's 2D context.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Wrap `element`, or `None` if it has no `2d` context.
    pub fn from_element(element: HtmlCanvasElement) -> Option<Self> {
        let context = element
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { element, context })
    }
}

impl Canvas for WebCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.element.set_width(width);
        self.element.set_height(height);
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.element.width() as f64,
            self.element.height() as f64,
        );
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.context.set_fill_style_str(&color.css());
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.context.set_stroke_style_str(&color.css());
    }

    fn set_line_width(&mut self, width: f32) {
        self.context.set_line_width(width as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.context.begin_path();
        let arc = self.context.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        if arc.is_ok() {
            self.context.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
    }
}

/// Start the backdrop on the canvas with id `canvas_id`.
///
/// `config_json` optionally overrides the default [`FieldConfig`].
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already installed if start() runs twice on one page
    let _ = tracing_wasm::try_set_as_global_default();

    let config = match config_json {
        Some(json) => FieldConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => FieldConfig::default(),
    };

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(WebCanvas::from_element);

    let (width, height) = viewport_size(&window);
    let backdrop = Backdrop::attach(canvas, width, height, config, &mut rand::thread_rng());
    let Backdrop::Running(frame_loop) = backdrop else {
        return Ok(());
    };

    let frame_loop = Rc::new(RefCell::new(frame_loop));
    listen_resize(&window, frame_loop.clone())?;
    listen_pointer(&window, frame_loop.clone())?;
    run_frames(&window, frame_loop)
}

fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

fn listen_resize(
    window: &web_sys::Window,
    frame_loop: Rc<RefCell<FrameLoop<WebCanvas>>>,
) -> Result<(), JsValue> {
    let target = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let (width, height) = viewport_size(&target);
        frame_loop.borrow_mut().resize(width, height);
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Lives as long as the page
    on_resize.forget();
    Ok(())
}

fn listen_pointer(
    window: &web_sys::Window,
    frame_loop: Rc<RefCell<FrameLoop<WebCanvas>>>,
) -> Result<(), JsValue> {
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let position = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        frame_loop.borrow_mut().pointer_moved(position);
    });
    window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();
    Ok(())
}

/// Drive the frame loop from `requestAnimationFrame`, re-arming while it
/// reports active.
fn run_frames(
    window: &web_sys::Window,
    frame_loop: Rc<RefCell<FrameLoop<WebCanvas>>>,
) -> Result<(), JsValue> {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let rearm = tick.clone();
    let target = window.clone();

    *tick.borrow_mut() = Some(Closure::new(move || {
        if !frame_loop.borrow_mut().frame() {
            return;
        }
        if let Some(callback) = rearm.borrow().as_ref() {
            if let Err(e) = target.request_animation_frame(callback.as_ref().unchecked_ref()) {
                tracing::warn!(error = ?e, "requestAnimationFrame failed");
            }
        }
    }));

    if let Some(callback) = tick.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
