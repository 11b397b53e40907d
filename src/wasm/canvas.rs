//! The shader background canvas.

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent, WebGl2RenderingContext as GL};

use super::dom::{self, Timer};
use super::render::{FrameLoop, RenderEpoch};
use crate::error::CanvasError;
use crate::layout::{PointerCell, Rect};
use crate::lease::Leases;
use crate::render::{EpochKey, RenderUniforms};

/// The running epoch. Field order matters: the loop is stopped and its
/// closure dropped before the epoch's GL objects are deleted.
struct ActiveEpoch {
    frame_loop: FrameLoop,
    epoch: Rc<RenderEpoch>,
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(MouseEvent)>);

pub struct ShaderCanvas {
    canvas: HtmlCanvasElement,
    gl: GL,
    pointer: PointerCell,
    leases: Leases,
    mounted_at: f64,
    requested: Option<EpochKey>,
    active: Option<ActiveEpoch>,
    epochs_started: u64,
    listeners: Vec<Listener>,
    _warmup: Option<Timer>,
}

impl ShaderCanvas {
    /// Acquire a WebGL2 context on `canvas` and start tracking the pointer.
    /// The canvas stays transparent for `warmup_ms`, then fades in.
    pub fn mount(canvas: HtmlCanvasElement, warmup_ms: u32) -> Result<Self, CanvasError> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(CanvasError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| CanvasError::ContextUnavailable)?;

        dom::set_style(&canvas, "opacity", "0");
        dom::set_style(&canvas, "transition", "opacity 0.3s ease-in");

        let pointer = PointerCell::default();
        let listeners = Self::track_pointer(&canvas, &pointer)?;

        let fade_target = canvas.clone();
        let warmup = Timer::once(warmup_ms, move || dom::set_style(&fade_target, "opacity", "1"))
            .map_err(|e| log::warn!("canvas fade-in not scheduled: {e}"))
            .ok();

        Ok(Self {
            canvas,
            gl,
            pointer,
            leases: Leases::new(),
            mounted_at: dom::now_ms(),
            requested: None,
            active: None,
            epochs_started: 0,
            listeners,
            _warmup: warmup,
        })
    }

    /// Pointer events are taken from the whole window, since the page content
    /// is stacked above the canvas and swallows hits on it.
    fn track_pointer(canvas: &HtmlCanvasElement, pointer: &PointerCell) -> Result<Vec<Listener>, CanvasError> {
        let window: EventTarget = dom::window().map_err(|e| CanvasError::Js(e.to_string()))?.into();
        let page: EventTarget = canvas
            .owner_document()
            .and_then(|d| d.document_element())
            .map(Into::into)
            .unwrap_or_else(|| window.clone());

        let on_move = {
            let canvas = canvas.clone();
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let bounds = canvas.get_bounding_client_rect();
                let rect = Rect {
                    left: bounds.left(),
                    top: bounds.top(),
                    width: bounds.width(),
                    height: bounds.height(),
                };
                pointer.move_to(f64::from(event.client_x()), f64::from(event.client_y()), rect);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_leave = {
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| pointer.reset()) as Box<dyn FnMut(MouseEvent)>)
        };

        let listeners = vec![(window, "mousemove", on_move), (page, "mouseleave", on_leave)];
        for (target, event, callback) in &listeners {
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        }
        Ok(listeners)
    }

    /// Rebuild the program and buffers for `key` and restart the render loop.
    ///
    /// Returns `Ok(false)` without touching anything when `key` is the one
    /// already requested. A failed epoch is not retried until the key changes.
    pub fn reinitialize(&mut self, key: EpochKey) -> Result<bool, CanvasError> {
        self.reinitialize_with_source(key, key.shader().fragment_source)
    }

    /// Like [`reinitialize`](Self::reinitialize), drawing `fragment_source`
    /// instead of the library source for `key`.
    pub fn reinitialize_with_source(&mut self, key: EpochKey, fragment_source: &str) -> Result<bool, CanvasError> {
        if self.requested == Some(key) {
            return Ok(false);
        }
        self.teardown();
        self.requested = Some(key);

        self.canvas.set_width(key.width);
        self.canvas.set_height(key.height);
        self.gl.viewport(0, 0, key.width as i32, key.height as i32);

        let epoch = match RenderEpoch::with_source(&self.gl, key, fragment_source) {
            Ok(epoch) => Rc::new(epoch),
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        let frame_epoch = Rc::clone(&epoch);
        let pointer = self.pointer.clone();
        let mounted_at = self.mounted_at;
        let frame_loop = FrameLoop::start(&self.leases, move || {
            let elapsed = dom::now_ms() - mounted_at;
            frame_epoch.draw(&RenderUniforms::new(key.width, key.height, elapsed, pointer.get()));
        })?;

        self.active = Some(ActiveEpoch { frame_loop, epoch });
        self.epochs_started += 1;
        log::info!("shader {} running at {}x{}", key.shader().id, key.width, key.height);
        Ok(true)
    }

    /// Stop the render loop and release the current program and buffers.
    /// The next `reinitialize` always rebuilds, whatever its key.
    pub fn teardown(&mut self) {
        self.requested = None;
        if let Some(mut active) = self.active.take() {
            active.frame_loop.stop();
            log::debug!("released epoch for shader {}", active.epoch.key().shader_id);
        }
    }

    fn clear(&self) {
        self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.frame_loop.is_running())
    }

    /// Key of the epoch currently rendering, if any.
    pub fn active_key(&self) -> Option<EpochKey> {
        self.active.as_ref().map(|a| a.epoch.key())
    }

    /// Number of epochs successfully started since mount.
    pub fn epochs_started(&self) -> u64 {
        self.epochs_started
    }

    pub fn pointer(&self) -> &PointerCell {
        &self.pointer
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Drop for ShaderCanvas {
    fn drop(&mut self) {
        self.teardown();
        for (target, event, callback) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        }
    }
}
