//! Page root: owns the selection state and wires the components together.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use super::canvas::ShaderCanvas;
use super::display::CenterDisplay;
use super::dom;
use super::footer::Footer;
use super::selector::ShaderSelector;
use crate::carousel::CarouselTimings;
use crate::config::SiteConfig;
use crate::error::PageError;
use crate::footer::FooterSchedule;
use crate::layout;
use crate::render::EpochKey;
use crate::state::{AppState, PreferenceStore};

/// Viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

pub struct App {
    config: SiteConfig,
    store: Box<dyn PreferenceStore>,
    state: AppState,
    viewport: Viewport,
    canvas_size: f64,
    stage: HtmlElement,
    canvas: Option<ShaderCanvas>,
    display: Rc<RefCell<CenterDisplay>>,
    selector: ShaderSelector,
    _footer: Footer,
    on_resize_listener: Option<Closure<dyn FnMut()>>,
}

impl App {
    /// Build the page inside `root`, drawing the background on `canvas`.
    ///
    /// A canvas without WebGL2 is logged and skipped; everything else still
    /// mounts.
    pub fn mount(
        document: &Document,
        root: &Element,
        canvas: HtmlCanvasElement,
        config: SiteConfig,
        store: Box<dyn PreferenceStore>,
        viewport: Viewport,
    ) -> Result<Rc<RefCell<Self>>, PageError> {
        let state = AppState::restore(store.as_ref(), &config.storage_key);
        log::info!("restored shader {} / section {}", state.shader_id, state.section_id);

        let selector = ShaderSelector::mount(document, root)?;
        let stage = dom::append(document, root, "div", "stage")?;
        let display = CenterDisplay::mount(
            document,
            &stage,
            config.carousel_mode,
            CarouselTimings {
                reveal_delay_ms: config.reveal_delay_ms,
                autoplay_interval_ms: config.autoplay_interval_ms,
            },
        )?;
        let footer = Footer::mount(
            document,
            root,
            FooterSchedule {
                delay_ms: config.footer_delay_ms,
                visible_ms: config.footer_visible_ms,
            },
        )?;

        let canvas = match ShaderCanvas::mount(canvas, config.warmup_ms) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                log::error!("shader background disabled: {e}");
                None
            }
        };

        selector.mark_active(state.shader_id);
        display.borrow_mut().set_section(state.section_id);

        let app = Rc::new(RefCell::new(Self {
            config,
            store,
            state,
            viewport,
            canvas_size: 0.0,
            stage,
            canvas,
            display,
            selector,
            _footer: footer,
            on_resize_listener: None,
        }));
        app.borrow_mut().resize(viewport);

        let weak = Rc::downgrade(&app);
        app.borrow_mut().selector.on_select(move |id| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().select_shader(id);
            }
        })?;

        Ok(app)
    }

    /// Follow window `resize` events for the life of the app.
    pub fn track_window(app: &Rc<RefCell<Self>>) -> Result<(), PageError> {
        let weak = Rc::downgrade(app);
        let on_resize = Closure::wrap(Box::new(move || {
            let Some(app) = weak.upgrade() else { return };
            match dom::viewport() {
                Ok((width, height, pixel_ratio)) => {
                    app.borrow_mut().resize(Viewport { width, height, pixel_ratio });
                }
                Err(e) => log::warn!("unable to read viewport: {e}"),
            }
        }) as Box<dyn FnMut()>);
        dom::window()?.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        app.borrow_mut().on_resize_listener = Some(on_resize);
        Ok(())
    }

    /// User picked shader `id`.
    pub fn select_shader(&mut self, id: i32) {
        let changed = self.state.select(id, self.store.as_ref(), &self.config.storage_key);
        if !changed {
            return;
        }
        log::info!("selected shader {id} / section {}", self.state.section_id);
        self.selector.mark_active(self.state.shader_id);
        self.display.borrow_mut().set_section(self.state.section_id);
        self.refresh_canvas();
    }

    /// Recompute every size derived from the viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.canvas_size = layout::canvas_size(viewport.width, viewport.height, self.config.canvas_ratio);
        dom::set_square(&self.stage, self.canvas_size);
        self.display
            .borrow()
            .resize(layout::display_size(self.canvas_size, viewport.width, &self.config.display));
        self.refresh_canvas();
    }

    fn epoch_key(&self) -> EpochKey {
        let (width, height) =
            layout::device_pixels(self.viewport.width, self.viewport.height, self.viewport.pixel_ratio);
        EpochKey {
            shader_id: self.state.shader_id,
            width,
            height,
        }
    }

    fn refresh_canvas(&mut self) {
        let key = self.epoch_key();
        if let Some(canvas) = self.canvas.as_mut() {
            if let Err(e) = canvas.reinitialize(key) {
                log::error!("shader {} not rendering: {e}", key.shader_id);
            }
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    pub fn canvas(&self) -> Option<&ShaderCanvas> {
        self.canvas.as_ref()
    }

    pub fn display(&self) -> &Rc<RefCell<CenterDisplay>> {
        &self.display
    }

    pub fn selector(&self) -> &ShaderSelector {
        &self.selector
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let (Some(listener), Some(window)) = (self.on_resize_listener.take(), web_sys::window()) {
            let _ = window.remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        self.stage.remove();
    }
}
