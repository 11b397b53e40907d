//! Portfolio page: an animated WebGL2 shader background behind a rotating
//! biography card.
//!
//! Everything that doesn't touch the browser lives in plain modules and is
//! tested on the host; the DOM and WebGL glue is only compiled for wasm32.

pub mod carousel;
pub mod config;
pub mod error;
pub mod footer;
pub mod layout;
pub mod lease;
pub mod library;
pub mod render;
pub mod sections;
pub mod shaders;
pub mod state;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    pub mod app;
    pub mod canvas;
    pub mod display;
    pub mod dom;
    pub mod footer;
    pub mod render;
    pub mod selector;

    use app::{App, Viewport};

    /// Id of the element the page is built into.
    pub const ROOT_ID: &str = "app";
    /// Id of the background canvas.
    pub const CANVAS_ID: &str = "c";

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let document = dom::document()?;
        let config = dom::load_config(&document);
        if console_log::init_with_level(config.log_level()).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        // Pages without a root (e.g. the test runner) get nothing mounted.
        let Some(root) = document.get_element_by_id(ROOT_ID) else {
            log::debug!("no #{ROOT_ID} element, not mounting");
            return Ok(());
        };
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let (width, height, pixel_ratio) = dom::viewport()?;
        let app = App::mount(
            &document,
            &root,
            canvas,
            config,
            Box::new(dom::LocalStore::open()),
            Viewport { width, height, pixel_ratio },
        )?;
        App::track_window(&app)?;

        APP.with(|cell| *cell.borrow_mut() = Some(app));
        log::info!("page mounted");
        Ok(())
    }
}
