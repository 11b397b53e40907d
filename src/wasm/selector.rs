//! Shader picker: one button per library entry.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, HtmlElement};

use super::dom;
use crate::error::PageError;
use crate::library::SHADERS;

pub struct ShaderSelector {
    root: HtmlElement,
    buttons: Vec<(i32, HtmlElement)>,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl ShaderSelector {
    pub fn mount(document: &Document, parent: &Element) -> Result<Self, PageError> {
        let root = dom::append(document, parent, "nav", "shader-selector")?;
        root.set_attribute("aria-label", "Background shader")?;

        let mut buttons = Vec::with_capacity(SHADERS.len());
        for shader in SHADERS {
            let button = dom::append_text(document, &root, "button", "shader-option", shader.name)?;
            button.set_attribute("data-shader-id", &shader.id.to_string())?;
            button.set_attribute("aria-pressed", "false")?;
            buttons.push((shader.id, button));
        }

        Ok(Self {
            root,
            buttons,
            listeners: Vec::new(),
        })
    }

    /// Call `handler` with the shader id of every button the user clicks.
    pub fn on_select(&mut self, handler: impl Fn(i32) + Clone + 'static) -> Result<(), PageError> {
        for (id, button) in &self.buttons {
            let id = *id;
            let handler = handler.clone();
            let on_click = Closure::wrap(Box::new(move |_: Event| handler(id)) as Box<dyn FnMut(Event)>);
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            self.listeners.push(on_click);
        }
        Ok(())
    }

    /// Highlight the button for `id`. Unknown ids highlight nothing.
    pub fn mark_active(&self, id: i32) {
        for (button_id, button) in &self.buttons {
            let active = *button_id == id;
            button.set_class_name(if active { "shader-option active" } else { "shader-option" });
            if let Err(e) = button.set_attribute("aria-pressed", if active { "true" } else { "false" }) {
                log::warn!("unable to mark shader {button_id}: {}", dom::describe(&e));
            }
        }
    }

    pub fn button(&self, id: i32) -> Option<&HtmlElement> {
        self.buttons.iter().find(|(b, _)| *b == id).map(|(_, button)| button)
    }
}

impl Drop for ShaderSelector {
    fn drop(&mut self) {
        self.root.remove();
    }
}
