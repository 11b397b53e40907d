//! The circular center display.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, HtmlElement};

use super::dom::{self, Timer};
use crate::carousel::{Carousel, CarouselMode, CarouselTimings, DisplayView, TimerCommand};
use crate::error::PageError;

pub struct CenterDisplay {
    document: Document,
    root: HtmlElement,
    title: HtmlElement,
    body: HtmlElement,
    dots: HtmlElement,
    carousel: Carousel,
    timer: Option<Timer>,
    this: Weak<RefCell<CenterDisplay>>,
    on_click: Option<Closure<dyn FnMut(Event)>>,
    dot_listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl CenterDisplay {
    pub fn mount(
        document: &Document,
        parent: &Element,
        mode: CarouselMode,
        timings: CarouselTimings,
    ) -> Result<Rc<RefCell<Self>>, PageError> {
        let root = dom::append(document, parent, "div", "center-display")?;
        let title = dom::append(document, &root, "h1", "section-title")?;
        let body = dom::append(document, &root, "ul", "section-content")?;
        let dots = dom::append(document, &root, "div", "carousel-dots")?;

        let display = Rc::new(RefCell::new(Self {
            document: document.clone(),
            root,
            title,
            body,
            dots,
            carousel: Carousel::new(mode, timings),
            timer: None,
            this: Weak::new(),
            on_click: None,
            dot_listeners: Vec::new(),
        }));

        let weak = Rc::downgrade(&display);
        let on_click = Closure::wrap(Box::new(move |_: Event| {
            if let Some(display) = weak.upgrade() {
                display.borrow_mut().click();
            }
        }) as Box<dyn FnMut(Event)>);
        {
            let mut this = display.borrow_mut();
            this.root
                .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            this.on_click = Some(on_click);
            this.this = Rc::downgrade(&display);
        }
        Ok(display)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn element(&self) -> &HtmlElement {
        &self.root
    }

    pub fn resize(&self, side_px: f64) {
        dom::set_square(&self.root, side_px);
    }

    pub fn set_section(&mut self, index: i32) {
        let command = self.carousel.set_section(index);
        self.apply(command);
        self.render();
    }

    pub fn click(&mut self) {
        let command = self.carousel.click();
        self.apply(command);
        self.render();
    }

    pub fn select_item(&mut self, item: usize) {
        let command = self.carousel.select_item(item);
        self.apply(command);
        self.render();
    }

    fn on_timer(&mut self, generation: u64) {
        let command = self.carousel.on_timer(generation);
        self.apply(command);
        self.render();
    }

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Keep => {}
            TimerCommand::Cancel => self.timer = None,
            TimerCommand::Arm { generation, delay_ms, repeat } => {
                // Drop the old timer first so it can never fire alongside the new one.
                self.timer = None;
                let weak = self.this.clone();
                let fire = move || {
                    if let Some(display) = weak.upgrade() {
                        display.borrow_mut().on_timer(generation);
                    }
                };
                let timer = if repeat {
                    Timer::every(delay_ms, fire)
                } else {
                    Timer::once(delay_ms, fire)
                };
                self.timer = timer.map_err(|e| log::warn!("carousel timer not armed: {e}")).ok();
            }
        }
    }

    fn render(&mut self) {
        let view = self.carousel.view();
        self.title.set_text_content(Some(view.title));
        self.render_items(&view);
        if let Err(e) = self.render_dots(&view) {
            log::warn!("unable to render indicator dots: {e}");
        }
        let class = if view.revealed { "center-display revealed" } else { "center-display" };
        self.root.set_class_name(class);
    }

    fn render_items(&self, view: &DisplayView) {
        self.body.set_text_content(None);
        for item in &view.items {
            if let Err(e) = dom::append_text(&self.document, &self.body, "li", "section-item", item) {
                log::warn!("unable to render content item: {e}");
            }
        }
    }

    fn render_dots(&mut self, view: &DisplayView) -> Result<(), PageError> {
        let (count, active) = view.dots.unwrap_or((0, 0));
        if self.dot_listeners.len() != count {
            self.dots.set_text_content(None);
            self.dot_listeners.clear();
            for item in 0..count {
                let dot = dom::append(&self.document, &self.dots, "button", "dot")?;
                dot.set_attribute("aria-label", &format!("View item {}", item + 1))?;
                let weak = self.this.clone();
                let on_click = Closure::wrap(Box::new(move |event: Event| {
                    event.stop_propagation();
                    if let Some(display) = weak.upgrade() {
                        display.borrow_mut().select_item(item);
                    }
                }) as Box<dyn FnMut(Event)>);
                dot.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                self.dot_listeners.push(on_click);
            }
        }

        let children = self.dots.children();
        for item in 0..children.length() {
            if let Some(dot) = children.item(item) {
                let class = if item as usize == active { "dot active" } else { "dot" };
                dot.set_class_name(class);
            }
        }
        Ok(())
    }
}

impl Drop for CenterDisplay {
    fn drop(&mut self) {
        self.root.remove();
    }
}
