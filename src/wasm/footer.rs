//! Self-dismissing footer credit.

use web_sys::{Document, Element, HtmlElement};

use super::dom::{self, Timer};
use crate::error::PageError;
use crate::footer::{FooterPhase, FooterSchedule};

const LICENSE_URL: &str = "https://creativecommons.org/licenses/by/4.0/";

pub struct Footer {
    root: HtmlElement,
    _timers: Vec<Timer>,
}

impl Footer {
    pub fn mount(document: &Document, parent: &Element, schedule: FooterSchedule) -> Result<Self, PageError> {
        let root = dom::append(document, parent, "footer", "credit")?;

        let thanks = dom::append(document, &root, "p", "credit-thanks")?;
        thanks.append_with_str_1("Shoutout to ")?;
        dom::append_text(document, &thanks, "span", "credit-name", "Daniela Muntyan")?;
        thanks.append_with_str_1(" for the original design")?;

        let license = dom::append(document, &root, "p", "credit-license")?;
        license.append_with_str_1("Licensed under ")?;
        let link = dom::append_text(document, &license, "a", "", "CC BY 4.0")?;
        link.set_attribute("href", LICENSE_URL)?;
        link.set_attribute("target", "_blank")?;
        link.set_attribute("rel", "noopener noreferrer")?;

        Self::show(&root, FooterPhase::Pending);
        let mut timers = Vec::new();
        for (at_ms, phase) in schedule.transitions() {
            let target = root.clone();
            timers.push(Timer::once(at_ms, move || Self::show(&target, phase))?);
        }

        Ok(Self { root, _timers: timers })
    }

    fn show(root: &HtmlElement, phase: FooterPhase) {
        let class = match phase {
            FooterPhase::Pending => "credit",
            FooterPhase::Visible => "credit visible",
            FooterPhase::Dismissed => "credit dismissed",
        };
        root.set_class_name(class);
        log::debug!("footer {phase:?}");
    }

    pub fn element(&self) -> &HtmlElement {
        &self.root
    }
}

impl Drop for Footer {
    fn drop(&mut self) {
        self.root.remove();
    }
}
