//! Center display state machine.
//!
//! The machine never touches timers itself. Every transition returns a
//! [`TimerCommand`] that the DOM layer applies, and each armed timer carries
//! the generation it was armed for so a late firing from a replaced timer is
//! ignored.

use serde::Deserialize;

use crate::sections::{section_at, Section};

/// How the center display presents a section's content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselMode {
    /// Title first, full content list on click or after a delay.
    #[default]
    Reveal,
    /// Title plus one content item, rotating on an interval.
    Autoplay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    TitleOnly,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    /// Replace any pending timer with a new one.
    Arm { generation: u64, delay_ms: u32, repeat: bool },
    /// Drop the pending timer, if any.
    Cancel,
    /// Leave the pending timer alone.
    Keep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Reveal(RevealState),
    Autoplay { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselTimings {
    pub reveal_delay_ms: u32,
    pub autoplay_interval_ms: u32,
}

impl Default for CarouselTimings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1000,
            autoplay_interval_ms: 4000,
        }
    }
}

/// What the display should currently show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayView {
    pub title: &'static str,
    pub items: Vec<&'static str>,
    /// Indicator dots as `(count, active)`, autoplay only.
    pub dots: Option<(usize, usize)>,
    pub revealed: bool,
}

#[derive(Debug)]
pub struct Carousel {
    mode: CarouselMode,
    timings: CarouselTimings,
    section: &'static Section,
    state: State,
    generation: u64,
}

impl Carousel {
    pub fn new(mode: CarouselMode, timings: CarouselTimings) -> Self {
        Self {
            mode,
            timings,
            section: section_at(0),
            state: Self::initial_state(mode),
            generation: 0,
        }
    }

    fn initial_state(mode: CarouselMode) -> State {
        match mode {
            CarouselMode::Reveal => State::Reveal(RevealState::TitleOnly),
            CarouselMode::Autoplay => State::Autoplay { index: 0 },
        }
    }

    pub fn mode(&self) -> CarouselMode {
        self.mode
    }

    pub fn section(&self) -> &'static Section {
        self.section
    }

    /// Current reveal state, `None` in autoplay mode.
    pub fn reveal_state(&self) -> Option<RevealState> {
        match self.state {
            State::Reveal(s) => Some(s),
            State::Autoplay { .. } => None,
        }
    }

    /// Visible content index, `None` in reveal mode.
    pub fn content_index(&self) -> Option<usize> {
        match self.state {
            State::Autoplay { index } => Some(index),
            State::Reveal(_) => None,
        }
    }

    /// Switch to the section at `index` (first section when out of range).
    /// Always resets the presentation and re-arms the mode's timer.
    pub fn set_section(&mut self, index: i32) -> TimerCommand {
        self.section = section_at(index);
        self.state = Self::initial_state(self.mode);
        self.generation += 1;
        match self.mode {
            CarouselMode::Reveal => TimerCommand::Arm {
                generation: self.generation,
                delay_ms: self.timings.reveal_delay_ms,
                repeat: false,
            },
            CarouselMode::Autoplay if self.section.content.len() > 1 => TimerCommand::Arm {
                generation: self.generation,
                delay_ms: self.timings.autoplay_interval_ms,
                repeat: true,
            },
            CarouselMode::Autoplay => TimerCommand::Cancel,
        }
    }

    /// Click or tap on the display body.
    pub fn click(&mut self) -> TimerCommand {
        match self.state {
            State::Reveal(RevealState::TitleOnly) => {
                self.state = State::Reveal(RevealState::Revealed);
                self.generation += 1;
                TimerCommand::Cancel
            }
            State::Reveal(RevealState::Revealed) => {
                self.state = State::Reveal(RevealState::TitleOnly);
                TimerCommand::Keep
            }
            State::Autoplay { .. } => TimerCommand::Keep,
        }
    }

    /// Jump straight to a content item (indicator dot). Out of range is ignored.
    pub fn select_item(&mut self, item: usize) -> TimerCommand {
        if let State::Autoplay { index } = &mut self.state {
            if item < self.section.content.len() {
                *index = item;
            }
        }
        TimerCommand::Keep
    }

    /// A timer armed for `generation` fired.
    pub fn on_timer(&mut self, generation: u64) -> TimerCommand {
        if generation != self.generation {
            log::debug!("ignoring stale carousel timer {generation}");
            return TimerCommand::Keep;
        }
        match &mut self.state {
            State::Reveal(state) => {
                *state = RevealState::Revealed;
                self.generation += 1;
                TimerCommand::Cancel
            }
            State::Autoplay { index } => {
                *index = (*index + 1) % self.section.content.len();
                TimerCommand::Keep
            }
        }
    }

    pub fn view(&self) -> DisplayView {
        let content = self.section.content;
        match self.state {
            State::Reveal(RevealState::TitleOnly) => DisplayView {
                title: self.section.title,
                items: Vec::new(),
                dots: None,
                revealed: false,
            },
            State::Reveal(RevealState::Revealed) => DisplayView {
                title: self.section.title,
                items: content.to_vec(),
                dots: None,
                revealed: true,
            },
            State::Autoplay { index } => DisplayView {
                title: self.section.title,
                items: content.get(index).copied().into_iter().collect(),
                dots: (content.len() > 1).then_some((content.len(), index)),
                revealed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SECTIONS;

    fn armed_generation(cmd: TimerCommand) -> u64 {
        match cmd {
            TimerCommand::Arm { generation, .. } => generation,
            other => panic!("expected Arm, got {other:?}"),
        }
    }

    #[test]
    fn test_reveal_starts_title_only_and_arms_one_shot() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        let cmd = c.set_section(1);
        assert_eq!(
            cmd,
            TimerCommand::Arm { generation: 1, delay_ms: 1000, repeat: false }
        );
        assert_eq!(c.reveal_state(), Some(RevealState::TitleOnly));
        let view = c.view();
        assert_eq!(view.title, "Work");
        assert!(view.items.is_empty());
        assert!(!view.revealed);
    }

    #[test]
    fn test_reveal_timer_expiry_reveals_everything() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        let generation = armed_generation(c.set_section(2));
        assert_eq!(c.on_timer(generation), TimerCommand::Cancel);
        assert_eq!(c.reveal_state(), Some(RevealState::Revealed));
        assert_eq!(c.view().items, SECTIONS[2].content.to_vec());
    }

    #[test]
    fn test_reveal_click_toggles() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        let generation = armed_generation(c.set_section(0));
        assert_eq!(c.click(), TimerCommand::Cancel);
        assert_eq!(c.reveal_state(), Some(RevealState::Revealed));
        assert_eq!(c.click(), TimerCommand::Keep);
        assert_eq!(c.reveal_state(), Some(RevealState::TitleOnly));
        // The original reveal timer was superseded by the click.
        c.on_timer(generation);
        assert_eq!(c.reveal_state(), Some(RevealState::TitleOnly));
    }

    #[test]
    fn test_section_change_resets_reveal_immediately() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        c.set_section(0);
        c.click();
        assert_eq!(c.reveal_state(), Some(RevealState::Revealed));
        let cmd = c.set_section(3);
        assert_eq!(c.reveal_state(), Some(RevealState::TitleOnly));
        assert!(matches!(cmd, TimerCommand::Arm { repeat: false, .. }));
    }

    #[test]
    fn test_stale_timer_ignored_after_section_change() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        let old = armed_generation(c.set_section(0));
        let new = armed_generation(c.set_section(1));
        assert_ne!(old, new);
        assert_eq!(c.on_timer(old), TimerCommand::Keep);
        assert_eq!(c.reveal_state(), Some(RevealState::TitleOnly));
        c.on_timer(new);
        assert_eq!(c.reveal_state(), Some(RevealState::Revealed));
    }

    #[test]
    fn test_autoplay_wraps_and_stays_in_bounds() {
        let mut c = Carousel::new(CarouselMode::Autoplay, CarouselTimings::default());
        let cmd = c.set_section(0);
        assert!(matches!(cmd, TimerCommand::Arm { delay_ms: 4000, repeat: true, .. }));
        let generation = armed_generation(cmd);
        let len = c.section().content.len();
        for step in 1..=(len * 3) {
            assert_eq!(c.on_timer(generation), TimerCommand::Keep);
            let index = c.content_index().unwrap();
            assert!(index < len);
            assert_eq!(index, step % len);
        }
    }

    #[test]
    fn test_autoplay_dot_jump_and_section_reset() {
        let mut c = Carousel::new(CarouselMode::Autoplay, CarouselTimings::default());
        c.set_section(1);
        c.select_item(3);
        assert_eq!(c.content_index(), Some(3));
        assert_eq!(c.view().dots, Some((4, 3)));
        assert_eq!(c.view().items, vec!["2020 - Present"]);

        c.select_item(42);
        assert_eq!(c.content_index(), Some(3));

        c.set_section(2);
        assert_eq!(c.content_index(), Some(0));
    }

    #[test]
    fn test_autoplay_ignores_display_click() {
        let mut c = Carousel::new(CarouselMode::Autoplay, CarouselTimings::default());
        c.set_section(0);
        assert_eq!(c.click(), TimerCommand::Keep);
        assert_eq!(c.content_index(), Some(0));
        assert_eq!(c.reveal_state(), None);
    }

    #[test]
    fn test_out_of_range_section_uses_first() {
        let mut c = Carousel::new(CarouselMode::Reveal, CarouselTimings::default());
        c.set_section(-1);
        assert_eq!(c.section().title, "Overview");
        c.set_section(17);
        assert_eq!(c.section().title, "Overview");
    }

    #[test]
    fn test_custom_timings_flow_into_commands() {
        let timings = CarouselTimings { reveal_delay_ms: 500, autoplay_interval_ms: 2500 };
        let mut reveal = Carousel::new(CarouselMode::Reveal, timings);
        assert!(matches!(reveal.set_section(0), TimerCommand::Arm { delay_ms: 500, .. }));
        let mut auto = Carousel::new(CarouselMode::Autoplay, timings);
        assert!(matches!(auto.set_section(0), TimerCommand::Arm { delay_ms: 2500, .. }));
    }
}
