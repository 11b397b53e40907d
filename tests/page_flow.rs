#![cfg(not(target_arch = "wasm32"))]

//! Page behaviour driven through the public, browser-free API.

use folio_wasm::carousel::{Carousel, CarouselMode, CarouselTimings, RevealState, TimerCommand};
use folio_wasm::config::SiteConfig;
use folio_wasm::footer::{FooterPhase, FooterSchedule};
use folio_wasm::layout;
use folio_wasm::library::{shader_by_id, SHADERS};
use folio_wasm::render::EpochKey;
use folio_wasm::sections::SECTIONS;
use folio_wasm::state::{AppState, MemoryStore, PreferenceStore};

const KEY: &str = "selectedShader";

struct Page {
    config: SiteConfig,
    store: MemoryStore,
    state: AppState,
    carousel: Carousel,
}

impl Page {
    fn load(store: MemoryStore) -> Self {
        let config = SiteConfig::default();
        let state = AppState::restore(&store, &config.storage_key);
        let mut carousel = Carousel::new(config.carousel_mode, CarouselTimings::default());
        carousel.set_section(state.section_id);
        Self { config, store, state, carousel }
    }

    fn select(&mut self, id: i32) -> bool {
        let changed = self.state.select(id, &self.store, &self.config.storage_key);
        if changed {
            self.carousel.set_section(self.state.section_id);
        }
        changed
    }
}

#[test]
fn every_shader_has_a_matching_section() {
    assert_eq!(SHADERS.len(), SECTIONS.len());
    for shader in SHADERS {
        let state = AppState::for_shader(shader.id);
        assert_eq!(state.section_id, shader.id - 1);
        assert!(!SECTIONS[state.section_id as usize].content.is_empty());
    }
}

#[test]
fn selection_survives_a_reload() {
    let store = MemoryStore::default();
    let mut page = Page::load(store.clone());
    assert_eq!(page.carousel.section().title, "Overview");

    assert!(page.select(3));
    assert_eq!(page.carousel.section().title, "Education");
    assert_eq!(store.load(KEY).as_deref(), Some("3"));

    let reloaded = Page::load(store);
    assert_eq!(reloaded.state, AppState { shader_id: 3, section_id: 2 });
    assert_eq!(reloaded.carousel.section().title, "Education");
}

#[test]
fn garbage_in_storage_falls_back_to_first_shader() {
    let store = MemoryStore::default();
    store.save(KEY, "not-a-number");
    let page = Page::load(store);
    assert_eq!(page.state, AppState { shader_id: 1, section_id: 0 });
    assert_eq!(shader_by_id(page.state.shader_id).name, "Aurora");
}

#[test]
fn reselecting_persists_without_resetting_the_display() {
    let store = MemoryStore::default();
    let mut page = Page::load(store.clone());
    page.carousel.click();
    assert_eq!(page.carousel.reveal_state(), Some(RevealState::Revealed));

    assert!(!page.select(1));
    assert_eq!(store.load(KEY).as_deref(), Some("1"));
    assert_eq!(page.carousel.reveal_state(), Some(RevealState::Revealed));
}

#[test]
fn switching_sections_discards_the_pending_reveal() {
    let mut page = Page::load(MemoryStore::default());
    let first = page.carousel.set_section(0);
    let TimerCommand::Arm { generation: stale, .. } = first else {
        panic!("expected a reveal timer, got {first:?}");
    };

    page.select(2);
    assert_eq!(page.carousel.on_timer(stale), TimerCommand::Keep);
    assert_eq!(page.carousel.reveal_state(), Some(RevealState::TitleOnly));
    assert_eq!(page.carousel.section().title, "Work");
}

#[test]
fn autoplay_rotates_through_the_whole_section() {
    let mut carousel = Carousel::new(CarouselMode::Autoplay, CarouselTimings::default());
    let TimerCommand::Arm { generation, delay_ms, repeat } = carousel.set_section(0) else {
        panic!("autoplay should arm a repeating timer");
    };
    assert_eq!(delay_ms, 4000);
    assert!(repeat);

    let len = carousel.section().content.len();
    let seen: Vec<_> = (0..len)
        .map(|_| {
            let item = carousel.view().items[0];
            carousel.on_timer(generation);
            item
        })
        .collect();
    assert_eq!(seen, carousel.section().content);
    assert_eq!(carousel.content_index(), Some(0));
}

#[test]
fn resize_changes_canvas_and_epoch() {
    let config = SiteConfig::default();
    let before = layout::canvas_size(1000.0, 800.0, config.canvas_ratio);
    let after = layout::canvas_size(1200.0, 600.0, config.canvas_ratio);
    assert!((before - 560.0).abs() < 1e-9);
    assert!((after - 420.0).abs() < 1e-9);

    let (w1, h1) = layout::device_pixels(1000.0, 800.0, 1.0);
    let (w2, h2) = layout::device_pixels(1200.0, 600.0, 1.0);
    let old = EpochKey { shader_id: 1, width: w1, height: h1 };
    let new = EpochKey { shader_id: 1, width: w2, height: h2 };
    assert_ne!(old, new);
    assert_eq!(new.shader().id, 1);
}

#[test]
fn footer_runs_once_through_its_phases() {
    let config = SiteConfig::default();
    let schedule = FooterSchedule {
        delay_ms: config.footer_delay_ms,
        visible_ms: config.footer_visible_ms,
    };
    let phases: Vec<_> = [0.0, 1499.0, 1500.0, 4499.0, 4500.0, 60_000.0]
        .into_iter()
        .map(|t| schedule.phase_at(t))
        .collect();
    assert_eq!(
        phases,
        [
            FooterPhase::Pending,
            FooterPhase::Pending,
            FooterPhase::Visible,
            FooterPhase::Visible,
            FooterPhase::Dismissed,
            FooterPhase::Dismissed,
        ]
    );
}
