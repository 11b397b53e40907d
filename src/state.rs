//! Selected shader and section, and their persistence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shader id used when nothing usable was persisted.
pub const DEFAULT_SHADER_ID: i32 = 1;

/// Key-value persistence for the selected shader id.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// In-memory store, shared between clones. Used when the browser has no
/// local storage and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Parse a persisted shader id. Absent or unparsable values yield the default.
///
/// The whole trimmed value must be an integer: `"3abc"` yields the default,
/// where a lenient leading-digits parse (JavaScript's `parseInt`) would give 3.
pub fn parse_shader_id(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(DEFAULT_SHADER_ID)
}

/// The single source of truth for which shader and section are active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppState {
    pub shader_id: i32,
    pub section_id: i32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::for_shader(DEFAULT_SHADER_ID)
    }
}

impl AppState {
    /// State for shader `id`; the section is always `id - 1`.
    pub fn for_shader(id: i32) -> Self {
        Self {
            shader_id: id,
            section_id: id.saturating_sub(1),
        }
    }

    /// Initial state from whatever the store holds under `key`.
    pub fn restore(store: &dyn PreferenceStore, key: &str) -> Self {
        Self::for_shader(parse_shader_id(store.load(key).as_deref()))
    }

    /// Select shader `id` and persist it. Returns whether the shader changed.
    pub fn select(&mut self, id: i32, store: &dyn PreferenceStore, key: &str) -> bool {
        let changed = self.shader_id != id;
        *self = Self::for_shader(id);
        store.save(key, &id.to_string());
        changed
    }
}
