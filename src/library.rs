//! The fixed table of selectable background shaders.

use crate::shaders::{FRAGMENT_AURORA, FRAGMENT_NEBULA, FRAGMENT_PLASMA, FRAGMENT_RINGS};

pub use crate::shaders::VERTEX_SHADER;

/// One selectable background.
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderDefinition {
    pub id: i32,
    pub name: &'static str,
    pub fragment_source: &'static str,
}

/// Ordered shader table. Ids line up with section indices as `id - 1`.
pub static SHADERS: &[ShaderDefinition] = &[
    ShaderDefinition {
        id: 1,
        name: "Aurora",
        fragment_source: FRAGMENT_AURORA,
    },
    ShaderDefinition {
        id: 2,
        name: "Plasma",
        fragment_source: FRAGMENT_PLASMA,
    },
    ShaderDefinition {
        id: 3,
        name: "Rings",
        fragment_source: FRAGMENT_RINGS,
    },
    ShaderDefinition {
        id: 4,
        name: "Nebula",
        fragment_source: FRAGMENT_NEBULA,
    },
];

/// Look up a shader by id, falling back to the first entry.
pub fn shader_by_id(id: i32) -> &'static ShaderDefinition {
    SHADERS.iter().find(|s| s.id == id).unwrap_or(&SHADERS[0])
}
