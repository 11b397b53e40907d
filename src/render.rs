//! Data fed to the GPU: the full-screen quad, per-frame uniforms and the key
//! that decides when the GL program has to be rebuilt.

use crate::library::{shader_by_id, ShaderDefinition};

pub const ATTR_POSITION: &str = "a_position";
pub const ATTR_TEXCOORD: &str = "a_texcoord";
pub const UNIFORM_RESOLUTION: &str = "u_resolution";
pub const UNIFORM_TIME: &str = "u_time";
pub const UNIFORM_POINTER: &str = "u_pointer";
pub const UNIFORM_RESERVED: [&str; 3] = ["u_reserved0", "u_reserved1", "u_reserved2"];

/// Quad corners in clip space.
pub const QUAD_POSITIONS: [f32; 8] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    1.0, 1.0, //
    -1.0, 1.0,
];

pub const QUAD_TEXCOORDS: [f32; 8] = [
    0.0, 0.0, //
    1.0, 0.0, //
    1.0, 1.0, //
    0.0, 1.0,
];

/// Two triangles covering the quad.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Components per vertex for both attribute buffers.
pub const COMPONENTS_PER_VERTEX: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub pointer: [f32; 2],
    /// Declared by every shader, currently always false.
    pub reserved: [bool; 3],
}

impl RenderUniforms {
    pub fn new(width: u32, height: u32, elapsed_ms: f64, pointer: [f32; 2]) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: (elapsed_ms.max(0.0) / 1000.0) as f32,
            pointer,
            reserved: [false; 3],
        }
    }
}

/// Inputs that define one initialization epoch of the shader canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochKey {
    pub shader_id: i32,
    pub width: u32,
    pub height: u32,
}

impl EpochKey {
    pub fn shader(&self) -> &'static ShaderDefinition {
        shader_by_id(self.shader_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SHADERS;

    #[test]
    fn test_quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD_POSITIONS.iter().step_by(2).copied().collect();
        let ys: Vec<f32> = QUAD_POSITIONS.iter().skip(1).step_by(2).copied().collect();
        for axis in [xs, ys] {
            assert_eq!(axis.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
            assert_eq!(axis.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
        }
        assert!(QUAD_TEXCOORDS.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn test_texcoords_track_positions() {
        for (pos, tex) in QUAD_POSITIONS.chunks(2).zip(QUAD_TEXCOORDS.chunks(2)) {
            assert_eq!(tex[0], (pos[0] + 1.0) / 2.0);
            assert_eq!(tex[1], (pos[1] + 1.0) / 2.0);
        }
    }

    #[test]
    fn test_indices_form_two_triangles() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 0, 2, 3]);
        let vertices = QUAD_POSITIONS.len() / COMPONENTS_PER_VERTEX as usize;
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < vertices));
    }

    #[test]
    fn test_uniforms_convert_time_and_clear_reserved() {
        let u = RenderUniforms::new(1920, 1080, 2500.0, [0.25, 0.75]);
        assert_eq!(u.resolution, [1920.0, 1080.0]);
        assert_eq!(u.time, 2.5);
        assert_eq!(u.pointer, [0.25, 0.75]);
        assert_eq!(u.reserved, [false; 3]);
        assert_eq!(RenderUniforms::new(1, 1, -5.0, [0.5, 0.5]).time, 0.0);
    }

    #[test]
    fn test_epoch_key_resolves_shader_with_fallback() {
        let key = EpochKey { shader_id: 3, width: 10, height: 10 };
        assert_eq!(key.shader().id, 3);
        let unknown = EpochKey { shader_id: 77, ..key };
        assert_eq!(unknown.shader(), &SHADERS[0]);
        assert_ne!(key, unknown);
    }
}
