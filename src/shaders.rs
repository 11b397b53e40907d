//! GLSL ES 3.00 sources for the background.
//!
//! Every fragment shader sees the same inputs: `v_uv` from the shared vertex
//! stage, `u_resolution` in device pixels, `u_time` in seconds and `u_pointer`
//! normalized to the canvas with the origin at the top-left corner.

/// Shared vertex shader: passes the quad corners through.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
in vec2 a_texcoord;

out vec2 v_uv;

void main() {
    v_uv = a_texcoord;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

/// Soft aurora bands drifting toward the pointer.
pub const FRAGMENT_AURORA: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 fragColor;

uniform vec2 u_resolution;
uniform float u_time;
uniform vec2 u_pointer;
uniform bool u_reserved0;
uniform bool u_reserved1;
uniform bool u_reserved2;

void main() {
    vec2 p = (gl_FragCoord.xy - 0.5 * u_resolution) / min(u_resolution.x, u_resolution.y);
    vec2 m = vec2(u_pointer.x - 0.5, 0.5 - u_pointer.y);

    float band = 0.0;
    for (int i = 0; i < 4; i++) {
        float fi = float(i);
        float y = 0.25 * sin(p.x * (1.5 + fi * 0.7) + u_time * (0.3 + fi * 0.1) + m.x * 2.0);
        band += 0.012 / abs(p.y - y + m.y * 0.3 - 0.15 * (fi - 1.5));
    }

    vec3 col = band * mix(vec3(0.1, 0.8, 0.6), vec3(0.5, 0.3, 0.9), v_uv.x);
    fragColor = vec4(col, clamp(band, 0.0, 1.0));
}
"#;

/// Classic sine plasma.
pub const FRAGMENT_PLASMA: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 fragColor;

uniform vec2 u_resolution;
uniform float u_time;
uniform vec2 u_pointer;
uniform bool u_reserved0;
uniform bool u_reserved1;
uniform bool u_reserved2;

void main() {
    vec2 p = gl_FragCoord.xy / min(u_resolution.x, u_resolution.y) * 4.0;
    vec2 m = u_pointer * 4.0;
    float t = u_time * 0.5;

    float v = sin(p.x + t);
    v += sin((p.y + t) * 0.5);
    v += sin((p.x + p.y + t) * 0.5);
    v += sin(length(p - m) * 1.5 - t);
    v *= 0.5;

    vec3 col = 0.5 + 0.5 * cos(3.14159 * v + vec3(0.0, 2.0, 4.0));
    fragColor = vec4(col * 0.6, 1.0);
}
"#;

/// Concentric rings rippling out from the pointer.
pub const FRAGMENT_RINGS: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 fragColor;

uniform vec2 u_resolution;
uniform float u_time;
uniform vec2 u_pointer;
uniform bool u_reserved0;
uniform bool u_reserved1;
uniform bool u_reserved2;

void main() {
    float scale = min(u_resolution.x, u_resolution.y);
    vec2 p = gl_FragCoord.xy / scale;
    vec2 m = vec2(u_pointer.x, 1.0 - u_pointer.y) * u_resolution / scale;

    float d = length(p - m);
    float ring = 0.5 + 0.5 * sin(d * 40.0 - u_time * 3.0);
    ring *= exp(-d * 2.5);

    vec3 col = ring * vec3(0.95, 0.55, 0.2);
    fragColor = vec4(col, ring);
}
"#;

/// Layered value noise drifting like a nebula.
pub const FRAGMENT_NEBULA: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 fragColor;

uniform vec2 u_resolution;
uniform float u_time;
uniform vec2 u_pointer;
uniform bool u_reserved0;
uniform bool u_reserved1;
uniform bool u_reserved2;

float hash(vec2 p) {
    return fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453);
}

float noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    vec2 u = f * f * (3.0 - 2.0 * f);
    return mix(mix(hash(i), hash(i + vec2(1.0, 0.0)), u.x),
               mix(hash(i + vec2(0.0, 1.0)), hash(i + vec2(1.0, 1.0)), u.x), u.y);
}

float fbm(vec2 p) {
    float v = 0.0;
    float a = 0.5;
    for (int i = 0; i < 5; i++) {
        v += a * noise(p);
        p *= 2.0;
        a *= 0.5;
    }
    return v;
}

void main() {
    vec2 p = gl_FragCoord.xy / min(u_resolution.x, u_resolution.y) * 3.0;
    vec2 drift = vec2(u_time * 0.05, u_time * 0.03) + (u_pointer - 0.5) * 0.5;
    float n = fbm(p + fbm(p + drift));

    vec3 col = mix(vec3(0.05, 0.02, 0.15), vec3(0.8, 0.3, 0.6), n);
    col = mix(col, vec3(0.2, 0.6, 0.9), smoothstep(0.6, 0.9, n));
    fragColor = vec4(col, 1.0);
}
"#;
