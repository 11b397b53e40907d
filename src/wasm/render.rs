//! WebGL2 plumbing: program compilation, the per-epoch GPU resources and the
//! `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::error::{CanvasError, ShaderStage};
use crate::lease::{Lease, Leases};
use crate::library::VERTEX_SHADER;
use crate::render::{
    EpochKey, RenderUniforms, ATTR_POSITION, ATTR_TEXCOORD, COMPONENTS_PER_VERTEX, QUAD_INDICES,
    QUAD_POSITIONS, QUAD_TEXCOORDS, UNIFORM_POINTER, UNIFORM_RESERVED, UNIFORM_RESOLUTION,
    UNIFORM_TIME,
};

/// Compile one stage. The shader object is deleted when compilation fails.
pub fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, CanvasError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl.create_shader(kind).ok_or(CanvasError::CreateShader(stage))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_shader(Some(&shader));
        Err(CanvasError::Compile { stage, log })
    }
}

/// Compile both stages and link them. Shader objects never outlive this call
/// and a program that failed to link is deleted.
pub fn link_program(gl: &GL, fragment_source: &str) -> Result<WebGlProgram, CanvasError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, VERTEX_SHADER)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(Some(&vertex));
            return Err(e);
        }
    };

    let linked = gl.create_program().ok_or(CanvasError::CreateProgram).and_then(|program| {
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);

        if gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            gl.detach_shader(&program, &vertex);
            gl.detach_shader(&program, &fragment);
            Ok(program)
        } else {
            let log = gl
                .get_program_info_log(&program)
                .unwrap_or_else(|| "unknown error".to_string());
            gl.delete_program(Some(&program));
            Err(CanvasError::Link(log))
        }
    });

    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    linked
}

/// Attribute and uniform locations of one linked program.
///
/// Inputs the linker optimized away resolve to `None` and are skipped.
pub struct ProgramLocations {
    position: Option<u32>,
    texcoord: Option<u32>,
    resolution: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    pointer: Option<WebGlUniformLocation>,
    reserved: [Option<WebGlUniformLocation>; 3],
}

impl ProgramLocations {
    fn resolve(gl: &GL, program: &WebGlProgram) -> Self {
        let attrib = |name: &str| u32::try_from(gl.get_attrib_location(program, name)).ok();
        let uniform = |name: &str| gl.get_uniform_location(program, name);
        Self {
            position: attrib(ATTR_POSITION),
            texcoord: attrib(ATTR_TEXCOORD),
            resolution: uniform(UNIFORM_RESOLUTION),
            time: uniform(UNIFORM_TIME),
            pointer: uniform(UNIFORM_POINTER),
            reserved: UNIFORM_RESERVED.map(uniform),
        }
    }
}

/// The three static buffers of the full-screen quad.
struct QuadBuffers {
    position: WebGlBuffer,
    texcoord: WebGlBuffer,
    indices: WebGlBuffer,
}

impl QuadBuffers {
    fn create(gl: &GL) -> Result<Self, CanvasError> {
        let positions = js_sys::Float32Array::from(&QUAD_POSITIONS[..]);
        let texcoords = js_sys::Float32Array::from(&QUAD_TEXCOORDS[..]);
        let index_data = js_sys::Uint16Array::from(&QUAD_INDICES[..]);

        let position = static_buffer(gl, GL::ARRAY_BUFFER, &positions, "position")?;
        let texcoord = match static_buffer(gl, GL::ARRAY_BUFFER, &texcoords, "texture coordinate") {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.delete_buffer(Some(&position));
                return Err(e);
            }
        };
        let indices = match static_buffer(gl, GL::ELEMENT_ARRAY_BUFFER, &index_data, "index") {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.delete_buffer(Some(&position));
                gl.delete_buffer(Some(&texcoord));
                return Err(e);
            }
        };
        Ok(Self { position, texcoord, indices })
    }

    fn delete(&self, gl: &GL) {
        gl.delete_buffer(Some(&self.position));
        gl.delete_buffer(Some(&self.texcoord));
        gl.delete_buffer(Some(&self.indices));
    }
}

fn static_buffer(gl: &GL, target: u32, data: &js_sys::Object, label: &'static str) -> Result<WebGlBuffer, CanvasError> {
    let buffer = gl.create_buffer().ok_or(CanvasError::CreateBuffer(label))?;
    gl.bind_buffer(target, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(target, data, GL::STATIC_DRAW);
    gl.bind_buffer(target, None);
    Ok(buffer)
}

/// GPU resources of one initialization epoch. Dropping it deletes the
/// program and buffers.
pub struct RenderEpoch {
    gl: GL,
    key: EpochKey,
    program: WebGlProgram,
    locations: ProgramLocations,
    buffers: QuadBuffers,
}

impl RenderEpoch {
    /// Build the epoch for `key`, drawing `fragment_source`.
    pub fn with_source(gl: &GL, key: EpochKey, fragment_source: &str) -> Result<Self, CanvasError> {
        let program = link_program(gl, fragment_source)?;
        let buffers = match QuadBuffers::create(gl) {
            Ok(buffers) => buffers,
            Err(e) => {
                gl.delete_program(Some(&program));
                return Err(e);
            }
        };
        let locations = ProgramLocations::resolve(gl, &program);
        log::debug!("epoch ready: shader {} at {}x{}", key.shader_id, key.width, key.height);
        Ok(Self {
            gl: gl.clone(),
            key,
            program,
            locations,
            buffers,
        })
    }

    pub fn key(&self) -> EpochKey {
        self.key
    }

    pub fn draw(&self, uniforms: &RenderUniforms) {
        let gl = &self.gl;
        let loc = &self.locations;

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear_depth(1.0);
        gl.enable(GL::DEPTH_TEST);
        gl.depth_func(GL::LEQUAL);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform2f(loc.resolution.as_ref(), uniforms.resolution[0], uniforms.resolution[1]);
        gl.uniform1f(loc.time.as_ref(), uniforms.time);
        gl.uniform2f(loc.pointer.as_ref(), uniforms.pointer[0], uniforms.pointer[1]);
        for (location, flag) in loc.reserved.iter().zip(uniforms.reserved) {
            gl.uniform1i(location.as_ref(), i32::from(flag));
        }

        for (buffer, attribute) in [(&self.buffers.position, loc.position), (&self.buffers.texcoord, loc.texcoord)] {
            let Some(attribute) = attribute else { continue };
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
            gl.vertex_attrib_pointer_with_i32(attribute, COMPONENTS_PER_VERTEX, GL::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(attribute);
        }

        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&self.buffers.indices));
        gl.draw_elements_with_i32(GL::TRIANGLES, QUAD_INDICES.len() as i32, GL::UNSIGNED_SHORT, 0);
    }
}

impl Drop for RenderEpoch {
    fn drop(&mut self) {
        self.gl.use_program(None);
        self.gl.delete_program(Some(&self.program));
        self.buffers.delete(&self.gl);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-rescheduling `requestAnimationFrame` chain.
///
/// The chain holds a [`Lease`]; stopping revokes it, cancels the pending
/// frame and drops the callback, so a stopped loop can never draw again.
pub struct FrameLoop {
    leases: Leases,
    lease: Lease,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(leases: &Leases, mut step: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let lease = leases.issue();
        let pending = Rc::new(Cell::new(None));

        // The closure reschedules itself through a weak handle so that
        // dropping the loop frees it.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let weak_callback = Rc::downgrade(&callback);
        let frame_lease = lease.clone();
        let frame_pending = Rc::clone(&pending);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_pending.set(None);
            if !frame_lease.is_live() {
                return;
            }
            step();

            let (Some(window), Some(callback)) = (web_sys::window(), weak_callback.upgrade()) else {
                return;
            };
            let next = callback
                .borrow()
                .as_ref()
                .map(|f| window.request_animation_frame(f.as_ref().unchecked_ref()));
            match next {
                Some(Ok(id)) => frame_pending.set(Some(id)),
                Some(Err(e)) => log::error!("unable to schedule frame: {e:?}"),
                None => {}
            }
        }) as Box<dyn FnMut()>));

        let window = web_sys::window().ok_or("no window")?;
        let first = window.request_animation_frame(
            callback
                .borrow()
                .as_ref()
                .ok_or("frame callback missing")?
                .as_ref()
                .unchecked_ref(),
        )?;
        pending.set(Some(first));

        Ok(Self {
            leases: leases.clone(),
            lease,
            pending,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        self.lease.is_live() && self.callback.borrow().is_some()
    }

    pub fn stop(&mut self) {
        if self.lease.is_live() {
            self.leases.revoke();
        }
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("unable to cancel frame {id}: {e:?}");
                }
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
