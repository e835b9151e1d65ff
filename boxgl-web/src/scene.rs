/// Cube scene driver: owns the program, buffers, and per-frame state
use boxgl_core::{Animation, Camera, CubeGeometry};
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsValue;
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::shader::{create_program, FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

/// Everything the render loop needs, built once at setup.
///
/// Geometry is uploaded to three STATIC_DRAW buffers here and reused
/// every frame; the draw path never allocates GPU objects.
pub struct CubeScene {
    gl: Gl,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    // Held so the buffers outlive the VAO that references them
    _position_buffer: WebGlBuffer,
    _color_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
    model_location: WebGlUniformLocation,
    view_location: WebGlUniformLocation,
    projection_location: WebGlUniformLocation,
    index_count: i32,
    camera: Camera,
    animation: Animation,
}

impl CubeScene {
    /// Build the program, upload the cube, and resolve every location
    /// the draw path needs. Any failure here aborts scene construction;
    /// the render loop must never start from a partial setup.
    pub fn new(gl: Gl, geometry: &CubeGeometry, width: u32, height: u32) -> Result<Self, JsValue> {
        let program = create_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)?;
        gl.use_program(Some(&program));

        let position_location: u32 = gl
            .get_attrib_location(&program, "a_position")
            .try_into()
            .map_err(|_| js_error("a_position attribute missing"))?;
        let color_location: u32 = gl
            .get_attrib_location(&program, "a_color")
            .try_into()
            .map_err(|_| js_error("a_color attribute missing"))?;
        let model_location = uniform_location(&gl, &program, "u_model")?;
        let view_location = uniform_location(&gl, &program, "u_view")?;
        let projection_location = uniform_location(&gl, &program, "u_projection")?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| js_error("failed to create vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let position_buffer =
            upload_f32(&gl, Gl::ARRAY_BUFFER, &geometry.positions)?;
        gl.enable_vertex_attrib_array(position_location);
        gl.vertex_attrib_pointer_with_i32(position_location, 3, Gl::FLOAT, false, 0, 0);

        let color_buffer = upload_f32(&gl, Gl::ARRAY_BUFFER, &geometry.colors)?;
        gl.enable_vertex_attrib_array(color_location);
        gl.vertex_attrib_pointer_with_i32(color_location, 4, Gl::FLOAT, false, 0, 0);

        // The element binding is captured by the VAO
        let index_buffer = upload_u16(&gl, Gl::ELEMENT_ARRAY_BUFFER, &geometry.indices)?;
        gl.bind_vertex_array(None);

        gl.enable(Gl::DEPTH_TEST);
        gl.depth_func(Gl::LEQUAL);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);

        let mut scene = Self {
            gl,
            program,
            vao,
            _position_buffer: position_buffer,
            _color_buffer: color_buffer,
            _index_buffer: index_buffer,
            model_location,
            view_location,
            projection_location,
            index_count: geometry.index_count() as i32,
            camera: Camera::new(width, height),
            animation: Animation::default(),
        };
        scene.resize(width, height);
        Ok(scene)
    }

    /// Track a viewport change; the camera clamps zero dimensions so a
    /// minimized window cannot produce a degenerate projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gl
            .viewport(0, 0, width.max(1) as i32, height.max(1) as i32);
        self.camera.set_viewport(width, height);
    }

    /// Render one frame at timestamp `now_ms` (the DOMHighResTimeStamp
    /// handed to the animation-frame callback).
    pub fn draw(&mut self, now_ms: f64) {
        let frame = self.animation.frame(now_ms as f32, &mut self.camera);

        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&self.model_location), false, &frame.model);
        gl.uniform_matrix4fv_with_f32_array(Some(&self.view_location), false, &frame.view);
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.projection_location),
            false,
            &frame.projection,
        );

        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(Gl::TRIANGLES, self.index_count, Gl::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

fn uniform_location(
    gl: &Gl,
    program: &WebGlProgram,
    name: &str,
) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| js_error(&format!("{name} uniform missing")))
}

fn upload_f32(gl: &Gl, target: u32, data: &[f32]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| js_error("failed to create buffer"))?;
    gl.bind_buffer(target, Some(&buffer));
    // View is only alive until the next allocation; buffer_data copies
    // it out synchronously
    let view = unsafe { Float32Array::view(data) };
    gl.buffer_data_with_array_buffer_view(target, &view, Gl::STATIC_DRAW);
    Ok(buffer)
}

fn upload_u16(gl: &Gl, target: u32, data: &[u16]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| js_error("failed to create buffer"))?;
    gl.bind_buffer(target, Some(&buffer));
    let view = unsafe { Uint16Array::view(data) };
    gl.buffer_data_with_array_buffer_view(target, &view, Gl::STATIC_DRAW);
    Ok(buffer)
}

fn js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}
