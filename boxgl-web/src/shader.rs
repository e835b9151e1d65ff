/// Shader compilation and program linking
///
/// Turns the two GLSL source strings into a linked, ready-to-bind
/// program, or fails with the compiler/linker diagnostic. Failures here
/// are fatal to scene setup; there is no fallback shader.
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader};

/// One compilation unit of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => Gl::VERTEX_SHADER,
            ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Setup-time failures while building the shader program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("could not link shader program: {log}")]
    Link { log: String },
    #[error("context failed to allocate a {0} object")]
    Alloc(&'static str),
}

impl From<ShaderError> for JsValue {
    fn from(err: ShaderError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Compile one shader stage.
///
/// On failure the half-built shader object is deleted and the
/// compiler's info log is returned; a handle is only ever returned for
/// a fully compiled stage.
pub fn compile_shader(
    gl: &Gl,
    stage: ShaderStage,
    source: &str,
) -> Result<WebGlShader, ShaderError> {
    let shader = gl
        .create_shader(stage.gl_enum())
        .ok_or(ShaderError::Alloc("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| String::from("no info log available"));
        gl.delete_shader(Some(&shader));
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// Link two compiled stages into a program.
pub fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, ShaderError> {
    let program = gl.create_program().ok_or(ShaderError::Alloc("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| String::from("no info log available"));
        gl.delete_program(Some(&program));
        return Err(ShaderError::Link { log });
    }

    Ok(program)
}

/// Compile both stages and link them, propagating either failure
/// unchanged.
///
/// The shader and program objects allocated here live as long as the
/// context; a single long-lived program never releases them.
pub fn create_program(
    gl: &Gl,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<WebGlProgram, ShaderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = compile_shader(gl, ShaderStage::Fragment, fragment_source)?;
    link_program(gl, &vertex, &fragment)
}

/// Vertex stage for the cube: position and color attributes, the
/// model/view/projection triple as uniforms.
pub const VERTEX_SHADER_SOURCE: &str = r#"#version 300 es

in vec4 a_position;
in vec4 a_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec4 v_color;

void main() {
    v_color = a_color;
    gl_Position = u_projection * u_view * u_model * a_position;
}
"#;

/// Fragment stage: the interpolated per-vertex color, flat per face
/// because every vertex of a face carries the same color.
pub const FRAGMENT_SHADER_SOURCE: &str = r#"#version 300 es
precision mediump float;

in vec4 v_color;
out vec4 out_color;

void main() {
    out_color = v_color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_reports_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: String::from("0:3: 'vec5' : syntax error"),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("syntax error"));
    }

    #[test]
    fn test_link_error_reports_log() {
        let err = ShaderError::Link {
            log: String::from("varying v_color not declared in fragment stage"),
        };
        assert!(err.to_string().contains("v_color"));
    }

    #[test]
    fn test_sources_declare_expected_names() {
        for name in ["a_position", "a_color", "u_model", "u_view", "u_projection"] {
            assert!(VERTEX_SHADER_SOURCE.contains(name), "missing {name}");
        }
        // The varying must appear in both stages or linking fails
        assert!(VERTEX_SHADER_SOURCE.contains("v_color"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("v_color"));
    }

    #[test]
    fn test_sources_start_with_version_directive() {
        // GLSL requires #version on the very first line
        assert!(VERTEX_SHADER_SOURCE.starts_with("#version 300 es"));
        assert!(FRAGMENT_SHADER_SOURCE.starts_with("#version 300 es"));
    }
}
