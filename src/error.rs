//! Error types.

use thiserror::Error;

/// Which shader stage failed to compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures of one shader canvas initialization. None of them are fatal to
/// the rest of the page.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("WebGL2 not supported")]
    ContextUnavailable,

    #[error("unable to create {0} shader object")]
    CreateShader(ShaderStage),

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("unable to create program object")]
    CreateProgram,

    #[error("program failed to link: {0}")]
    Link(String),

    #[error("unable to create {0} buffer")]
    CreateBuffer(&'static str),

    #[error("canvas call failed: {0}")]
    Js(String),
}

/// Failures while mounting the page.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no {0}")]
    Missing(&'static str),

    #[error("element #{0} not found")]
    ElementNotFound(String),

    #[error("DOM call failed: {0}")]
    Js(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
