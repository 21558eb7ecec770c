use crate::video::assets::prelude::*;

/// Failures reported by a graphics backend.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum Error {
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "OpenGL implementation doesn\'t support {}.", _0)]
    Requirement(String),
    #[fail(display = "{} is invalid.", _0)]
    HandleInvalid(String),
    #[fail(display = "Undefined shader stage \'{}\'.", _0)]
    StageUndefined(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// The reasons a `ProgramBuilder::build` call gives up. Every variant is terminal for that
/// call; none of them leaves a native object behind.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[fail(display = "A program needs at least one shader stage.")]
    NoStages,
    #[fail(display = "Could not create program object.")]
    ProgramCreation,
    #[fail(
        display = "OpenGL implementation doesn\'t support {} shaders (stage #{}).",
        stage, index
    )]
    Unsupported { index: usize, stage: ShaderStage },
    #[fail(display = "OpenGL implementation doesn\'t support separable programs.")]
    SeparableUnsupported,
    #[fail(display = "Could not create {} shader (stage #{}).", stage, index)]
    StageCreation { index: usize, stage: ShaderStage },
    #[fail(display = "Failed to read {} (stage #{}): {}", locator, index, reason)]
    SourceRead {
        index: usize,
        locator: ShaderSource,
        reason: String,
    },
    #[fail(display = "Source of {} contains a nul byte (stage #{}).", locator, index)]
    SourceInvalid { index: usize, locator: ShaderSource },
    #[fail(display = "Failed to compile {} (stage #{}): \n{}", locator, index, log)]
    Compile {
        index: usize,
        locator: ShaderSource,
        log: String,
    },
    #[fail(display = "Failed to link program: \n{}", log)]
    Link { log: String },
    #[fail(display = "{}", _0)]
    Backend(#[cause] Error),
}

impl BuildError {
    /// Position of the offending spec, when the failure belongs to a single stage.
    pub fn stage_index(&self) -> Option<usize> {
        match *self {
            BuildError::Unsupported { index, .. }
            | BuildError::StageCreation { index, .. }
            | BuildError::SourceRead { index, .. }
            | BuildError::SourceInvalid { index, .. }
            | BuildError::Compile { index, .. } => Some(index),
            _ => None,
        }
    }

    /// The diagnostic log of the native compiler or linker, if there is one.
    pub fn log(&self) -> Option<&str> {
        match *self {
            BuildError::Compile { ref log, .. } | BuildError::Link { ref log } => Some(log),
            _ => None,
        }
    }
}

impl From<Error> for BuildError {
    fn from(err: Error) -> Self {
        BuildError::Backend(err)
    }
}
