//! Shader stages and where their sources come from.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::video::errors::{Error, Result};

/// The programmable stages of the OpenGL pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    /// Guesses the stage from the file extensions used by the glslang reference compiler
    /// (`.vert`, `.tesc`, `.tese`, `.geom`, `.frag` and `.comp`).
    pub fn from_extension(ext: &str) -> Option<ShaderStage> {
        match ext {
            "vert" | "vs" => Some(ShaderStage::Vertex),
            "tesc" => Some(ShaderStage::TessControl),
            "tese" => Some(ShaderStage::TessEvaluation),
            "geom" | "gs" => Some(ShaderStage::Geometry),
            "frag" | "fs" => Some(ShaderStage::Fragment),
            "comp" => Some(ShaderStage::Compute),
            _ => None,
        }
    }

    /// Compute shaders can not be linked together with any of the graphics stages.
    #[inline]
    pub fn is_compute(self) -> bool {
        self == ShaderStage::Compute
    }
}

impl Into<&'static str> for ShaderStage {
    fn into(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tess_control",
            ShaderStage::TessEvaluation => "tess_evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &'static str = (*self).into();
        write!(f, "{}", name)
    }
}

impl FromStr for ShaderStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vertex" => Ok(ShaderStage::Vertex),
            "tess_control" => Ok(ShaderStage::TessControl),
            "tess_evaluation" => Ok(ShaderStage::TessEvaluation),
            "geometry" => Ok(ShaderStage::Geometry),
            "fragment" => Ok(ShaderStage::Fragment),
            "compute" => Ok(ShaderStage::Compute),
            _ => Err(Error::StageUndefined(s.into())),
        }
    }
}

/// Where the text of a stage lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// A file on disk. Relative paths are resolved against the builder's root.
    File(PathBuf),
    /// Text that is already in memory, labelled for diagnostics.
    Memory { label: String, text: String },
}

impl ShaderSource {
    /// Reads the source text. Memory sources are borrowed as-is; file sources are joined with
    /// `root` when they are relative.
    pub fn read(&self, root: Option<&Path>) -> io::Result<Cow<str>> {
        match *self {
            ShaderSource::File(ref path) => {
                let path = ShaderSource::resolve(path, root);
                fs::read_to_string(path).map(Cow::Owned)
            }
            ShaderSource::Memory { ref text, .. } => Ok(Cow::Borrowed(text.as_str())),
        }
    }

    pub fn resolve(path: &Path, root: Option<&Path>) -> PathBuf {
        match root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_owned(),
        }
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderSource::File(ref path) => write!(f, "{}", path.display()),
            ShaderSource::Memory { ref label, .. } => write!(f, "<{}>", label),
        }
    }
}

/// One stage of a program that is about to be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub stage: ShaderStage,
    pub source: ShaderSource,
}

impl StageSpec {
    pub fn file<P: Into<PathBuf>>(stage: ShaderStage, path: P) -> Self {
        StageSpec {
            stage,
            source: ShaderSource::File(path.into()),
        }
    }

    pub fn memory<T1, T2>(stage: ShaderStage, label: T1, text: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        StageSpec {
            stage,
            source: ShaderSource::Memory {
                label: label.into(),
                text: text.into(),
            },
        }
    }

    /// Creates a file based spec whose stage is deduced from the extension of `path`.
    pub fn infer<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let stage = path
            .extension()
            .and_then(|v| v.to_str())
            .and_then(ShaderStage::from_extension)
            .ok_or_else(|| Error::StageUndefined(format!("{}", path.display())))?;

        Ok(StageSpec::file(stage, path))
    }
}
