use gl::types::*;
use std::cmp;
use std::ffi;

use crate::video::assets::prelude::ShaderStage;
use crate::video::errors::{Error, Result};

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Obtains the OpenGL version of the current context using the loaded functions.
    ///
    /// # Unsafe
    ///
    /// You must ensure that the functions belong to the current context, otherwise you will get
    /// an undefined behavior.
    pub unsafe fn parse() -> Result<Version> {
        let desc = parse_str(gl::VERSION)?;
        Version::parse_str(&desc)
    }

    /// Parses the string returned by `glGetString(GL_VERSION)`, e.g. `"4.1 Metal - 76.3"` or
    /// `"OpenGL ES 3.2 Mesa 20.0.8"`.
    pub fn parse_str(desc: &str) -> Result<Version> {
        let malformed = || Error::Backend(format!("[GL] Version string \'{}\' is malformed.", desc));

        let (es, desc) = if desc.starts_with("OpenGL ES-") {
            // "OpenGL ES-CM 1.1" and friends carry the profile before the number.
            let rest = &desc["OpenGL ES-".len()..];
            (true, rest.splitn(2, ' ').nth(1).ok_or_else(malformed)?)
        } else if desc.starts_with("OpenGL ES ") {
            (true, &desc["OpenGL ES ".len()..])
        } else {
            (false, desc)
        };

        let desc = desc.trim_start().split(' ').next().ok_or_else(malformed)?;

        let mut iter = desc.split('.');
        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;
        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
        /// Contains data about the list of extensions.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

        impl Extensions {
            /// Builds the flags from a list of extension names.
            pub fn from_names<'a, T>(names: T) -> Extensions
            where
                T: IntoIterator<Item = &'a str>,
            {
                let mut extensions = Extensions::default();
                for name in names {
                    match name {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => ()
                    }
                }

                extensions
            }

            /// Returns the list of extensions supported by the current context.
            ///
            /// *Safety*: the OpenGL context corresponding to `gl` must be current in the thread.
            pub unsafe fn parse(version: Version) -> Result<Extensions> {
                let strings: Vec<String> = if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                    let mut num_extensions = 0;
                    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);

                    let mut strings = Vec::with_capacity(num_extensions.max(0) as usize);
                    for i in 0..num_extensions {
                        let ext = gl::GetStringi(gl::EXTENSIONS, i as GLuint);
                        if !ext.is_null() {
                            let ext = ffi::CStr::from_ptr(ext as *const _);
                            strings.push(ext.to_string_lossy().into_owned());
                        }
                    }

                    strings
                } else {
                    parse_str(gl::EXTENSIONS)?.split(' ').map(|e| e.to_owned()).collect()
                };

                Ok(Extensions::from_names(strings.iter().map(|v| v.as_str())))
            }
        }
    }
}

extensions! {
    "GL_ARB_shader_objects" => gl_arb_shader_objects,
    "GL_ARB_vertex_shader" => gl_arb_vertex_shader,
    "GL_ARB_fragment_shader" => gl_arb_fragment_shader,
    "GL_ARB_geometry_shader4" => gl_arb_geometry_shader4,
    "GL_ARB_tessellation_shader" => gl_arb_tessellation_shader,
    "GL_ARB_compute_shader" => gl_arb_compute_shader,
    "GL_ARB_separate_shader_objects" => gl_arb_separate_shader_objects,
}

/// Represents the capabilities of the context.
///
/// Contrary to the state, these values never change.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Returns a version or release number. Vendor-specific information may follow the version
    /// number.
    pub version: Version,

    /// The company responsible for this GL implementation.
    pub vendor: String,

    /// The name of the renderer. This name is typically specific to a particular
    /// configuration of a hardware platform.
    pub renderer: String,

    /// The list of OpenGL extensions support by this implementation.
    pub extensions: Extensions,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;

        Ok(Capabilities {
            version,
            extensions,
            vendor: parse_str(gl::VENDOR)?,
            renderer: parse_str(gl::RENDERER)?,
        })
    }

    pub fn has_shader_objects(&self) -> bool {
        self.version >= Version::GL(2, 0)
            || self.version >= Version::ES(2, 0)
            || (self.extensions.gl_arb_shader_objects
                && self.extensions.gl_arb_vertex_shader
                && self.extensions.gl_arb_fragment_shader)
    }

    pub fn has_stage(&self, stage: ShaderStage) -> bool {
        match stage {
            ShaderStage::Vertex | ShaderStage::Fragment => self.has_shader_objects(),
            ShaderStage::Geometry => {
                self.version >= Version::GL(3, 2)
                    || self.version >= Version::ES(3, 2)
                    || self.extensions.gl_arb_geometry_shader4
            }
            ShaderStage::TessControl | ShaderStage::TessEvaluation => {
                self.version >= Version::GL(4, 0)
                    || self.version >= Version::ES(3, 2)
                    || self.extensions.gl_arb_tessellation_shader
            }
            ShaderStage::Compute => {
                self.version >= Version::GL(4, 3)
                    || self.version >= Version::ES(3, 1)
                    || self.extensions.gl_arb_compute_shader
            }
        }
    }

    pub fn has_separable_programs(&self) -> bool {
        self.version >= Version::GL(4, 1)
            || self.version >= Version::ES(3, 1)
            || self.extensions.gl_arb_separate_shader_objects
    }
}

#[inline]
unsafe fn parse_str(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        return Err(Error::Backend(format!("[GL] String of {} is null.", id)));
    }

    Ok(ffi::CStr::from_ptr(s as *const _)
        .to_string_lossy()
        .into_owned())
}
