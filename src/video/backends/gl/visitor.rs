use std::ffi::CStr;
use std::ptr;

use gl::types::*;

use crate::video::assets::prelude::*;
use crate::video::errors::*;

use super::super::Visitor;
use super::capabilities::Capabilities;

/// Program and shader objects of a live OpenGL context.
pub struct GLVisitor {
    capabilities: Capabilities,
}

impl GLVisitor {
    /// Creates a visitor for the context whose functions have been loaded already.
    ///
    /// # Unsafe
    ///
    /// The OpenGL context must be current on the calling thread, and stay current for as long
    /// as the visitor is in use. Every other method relies on it.
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);

        if !capabilities.has_shader_objects() {
            return Err(Error::Requirement("shader objects".into()));
        }

        Ok(GLVisitor { capabilities })
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Visitor for GLVisitor {
    fn create_program(&mut self) -> Result<Option<ProgramHandle>> {
        unsafe {
            let id = gl::CreateProgram();
            check()?;

            if id == 0 {
                Ok(None)
            } else {
                Ok(Some(ProgramHandle::new(id)))
            }
        }
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        unsafe {
            gl::DeleteProgram(handle.id());
            check()
        }
    }

    fn create_stage(&mut self, stage: ShaderStage) -> Result<Option<StageHandle>> {
        if !self.capabilities.has_stage(stage) {
            return Err(Error::Requirement(format!("{} shaders", stage)));
        }

        unsafe {
            let id = gl::CreateShader(stage.into());
            check()?;

            if id == 0 {
                Ok(None)
            } else {
                Ok(Some(StageHandle::new(id)))
            }
        }
    }

    fn delete_stage(&mut self, handle: StageHandle) -> Result<()> {
        unsafe {
            gl::DeleteShader(handle.id());
            check()
        }
    }

    fn compile_stage(&mut self, handle: StageHandle, source: &CStr) -> Result<()> {
        unsafe {
            gl::ShaderSource(handle.id(), 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(handle.id());
            check()
        }
    }

    fn stage_compiled(&mut self, handle: StageHandle) -> Result<bool> {
        unsafe {
            let mut status = GLint::from(gl::FALSE);
            gl::GetShaderiv(handle.id(), gl::COMPILE_STATUS, &mut status);
            check()?;
            Ok(status == GLint::from(gl::TRUE))
        }
    }

    fn stage_log(&mut self, handle: StageHandle) -> Result<String> {
        unsafe {
            let mut len = 0;
            gl::GetShaderiv(handle.id(), gl::INFO_LOG_LENGTH, &mut len);
            check()?;

            let log = info_log(len, |len, written, buf| {
                gl::GetShaderInfoLog(handle.id(), len, written, buf)
            });

            check()?;
            Ok(log)
        }
    }

    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) -> Result<()> {
        unsafe {
            gl::AttachShader(program.id(), stage.id());
            check()
        }
    }

    fn set_separable(&mut self, program: ProgramHandle, separable: bool) -> Result<()> {
        if !self.capabilities.has_separable_programs() {
            return Err(Error::Requirement("separable programs".into()));
        }

        let value = if separable { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::ProgramParameteri(program.id(), gl::PROGRAM_SEPARABLE, GLint::from(value));
            check()
        }
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<()> {
        unsafe {
            gl::LinkProgram(program.id());
            check()
        }
    }

    fn program_linked(&mut self, program: ProgramHandle) -> Result<bool> {
        unsafe {
            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(program.id(), gl::LINK_STATUS, &mut status);
            check()?;
            Ok(status == GLint::from(gl::TRUE))
        }
    }

    fn program_log(&mut self, program: ProgramHandle) -> Result<String> {
        unsafe {
            let mut len = 0;
            gl::GetProgramiv(program.id(), gl::INFO_LOG_LENGTH, &mut len);
            check()?;

            let log = info_log(len, |len, written, buf| {
                gl::GetProgramInfoLog(program.id(), len, written, buf)
            });

            check()?;
            Ok(log)
        }
    }

    #[inline]
    fn supports(&self, stage: ShaderStage) -> bool {
        self.capabilities.has_stage(stage)
    }

    #[inline]
    fn supports_separable(&self) -> bool {
        self.capabilities.has_separable_programs()
    }
}

// `len` is the INFO_LOG_LENGTH of the object, which counts the trailing nul.
unsafe fn info_log<F>(len: GLint, func: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 1 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    func(len, &mut written, buf.as_mut_ptr() as *mut GLchar);

    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => Err(Error::Backend(
            "[GL] An unacceptable value is specified for an enumerated argument.".into(),
        )),

        gl::INVALID_VALUE => Err(Error::Backend(
            "[GL] A numeric argument is out of range.".into(),
        )),

        gl::INVALID_OPERATION => Err(Error::Backend(
            "[GL] The specified operation is not allowed in the current state.".into(),
        )),

        gl::OUT_OF_MEMORY => Err(Error::Backend(
            "[GL] There is not enough memory left to execute the command.".into(),
        )),

        _ => Err(Error::Backend("[GL] Oops, Unknown OpenGL error.".into())),
    }
}
