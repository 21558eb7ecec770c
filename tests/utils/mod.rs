use std::collections::HashMap;
use std::ffi::CStr;

use redbook::video::backends::headless::HeadlessVisitor;
use redbook::video::backends::Visitor;
use redbook::video::errors::{Error, Result};
use redbook::video::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateProgram(u32),
    DeleteProgram(u32),
    CreateStage(ShaderStage, u32),
    DeleteStage(u32),
    Compile(u32),
    Attach(u32, u32),
    SetSeparable(u32),
    Link(u32),
}

/// Forwards to a `HeadlessVisitor` and records every call that touches native objects.
/// Could also be told to fail the n-th call of an operation, or to hand out null stages.
pub struct RecordingVisitor {
    pub inner: HeadlessVisitor,
    pub calls: Vec<Call>,
    counts: HashMap<&'static str, usize>,
    failure: Option<(&'static str, usize)>,
    null_stages: bool,
}

impl RecordingVisitor {
    pub fn new(inner: HeadlessVisitor) -> Self {
        RecordingVisitor {
            inner,
            calls: Vec::new(),
            counts: HashMap::new(),
            failure: None,
            null_stages: false,
        }
    }

    /// The `nth` (starting from 1) call of `op` returns a backend error.
    pub fn fail_on(mut self, op: &'static str, nth: usize) -> Self {
        self.failure = Some((op, nth));
        self
    }

    pub fn null_stages(mut self) -> Self {
        self.null_stages = true;
        self
    }

    pub fn compiles_of(&self, stage: u32) -> usize {
        self.calls
            .iter()
            .filter(|v| **v == Call::Compile(stage))
            .count()
    }

    pub fn created_stages(&self) -> Vec<(ShaderStage, u32)> {
        self.calls
            .iter()
            .filter_map(|v| match *v {
                Call::CreateStage(stage, id) => Some((stage, id)),
                _ => None,
            })
            .collect()
    }

    fn check(&mut self, op: &'static str) -> Result<()> {
        let count = {
            let v = self.counts.entry(op).or_insert(0);
            *v += 1;
            *v
        };

        match self.failure {
            Some((name, nth)) if name == op && nth == count => {
                Err(Error::Backend(format!("injected failure of {}", op)))
            }
            _ => Ok(()),
        }
    }
}

impl Visitor for RecordingVisitor {
    fn create_program(&mut self) -> Result<Option<ProgramHandle>> {
        self.check("create_program")?;
        let handle = self.inner.create_program()?;
        if let Some(v) = handle {
            self.calls.push(Call::CreateProgram(v.id()));
        }
        Ok(handle)
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.check("delete_program")?;
        self.calls.push(Call::DeleteProgram(handle.id()));
        self.inner.delete_program(handle)
    }

    fn create_stage(&mut self, stage: ShaderStage) -> Result<Option<StageHandle>> {
        self.check("create_stage")?;
        if self.null_stages {
            return Ok(None);
        }

        let handle = self.inner.create_stage(stage)?;
        if let Some(v) = handle {
            self.calls.push(Call::CreateStage(stage, v.id()));
        }
        Ok(handle)
    }

    fn delete_stage(&mut self, handle: StageHandle) -> Result<()> {
        self.check("delete_stage")?;
        self.calls.push(Call::DeleteStage(handle.id()));
        self.inner.delete_stage(handle)
    }

    fn compile_stage(&mut self, handle: StageHandle, source: &CStr) -> Result<()> {
        self.check("compile_stage")?;
        self.calls.push(Call::Compile(handle.id()));
        self.inner.compile_stage(handle, source)
    }

    fn stage_compiled(&mut self, handle: StageHandle) -> Result<bool> {
        self.check("stage_compiled")?;
        self.inner.stage_compiled(handle)
    }

    fn stage_log(&mut self, handle: StageHandle) -> Result<String> {
        self.check("stage_log")?;
        self.inner.stage_log(handle)
    }

    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) -> Result<()> {
        self.check("attach_stage")?;
        self.calls.push(Call::Attach(program.id(), stage.id()));
        self.inner.attach_stage(program, stage)
    }

    fn set_separable(&mut self, program: ProgramHandle, separable: bool) -> Result<()> {
        self.check("set_separable")?;
        self.calls.push(Call::SetSeparable(program.id()));
        self.inner.set_separable(program, separable)
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<()> {
        self.check("link_program")?;
        self.calls.push(Call::Link(program.id()));
        self.inner.link_program(program)
    }

    fn program_linked(&mut self, program: ProgramHandle) -> Result<bool> {
        self.check("program_linked")?;
        self.inner.program_linked(program)
    }

    fn program_log(&mut self, program: ProgramHandle) -> Result<String> {
        self.check("program_log")?;
        self.inner.program_log(program)
    }

    fn supports(&self, stage: ShaderStage) -> bool {
        self.inner.supports(stage)
    }

    fn supports_separable(&self) -> bool {
        self.inner.supports_separable()
    }
}
