//! A graphics context without a GPU.
//!
//! Object names are handed out the way a driver would, and a tiny rule based "compiler" and
//! "linker" decide whether a program builds. Every live object is tracked, so a leak or a
//! double delete shows up as a count or an error instead of going unnoticed.

use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

use smallvec::SmallVec;

use super::super::assets::prelude::*;
use super::super::errors::*;
use super::Visitor;

#[derive(Debug, Clone)]
struct HeadlessStage {
    stage: ShaderStage,
    compiled: bool,
    log: String,
}

#[derive(Debug, Clone, Default)]
struct HeadlessProgram {
    attached: SmallVec<[(ShaderStage, bool); 4]>,
    separable: bool,
    linked: bool,
    log: String,
}

pub struct HeadlessVisitor {
    next_id: u32,
    stages: HashMap<u32, HeadlessStage>,
    programs: HashMap<u32, HeadlessProgram>,
    unsupported: HashSet<ShaderStage>,
    separable: bool,
    compiled: usize,
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new()
    }
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            next_id: 1,
            stages: HashMap::new(),
            programs: HashMap::new(),
            unsupported: HashSet::new(),
            separable: true,
            compiled: 0,
        }
    }

    /// Pretends the context lacks support for `stage`.
    pub fn without_stage(mut self, stage: ShaderStage) -> Self {
        self.unsupported.insert(stage);
        self
    }

    /// Pretends the context lacks support for separable programs.
    pub fn without_separable(mut self) -> Self {
        self.separable = false;
        self
    }

    /// Number of program objects that were created and not deleted yet.
    #[inline]
    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    /// Number of stage objects that were created and not deleted yet.
    #[inline]
    pub fn live_stages(&self) -> usize {
        self.stages.len()
    }

    /// Number of compilations requested since this visitor was created.
    #[inline]
    pub fn compiled_stages(&self) -> usize {
        self.compiled
    }

    #[inline]
    pub fn is_alive(&self, handle: ProgramHandle) -> bool {
        self.programs.contains_key(&handle.id())
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn stage_mut(&mut self, handle: StageHandle) -> Result<&mut HeadlessStage> {
        self.stages
            .get_mut(&handle.id())
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))
    }

    fn program_mut(&mut self, handle: ProgramHandle) -> Result<&mut HeadlessProgram> {
        self.programs
            .get_mut(&handle.id())
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))
    }

    fn compile(source: &str) -> ::std::result::Result<(), String> {
        if source.trim().is_empty() {
            return Err("ERROR: 0:1: '' : syntax error: empty shader source".to_owned());
        }

        for (i, line) in source.lines().enumerate() {
            let line = line.trim_start();
            if line.starts_with("#error") {
                let msg = line["#error".len()..].trim();
                return Err(format!("ERROR: 0:{}: '#error' : {}", i + 1, msg));
            }
        }

        Ok(())
    }

    fn link(program: &HeadlessProgram) -> ::std::result::Result<(), String> {
        if program.attached.is_empty() {
            return Err("ERROR: No shader objects attached to program.".to_owned());
        }

        if program.attached.iter().any(|&(_, compiled)| !compiled) {
            return Err("ERROR: One or more attached shaders not successfully compiled.".to_owned());
        }

        let compute = program.attached.iter().filter(|v| v.0.is_compute()).count();
        if compute > 0 {
            if compute != program.attached.len() {
                return Err(
                    "ERROR: Compute shaders can not be linked with other stages.".to_owned(),
                );
            }

            return Ok(());
        }

        if !program.separable {
            let has = |stage: ShaderStage| program.attached.iter().any(|v| v.0 == stage);
            if !has(ShaderStage::Vertex) {
                return Err("ERROR: Program has no vertex shader.".to_owned());
            }

            if !has(ShaderStage::Fragment) {
                return Err("ERROR: Program has no fragment shader.".to_owned());
            }
        }

        Ok(())
    }
}

impl Visitor for HeadlessVisitor {
    fn create_program(&mut self) -> Result<Option<ProgramHandle>> {
        let id = self.allocate();
        self.programs.insert(id, HeadlessProgram::default());
        Ok(Some(ProgramHandle::new(id)))
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.programs
            .remove(&handle.id())
            .map(|_| ())
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))
    }

    fn create_stage(&mut self, stage: ShaderStage) -> Result<Option<StageHandle>> {
        if self.unsupported.contains(&stage) {
            return Err(Error::Requirement(format!("{} shaders", stage)));
        }

        let id = self.allocate();
        let data = HeadlessStage {
            stage,
            compiled: false,
            log: String::new(),
        };

        self.stages.insert(id, data);
        Ok(Some(StageHandle::new(id)))
    }

    fn delete_stage(&mut self, handle: StageHandle) -> Result<()> {
        self.stages
            .remove(&handle.id())
            .map(|_| ())
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))
    }

    fn compile_stage(&mut self, handle: StageHandle, source: &CStr) -> Result<()> {
        let result = Self::compile(&source.to_string_lossy());
        let data = self.stage_mut(handle)?;
        match result {
            Ok(()) => {
                data.compiled = true;
                data.log.clear();
            }
            Err(log) => {
                data.compiled = false;
                data.log = log;
            }
        }

        self.compiled += 1;
        Ok(())
    }

    fn stage_compiled(&mut self, handle: StageHandle) -> Result<bool> {
        Ok(self.stage_mut(handle)?.compiled)
    }

    fn stage_log(&mut self, handle: StageHandle) -> Result<String> {
        Ok(self.stage_mut(handle)?.log.clone())
    }

    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) -> Result<()> {
        let (kind, compiled) = {
            let data = self.stage_mut(stage)?;
            (data.stage, data.compiled)
        };

        self.program_mut(program)?.attached.push((kind, compiled));
        Ok(())
    }

    fn set_separable(&mut self, program: ProgramHandle, separable: bool) -> Result<()> {
        if separable && !self.separable {
            return Err(Error::Requirement("separable programs".into()));
        }

        self.program_mut(program)?.separable = separable;
        Ok(())
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<()> {
        let data = self.program_mut(program)?;
        match Self::link(data) {
            Ok(()) => {
                data.linked = true;
                data.log.clear();
            }
            Err(log) => {
                data.linked = false;
                data.log = log;
            }
        }

        Ok(())
    }

    fn program_linked(&mut self, program: ProgramHandle) -> Result<bool> {
        Ok(self.program_mut(program)?.linked)
    }

    fn program_log(&mut self, program: ProgramHandle) -> Result<String> {
        Ok(self.program_mut(program)?.log.clone())
    }

    fn supports(&self, stage: ShaderStage) -> bool {
        !self.unsupported.contains(&stage)
    }

    fn supports_separable(&self) -> bool {
        self.separable
    }
}
