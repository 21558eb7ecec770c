use std::ffi::CString;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;

use super::assets::prelude::*;
use super::backends::Visitor;
use super::errors::BuildError;

/// Compiles shader stages and links them into a program.
///
/// The builder only carries configuration. Nothing survives from one `build` call to the
/// next, so building the same specs twice yields two independent programs.
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    root: Option<PathBuf>,
    separable: bool,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        ProgramBuilder::default()
    }

    /// Resolves relative file sources against `root` instead of the working directory.
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Marks the program as separable before linking, so it could be bound to a program
    /// pipeline stage by stage.
    pub fn with_separable(mut self, separable: bool) -> Self {
        self.separable = separable;
        self
    }

    #[inline]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_ref().map(|v| v.as_path())
    }

    /// Compiles `specs` in order and links them into a program.
    ///
    /// The first failure aborts the build. Whatever happens, every stage object created here
    /// is deleted before returning, and the program object is deleted as well unless it is
    /// handed back to the caller.
    pub fn build<V>(&self, visitor: &mut V, specs: &[StageSpec]) -> Result<ProgramHandle, BuildError>
    where
        V: Visitor + ?Sized,
    {
        if specs.is_empty() {
            return Err(BuildError::NoStages);
        }

        if self.separable && !visitor.supports_separable() {
            return Err(BuildError::SeparableUnsupported);
        }

        let program = visitor
            .create_program()?
            .ok_or(BuildError::ProgramCreation)?;

        let mut build = Build {
            visitor,
            program,
            stages: SmallVec::new(),
            linked: false,
        };

        for (index, spec) in specs.iter().enumerate() {
            build.compile(self.root(), index, spec)?;
        }

        if self.separable {
            build.visitor.set_separable(program, true)?;
        }

        build.visitor.link_program(program)?;
        build.release_stages();

        if !build.visitor.program_linked(program)? {
            let log = build.visitor.program_log(program)?;
            warn!("Failed to link {}: {}", program, log);
            return Err(BuildError::Link { log });
        }

        info!("Linked {} from {} stage(s).", program, specs.len());
        Ok(build.finish())
    }
}

// The native objects of a build in progress. Dropping it releases every stage, and the
// program too unless `finish` was reached.
struct Build<'a, V: Visitor + ?Sized> {
    visitor: &'a mut V,
    program: ProgramHandle,
    stages: SmallVec<[StageHandle; 4]>,
    linked: bool,
}

impl<'a, V: Visitor + ?Sized> Build<'a, V> {
    fn compile(
        &mut self,
        root: Option<&Path>,
        index: usize,
        spec: &StageSpec,
    ) -> Result<(), BuildError> {
        if !self.visitor.supports(spec.stage) {
            return Err(BuildError::Unsupported {
                index,
                stage: spec.stage,
            });
        }

        let stage = self
            .visitor
            .create_stage(spec.stage)?
            .ok_or(BuildError::StageCreation {
                index,
                stage: spec.stage,
            })?;

        self.stages.push(stage);
        debug!("Compiling {} shader {} from {}.", spec.stage, stage, spec.source);

        let source = spec
            .source
            .read(root)
            .map_err(|err| BuildError::SourceRead {
                index,
                locator: spec.source.clone(),
                reason: err.to_string(),
            })?;

        let source = CString::new(source.into_owned()).map_err(|_| BuildError::SourceInvalid {
            index,
            locator: spec.source.clone(),
        })?;

        self.visitor.compile_stage(stage, &source)?;

        if !self.visitor.stage_compiled(stage)? {
            let log = self.visitor.stage_log(stage)?;
            warn!("Failed to compile {}: {}", spec.source, log);
            return Err(BuildError::Compile {
                index,
                locator: spec.source.clone(),
                log,
            });
        }

        self.visitor.attach_stage(self.program, stage)?;
        Ok(())
    }

    fn release_stages(&mut self) {
        for stage in self.stages.drain() {
            if let Err(err) = self.visitor.delete_stage(stage) {
                warn!("Failed to delete {}: {}", stage, err);
            }
        }
    }

    fn finish(mut self) -> ProgramHandle {
        self.linked = true;
        self.program
    }
}

impl<'a, V: Visitor + ?Sized> Drop for Build<'a, V> {
    fn drop(&mut self) {
        self.release_stages();

        if !self.linked {
            if let Err(err) = self.visitor.delete_program(self.program) {
                warn!("Failed to delete {}: {}", self.program, err);
            }
        }
    }
}
