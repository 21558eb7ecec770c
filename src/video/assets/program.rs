//! Opaque names of native program and stage objects.
//!
//! Zero is reserved by OpenGL as "no object", so backends never wrap it.

use std::fmt;

/// A shader stage object. It is owned by the `ProgramBuilder` for the duration of a single
/// build and never escapes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageHandle(u32);

impl StageHandle {
    #[inline]
    pub fn new(id: u32) -> Self {
        debug_assert!(id != 0, "StageHandle can not wrap the null object.");
        StageHandle(id)
    }

    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StageHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StageHandle({})", self.0)
    }
}

/// A linked program. Whoever holds the handle owns the native object, and should eventually
/// pass it to `Visitor::delete_program`.
#[must_use = "dropping a ProgramHandle leaks the native program object"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramHandle(u32);

impl ProgramHandle {
    #[inline]
    pub fn new(id: u32) -> Self {
        debug_assert!(id != 0, "ProgramHandle can not wrap the null object.");
        ProgramHandle(id)
    }

    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProgramHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ProgramHandle({})", self.0)
    }
}
