pub mod capabilities;
pub mod types;
pub mod visitor;

use std::os::raw::c_void;

use self::visitor::GLVisitor;
use crate::video::errors::Result;

impl GLVisitor {
    /// Loads the OpenGL function pointers with `loader` and creates a visitor on top of them,
    /// e.g. `GLVisitor::load_with(|symbol| window.get_proc_address(symbol) as *const _)`.
    ///
    /// # Unsafe
    ///
    /// The context the loader belongs to must be current on the calling thread, and stay
    /// current for as long as the visitor is in use.
    pub unsafe fn load_with<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self::new()
    }
}
