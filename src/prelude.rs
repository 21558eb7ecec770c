pub use crate::application::prelude::*;
pub use crate::errors::*;
pub use crate::video::prelude::*;
