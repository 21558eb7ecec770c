pub mod program;
pub mod shader;

pub mod prelude {
    pub use super::program::{ProgramHandle, StageHandle};
    pub use super::shader::{ShaderSource, ShaderStage, StageSpec};
}
