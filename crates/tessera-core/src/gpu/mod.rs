pub mod buffers;
pub mod device;
pub mod pipelines;
pub mod renderer;
pub mod target;

pub use buffers::*;
pub use device::*;
pub use pipelines::*;
pub use renderer::*;
pub use target::*;
