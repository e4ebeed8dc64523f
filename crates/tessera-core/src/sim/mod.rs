pub mod emitter;
pub mod particles;
pub mod stats;

pub use emitter::*;
pub use particles::*;
pub use stats::*;
