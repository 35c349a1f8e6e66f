mod engine;
mod generator;
mod id;

pub use engine::*;
pub use generator::*;
pub use id::*;
