mod generator;
mod id;
mod layout;

pub use generator::*;
pub use id::*;
pub use layout::*;
