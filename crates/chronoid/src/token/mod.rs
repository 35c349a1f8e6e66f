mod random;
mod signed;

pub use random::*;
pub use signed::*;
