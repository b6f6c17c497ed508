pub mod answers;

pub use answers::*;
