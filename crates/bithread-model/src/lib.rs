pub mod language;
pub mod thread;

pub use language::*;
pub use thread::*;
