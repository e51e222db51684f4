pub mod course;
pub mod source;

pub use course::*;
pub use source::*;
