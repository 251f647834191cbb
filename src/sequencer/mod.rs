pub mod reveal;
pub mod timer;
