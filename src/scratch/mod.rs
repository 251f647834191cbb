pub mod mask;
pub mod surface;
