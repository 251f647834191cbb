pub mod host;
pub mod model;
