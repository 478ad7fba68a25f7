pub mod planar;
pub mod precision;

pub use planar::*;
pub use precision::*;
