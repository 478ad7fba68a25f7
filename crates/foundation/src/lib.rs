pub mod bounds;
pub mod geo;
pub mod handles;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use geo::*;
pub use handles::*;
