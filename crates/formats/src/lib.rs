pub mod properties;
pub mod region_collection;

pub use properties::*;
pub use region_collection::*;
