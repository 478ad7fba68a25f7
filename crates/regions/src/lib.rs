pub mod catalog;
pub mod picking;
pub mod search;
pub mod selection;
pub mod states;

pub use catalog::*;
pub use selection::*;
