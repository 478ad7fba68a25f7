pub mod classify;
pub mod filter;
pub mod labels;
pub mod layer;
pub mod legend;
pub mod symbology;
pub mod sync;
pub mod vector;

pub use classify::*;
pub use filter::Filter;
pub use layer::*;
pub use legend::*;
pub use sync::*;
