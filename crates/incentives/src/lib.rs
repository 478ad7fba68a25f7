pub mod categories;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod model;
pub mod source;

#[cfg(not(target_arch = "wasm32"))]
pub mod client;

pub use categories::*;
pub use config::*;
pub use error::*;
pub use filter::*;
pub use model::*;
pub use source::*;

#[cfg(not(target_arch = "wasm32"))]
pub use client::IncentivesClient;
