pub mod commands;
pub mod controller;
pub mod events;
pub mod hover;
pub mod navbar;
pub mod sidebar;
pub mod viewport;

pub use commands::*;
pub use controller::*;
pub use events::*;
pub use viewport::*;
