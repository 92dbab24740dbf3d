pub mod actions;
pub mod command_registry;
pub mod config;
pub mod content;
pub mod history;
pub mod outputs;
pub mod payload;
pub mod reducer;
pub mod reveal;
pub mod state;

pub use actions::*;
pub use reducer::*;
pub use state::*;
