pub mod swap;

pub use swap::*;

pub mod events;
pub use events::*;
