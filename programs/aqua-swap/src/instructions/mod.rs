pub mod close;
pub mod create;
pub mod swap;

pub use close::*;
pub use create::*;
pub use swap::*;
