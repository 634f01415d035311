//! Fixed price settlement math

pub mod bonus;
pub mod calculator;
pub mod fixed_price;

pub use bonus::*;
pub use calculator::*;
pub use fixed_price::*;
