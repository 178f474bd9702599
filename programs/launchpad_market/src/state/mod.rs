//! Account records owned by the launchpad market program

pub mod market;
pub mod position;
pub mod treasury;

pub use market::*;
pub use position::*;
pub use treasury::*;
