pub mod buy;
pub mod close_market;
pub mod create_market;
pub mod resolve;

pub use buy::*;
pub use close_market::*;
pub use create_market::*;
pub use resolve::*;
