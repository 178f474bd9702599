//! Instruction handlers for the launchpad market program
//!
//! - `admin` - treasury setup, admin rotation, fee withdrawal
//! - `market` - create, buy, resolve and close a market
//! - `claims` - per-position settlement and rent recovery
//! - `launch` - token launch bookkeeping after a YES win

pub mod admin;
pub mod claims;
pub mod launch;
pub mod market;

pub use admin::*;
pub use claims::*;
pub use launch::*;
pub use market::*;
