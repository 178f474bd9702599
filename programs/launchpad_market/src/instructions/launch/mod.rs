//! Token launch settlement for markets that resolved YES
//!
//! - `register_launch` - founder deposits the launched supply and takes the pool
//! - `claim_platform_tokens` - platform share to the treasury admin
//! - `claim_team_tokens` - founder's immediate and vested team share

pub mod claim_platform_tokens;
pub mod claim_team_tokens;
pub mod register_launch;

pub use claim_platform_tokens::*;
pub use claim_team_tokens::*;
pub use register_launch::*;
