pub mod claim_rewards;
pub mod close_position;

pub use claim_rewards::*;
pub use close_position::*;
