pub mod init_treasury;
pub mod set_admin;
pub mod withdraw_fees;

pub use init_treasury::*;
pub use set_admin::*;
pub use withdraw_fees::*;
