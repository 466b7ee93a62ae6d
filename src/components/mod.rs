pub mod ether_bank;
pub mod layout;
pub mod toast;
pub mod units_bank;
