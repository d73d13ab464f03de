pub mod queries;
pub mod set_billing_ready;

pub use queries::{get_own_profile, get_profile, ProfileWithLoad};
pub use set_billing_ready::set_billing_ready;
