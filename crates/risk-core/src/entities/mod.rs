//! Entity records for the risk register and its reference data.
//!
//! Each record mirrors one row shape returned by the repository layer.
//! Lookup names (role, country, owner, status...) are resolved by joins and
//! carried as optional fields next to their foreign keys.

mod action_plan;
mod comment;
mod control;
mod country;
mod risk;
mod role;
mod user;

pub use action_plan::ActionPlan;
pub use comment::Comment;
pub use control::Control;
pub use country::Country;
pub use risk::Risk;
pub use role::Role;
pub use user::User;
