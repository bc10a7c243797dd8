mod account;
mod group;

pub use account::{BackOfficeAccount, ExternalLogin, GroupAssignment};
pub use group::{GroupSource, LocalGroup};
