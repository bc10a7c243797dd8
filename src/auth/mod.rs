mod assertion;
pub mod claims;
mod error;
mod flow;
mod gate;
pub mod groups;
mod linker;

pub use assertion::{Claim, ExternalAssertion, claim_types};
pub use error::AuthError;
pub use flow::{LoginOutcome, complete_external_login};
pub use gate::GateDecision;
pub use linker::AccountLinker;
