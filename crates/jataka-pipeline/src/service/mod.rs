//! Services backing the external API surface. The HTTP layer itself is
//! an external collaborator — these are the operations it calls.

mod readings;
mod rules;

pub use readings::{ReadingRequest, ReadingResponse, ReadingService};
pub use rules::{RetrieveRequest, RetrieveResponse, RetrievedRule, RuleService};
