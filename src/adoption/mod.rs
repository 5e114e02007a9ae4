//! Adoption application intake.
//!
//! Applications are write-only from the API's point of view: they are
//! validated, stamped, and handed to an [`AdoptionSink`]. The
//! [`AdoptionLedger`] handle picks the sink at startup:
//!
//! - **RemoteAdoptionSink**: the hosted `adoption_applications` table
//! - **LocalAdoptionSink**: `adoptions.json` next to the pet data, used
//!   when no remote table is configured

mod ledger;
mod local;
mod remote;
mod sink;

pub use ledger::AdoptionLedger;
pub use local::LocalAdoptionSink;
pub use remote::RemoteAdoptionSink;
pub use sink::AdoptionSink;
