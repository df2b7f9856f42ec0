//! The navigation guard.
//!
//! `policy` holds the pure decision table, `sequencer` orders overlapping
//! transitions, and `navigation_guard` ties both to the identity SDK and to
//! client storage.

pub mod navigation_guard;
pub mod policy;
pub mod sequencer;

pub use navigation_guard::{GuardOutcome, Navigation, NavigationGuard, RenderPass};
pub use policy::{decide, Action, RoutePolicy, SessionEvidence, TokenProbe};
pub use sequencer::{NavigationSequencer, NavigationTicket};
