/// Status derivation and escalation detection.
///
/// The decision layer of the service: everything else feeds readings in or
/// renders results out. Both submodules are pure functions over the domain
/// model with no I/O, no clock, and no shared state.
///
/// Submodules:
/// - `classify` — maps a (flow rate, sediment) pair to a `Status`.
/// - `escalation` — compares two statuses by severity rank and builds the
///   notification payload for transitions that got strictly worse.

pub mod classify;
pub mod escalation;

pub use classify::classify;
pub use escalation::{Escalation, is_escalation};
