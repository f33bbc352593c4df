/// Severity escalation detection.
///
/// A plain "status changed" check would fire on improvements and on lateral
/// sediment-only changes; comparing severity ranks is the minimal mechanism
/// that distinguishes "got worse" from "changed". Only strictly-worse
/// transitions produce an operator notification.

use crate::model::Status;

// ---------------------------------------------------------------------------
// Escalation events
// ---------------------------------------------------------------------------

/// Notification payload for a buoy whose status got strictly worse.
///
/// Consumed by a `NotificationSink`; the core has no knowledge of how it is
/// displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub buoy_id: String,
    pub buoy_name: String,
    pub previous: Status,
    pub current: Status,
}

impl std::fmt::Display for Escalation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} status escalated: {} -> {}",
            self.buoy_name, self.previous, self.current
        )
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Returns `true` iff `current` ranks strictly above `previous`.
///
/// Equal rank (including an identical status) is never an escalation, and
/// any decrease is an improvement, not an escalation.
pub fn is_escalation(previous: Status, current: Status) -> bool {
    current.severity_rank() > previous.severity_rank()
}

/// Builds the notification event for a transition, or `None` when the
/// transition is not an escalation.
pub fn escalation_event(
    buoy_id: &str,
    buoy_name: &str,
    previous: Status,
    current: Status,
) -> Option<Escalation> {
    if is_escalation(previous, current) {
        Some(Escalation {
            buoy_id: buoy_id.to_string(),
            buoy_name: buoy_name.to_string(),
            previous,
            current,
        })
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
