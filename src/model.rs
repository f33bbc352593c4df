/// Core data types for the buoy monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond the status enumeration's own accessors, no
/// I/O, and no external dependencies — only types.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single sensor snapshot from one buoy.
///
/// Water level and temperature are carried for the dashboard's series and
/// activity log but are not inputs to status classification, which is a
/// function of flow rate and the sediment flag only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Surface flow rate in m/s. Non-negative in practice; any value is
    /// accepted and classifies deterministically.
    pub flow_rate_mps: f64,
    /// Water level in metres.
    pub water_level_m: f64,
    /// Water temperature in °C.
    pub temperature_c: f64,
    /// Whether the turbidity sensor currently reports sediment.
    pub sediment_present: bool,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Discrete buoy condition, combining a flow-rate tier with the sediment
/// flag. Variants are declared in ascending severity order.
///
/// The ordering is deliberately asymmetric: sediment at a lower tier ranks
/// below a higher tier without sediment (normal-with-sediments < warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Normal,
    NormalWithSediment,
    Warning,
    WarningWithSediment,
    Flood,
    FloodWithSediment,
}

/// All six statuses in ascending severity order. The canonical iteration
/// order for aggregate views.
pub const ALL_STATUSES: [Status; 6] = [
    Status::Normal,
    Status::NormalWithSediment,
    Status::Warning,
    Status::WarningWithSediment,
    Status::Flood,
    Status::FloodWithSediment,
];

impl Status {
    /// Severity rank used for escalation comparison:
    ///   normal(0) < normal+sediment(1) < warning(2) < warning+sediment(3)
    ///   < flood(4) < flood+sediment(5)
    ///
    /// Exhaustive match so every variant has a rank at compile time.
    pub fn severity_rank(self) -> u8 {
        match self {
            Status::Normal => 0,
            Status::NormalWithSediment => 1,
            Status::Warning => 2,
            Status::WarningWithSediment => 3,
            Status::Flood => 4,
            Status::FloodWithSediment => 5,
        }
    }

    /// The flow-rate tier with the sediment modifier stripped.
    pub fn base_tier(self) -> Status {
        match self {
            Status::Normal | Status::NormalWithSediment => Status::Normal,
            Status::Warning | Status::WarningWithSediment => Status::Warning,
            Status::Flood | Status::FloodWithSediment => Status::Flood,
        }
    }

    /// The sediment variant of this status's tier.
    pub fn with_sediment(self) -> Status {
        match self.base_tier() {
            Status::Normal => Status::NormalWithSediment,
            Status::Warning => Status::WarningWithSediment,
            _ => Status::FloodWithSediment,
        }
    }

    /// Whether the sediment modifier is set.
    pub fn has_sediment(self) -> bool {
        matches!(
            self,
            Status::NormalWithSediment | Status::WarningWithSediment | Status::FloodWithSediment
        )
    }

    /// Whether this status is in the flood tier (with or without sediment).
    pub fn is_flood_tier(self) -> bool {
        self.base_tier() == Status::Flood
    }

    /// Dashboard label, e.g. `"warning with sediments"`.
    pub fn label(self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::NormalWithSediment => "normal with sediments",
            Status::Warning => "warning",
            Status::WarningWithSediment => "warning with sediments",
            Status::Flood => "flood",
            Status::FloodWithSediment => "flood with sediments",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status label: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for Status {
    type Err = UnknownStatus;

    /// Parses the dashboard labels. Used by the manual-override path, so an
    /// unknown string is rejected rather than entering severity comparisons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(Status::Normal),
            "normal with sediments" => Ok(Status::NormalWithSediment),
            "warning" => Ok(Status::Warning),
            "warning with sediments" => Ok(Status::WarningWithSediment),
            "flood" => Ok(Status::Flood),
            "flood with sediments" => Ok(Status::FloodWithSediment),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when resolving a buoy position to an address.
#[derive(Debug, PartialEq)]
pub enum GeocodeError {
    /// Non-2xx HTTP response from the geocoding API.
    HttpError(u16),
    /// The response body could not be deserialized.
    ParseError(String),
    /// The request itself failed (connection, timeout, TLS).
    RequestError(String),
    /// The API answered but returned no display name for the position.
    NoAddressFound,
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::HttpError(code) => write!(f, "HTTP error: {}", code),
            GeocodeError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            GeocodeError::RequestError(msg) => write!(f, "Request error: {}", msg),
            GeocodeError::NoAddressFound => write!(f, "No address found for position"),
        }
    }
}

impl std::error::Error for GeocodeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
