/// Aggregate views over the fleet's current statuses.
///
/// Counts are recomputed from scratch on every cycle rather than maintained
/// incrementally, so a missed update can never leave the pie chart drifted
/// from the fleet's actual state.

use serde::Serialize;

use crate::model::{SensorReading, Status};

// ---------------------------------------------------------------------------
// Status counts
// ---------------------------------------------------------------------------

/// Number of buoys currently in each of the six statuses.
///
/// One named field per status variant; serializes to the label-keyed map
/// the chart consumer expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub normal: usize,
    #[serde(rename = "normal with sediments")]
    pub normal_with_sediments: usize,
    pub warning: usize,
    #[serde(rename = "warning with sediments")]
    pub warning_with_sediments: usize,
    pub flood: usize,
    #[serde(rename = "flood with sediments")]
    pub flood_with_sediments: usize,
}

impl StatusCounts {
    /// Tallies statuses from scratch.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Status>,
    {
        let mut counts = StatusCounts::default();
        for status in statuses {
            *counts.slot_mut(status) += 1;
        }
        counts
    }

    /// The count for one status.
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Normal => self.normal,
            Status::NormalWithSediment => self.normal_with_sediments,
            Status::Warning => self.warning,
            Status::WarningWithSediment => self.warning_with_sediments,
            Status::Flood => self.flood,
            Status::FloodWithSediment => self.flood_with_sediments,
        }
    }

    /// Total buoys tallied; always equals the fleet size.
    pub fn total(&self) -> usize {
        self.normal
            + self.normal_with_sediments
            + self.warning
            + self.warning_with_sediments
            + self.flood
            + self.flood_with_sediments
    }

    fn slot_mut(&mut self, status: Status) -> &mut usize {
        match status {
            Status::Normal => &mut self.normal,
            Status::NormalWithSediment => &mut self.normal_with_sediments,
            Status::Warning => &mut self.warning,
            Status::WarningWithSediment => &mut self.warning_with_sediments,
            Status::Flood => &mut self.flood,
            Status::FloodWithSediment => &mut self.flood_with_sediments,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-buoy snapshots
// ---------------------------------------------------------------------------

/// One buoy's current state, shaped for the summary panel and map popup.
#[derive(Debug, Clone, Serialize)]
pub struct BuoySummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub water_level_m: f64,
    pub flow_rate_mps: f64,
    pub temperature_c: f64,
    pub sediment_present: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Resolved address, or `None` while geocoding is pending or failed.
    pub address: Option<String>,
}

impl BuoySummary {
    pub fn new(
        id: &str,
        name: &str,
        status: Status,
        reading: &SensorReading,
        latitude: f64,
        longitude: f64,
        address: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: status.label().to_string(),
            water_level_m: reading.water_level_m,
            flow_rate_mps: reading.flow_rate_mps,
            temperature_c: reading.temperature_c,
            sediment_present: reading.sediment_present,
            latitude,
            longitude,
            address: address.map(String::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
