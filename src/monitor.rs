/// Fleet orchestration: the per-cycle evaluation path.
///
/// The fleet owns every buoy record; mutation is confined to `run_cycle_at`
/// and the manual override. Each cycle, per buoy: obtain a reading, save the
/// outgoing status, reclassify, notify on escalation, then refresh the
/// series buffers and activity log. Aggregate counts are recomputed from
/// scratch after all buoys have been updated.
///
/// # Clock injection
/// `run_cycle_at` accepts a `now: DateTime<Utc>` parameter rather than
/// calling `Utc::now()` internally. This makes cycle output purely
/// deterministic in tests without mocking or time manipulation; the
/// `run_cycle` wrapper supplies the real clock.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::alert::escalation::{Escalation, escalation_event};
use crate::alert::classify;
use crate::analysis::summary::{BuoySummary, StatusCounts};
use crate::buoys::{BUOY_REGISTRY, BuoyStation};
use crate::history::SeriesBuffer;
use crate::logging::{self, DataSource};
use crate::model::{SensorReading, Status};

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// Produces one reading per buoy per cycle.
///
/// The fleet does not validate ranges beyond what classification requires;
/// any flow value the source reports is accepted.
pub trait ReadingSource {
    fn next_reading(&mut self, buoy: &Buoy) -> SensorReading;

    /// Called once after every buoy has been read, for sources that step a
    /// shared schedule per cycle rather than per buoy. Default: nothing.
    fn advance_cycle(&mut self) {}
}

/// Consumes escalation events. The fleet has no knowledge of how they are
/// displayed.
pub trait NotificationSink {
    fn notify(&mut self, event: &Escalation);
}

/// Prints escalations to stdout and mirrors them into the service log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&mut self, event: &Escalation) {
        println!("⚠ {}", event);
        logging::warn(
            DataSource::Monitor,
            Some(&event.buoy_id),
            &format!("status escalated: {} -> {}", event.previous, event.current),
        );
    }
}

/// Captures events for inspection. Test sink.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Escalation>,
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, event: &Escalation) {
        self.events.push(event.clone());
    }
}

// ---------------------------------------------------------------------------
// Buoy records
// ---------------------------------------------------------------------------

/// One monitored buoy: identity, position, latest reading, and the status
/// pair the escalation comparison runs over.
#[derive(Debug, Clone)]
pub struct Buoy {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reading: SensorReading,
    pub status: Status,
    /// Status before the most recent classification. Overwritten immediately
    /// before `status` is recomputed, never retroactively.
    pub previous_status: Status,
    /// Resolved display address; `None` until geocoding succeeds.
    pub address: Option<String>,
    pub flow_series: SeriesBuffer,
    pub level_series: SeriesBuffer,
    pub temp_series: SeriesBuffer,
}

impl Buoy {
    /// Builds a buoy from registry metadata, deriving the initial status
    /// from the deployment reading.
    fn from_station(station: &BuoyStation, series_capacity: usize) -> Self {
        let reading = station.initial_reading;
        let status = classify(reading.flow_rate_mps, reading.sediment_present);
        Self {
            id: station.id.to_string(),
            name: station.name.to_string(),
            latitude: station.latitude,
            longitude: station.longitude,
            reading,
            status,
            previous_status: status,
            address: None,
            flow_series: SeriesBuffer::new(series_capacity),
            level_series: SeriesBuffer::new(series_capacity),
            temp_series: SeriesBuffer::new(series_capacity),
        }
    }
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// One row of the dashboard's activity table.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub buoy_id: String,
    pub buoy_name: String,
    pub status: Status,
    pub water_level_m: f64,
    pub flow_rate_mps: f64,
    pub sediment_present: bool,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    /// Timestamp in the log table's display format.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// How many activity rows are retained by default.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 200;

// ---------------------------------------------------------------------------
// Fleet
// ---------------------------------------------------------------------------

/// Everything one evaluation cycle produced, for the presentation layer.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub escalations: Vec<Escalation>,
    pub counts: StatusCounts,
}

/// The orchestrator owning all buoy records and the single update path.
pub struct Fleet {
    buoys: Vec<Buoy>,
    activity: VecDeque<ActivityEntry>,
    activity_capacity: usize,
    counts: StatusCounts,
}

impl Fleet {
    /// Builds the fleet from the static registry with default window sizes.
    pub fn from_registry() -> Self {
        Self::with_capacities(
            crate::history::DEFAULT_SERIES_CAPACITY,
            DEFAULT_ACTIVITY_CAPACITY,
        )
    }

    /// Builds the fleet from the static registry with explicit series and
    /// activity-log capacities (both from configuration).
    pub fn with_capacities(series_capacity: usize, activity_capacity: usize) -> Self {
        let buoys: Vec<Buoy> = BUOY_REGISTRY
            .iter()
            .map(|station| Buoy::from_station(station, series_capacity))
            .collect();
        let counts = StatusCounts::from_statuses(buoys.iter().map(|b| b.status));
        Self {
            buoys,
            activity: VecDeque::new(),
            activity_capacity: activity_capacity.max(1),
            counts,
        }
    }

    /// Runs one evaluation cycle at the given instant.
    ///
    /// Idempotent with respect to classification: a source that returns an
    /// unchanged reading yields an unchanged status and no notification.
    pub fn run_cycle_at(
        &mut self,
        source: &mut dyn ReadingSource,
        sink: &mut dyn NotificationSink,
        now: DateTime<Utc>,
    ) -> CycleOutcome {
        let mut escalations = Vec::new();

        for buoy in &mut self.buoys {
            let reading = source.next_reading(buoy);

            buoy.previous_status = buoy.status;
            buoy.reading = reading;
            buoy.status = classify(reading.flow_rate_mps, reading.sediment_present);

            if let Some(event) =
                escalation_event(&buoy.id, &buoy.name, buoy.previous_status, buoy.status)
            {
                sink.notify(&event);
                escalations.push(event);
            }

            buoy.flow_series.push(now, reading.flow_rate_mps);
            buoy.level_series.push(now, reading.water_level_m);
            buoy.temp_series.push(now, reading.temperature_c);

            if self.activity.len() == self.activity_capacity {
                self.activity.pop_back();
            }
            self.activity.push_front(ActivityEntry {
                buoy_id: buoy.id.clone(),
                buoy_name: buoy.name.clone(),
                status: buoy.status,
                water_level_m: reading.water_level_m,
                flow_rate_mps: reading.flow_rate_mps,
                sediment_present: reading.sediment_present,
                timestamp: now,
            });
        }

        source.advance_cycle();

        // From scratch, never incrementally: the counts can only ever
        // reflect the fleet as it stands.
        self.counts = StatusCounts::from_statuses(self.buoys.iter().map(|b| b.status));

        CycleOutcome {
            escalations,
            counts: self.counts.clone(),
        }
    }

    /// Convenience wrapper that uses the real current time.
    /// Use `run_cycle_at` in tests to keep them deterministic.
    pub fn run_cycle(
        &mut self,
        source: &mut dyn ReadingSource,
        sink: &mut dyn NotificationSink,
    ) -> CycleOutcome {
        self.run_cycle_at(source, sink, Utc::now())
    }

    /// Replaces a buoy's status outright, bypassing the classifier.
    ///
    /// An operator action: the new value is not validated against the
    /// current reading, and no history is retained beyond `previous_status`
    /// at the next cycle. Returns the replaced status, or `None` for an
    /// unknown id.
    pub fn override_status(&mut self, buoy_id: &str, status: Status) -> Option<Status> {
        let buoy = self.buoys.iter_mut().find(|b| b.id == buoy_id)?;
        let replaced = buoy.status;
        buoy.status = status;
        logging::info(
            DataSource::Monitor,
            Some(buoy_id),
            &format!("status manually overridden: {} -> {}", replaced, status),
        );
        Some(replaced)
    }

    /// All buoys, registry order.
    pub fn buoys(&self) -> &[Buoy] {
        &self.buoys
    }

    /// Looks up a buoy by id.
    pub fn buoy(&self, id: &str) -> Option<&Buoy> {
        self.buoys.iter().find(|b| b.id == id)
    }

    /// Stores a resolved address on a buoy. Returns false for an unknown id.
    pub fn set_address(&mut self, buoy_id: &str, address: String) -> bool {
        match self.buoys.iter_mut().find(|b| b.id == buoy_id) {
            Some(buoy) => {
                buoy.address = Some(address);
                true
            }
            None => false,
        }
    }

    /// The aggregate counts as of the last cycle (or initialization).
    pub fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    /// Activity rows, newest first.
    pub fn activity(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.activity.iter()
    }

    /// Per-buoy snapshots for the summary panel.
    pub fn summaries(&self) -> Vec<BuoySummary> {
        self.buoys
            .iter()
            .map(|b| {
                BuoySummary::new(
                    &b.id,
                    &b.name,
                    b.status,
                    &b.reading,
                    b.latitude,
                    b.longitude,
                    b.address.as_deref(),
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
