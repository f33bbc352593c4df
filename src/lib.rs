//! Buoy monitoring service.
//!
//! Derives a discrete status for each monitored buoy from its sensor
//! readings, detects severity escalations, and maintains the aggregate
//! views, series windows, and activity log consumed by the dashboard.
//!
//! Module map:
//! - `model` — shared domain types; no logic, no I/O.
//! - `alert` — the decision layer: classification and escalation detection.
//! - `buoys` — the registry of monitored buoys.
//! - `monitor` — fleet orchestration and the per-cycle update path.
//! - `simulate` — synthetic reading sources (random walk, flood demo).
//! - `analysis` — aggregate views over the fleet.
//! - `history` — rolling sample windows for the charts.
//! - `geocode` — reverse-geocoding lookups (best effort, never load-bearing).
//! - `config`, `logging` — service plumbing.

pub mod alert;
pub mod analysis;
pub mod buoys;
pub mod config;
pub mod geocode;
pub mod history;
pub mod logging;
pub mod model;
pub mod monitor;
pub mod simulate;
