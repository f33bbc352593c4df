/// Data organization utilities for the buoy monitoring service.
///
/// This module provides the aggregate views consumed by the dashboard.
/// Chart rendering, marker styling, and the log table itself are handled
/// by the presentation layer, which reads from these structures.
///
/// Submodules:
/// - `summary` — per-status counts and per-buoy fleet snapshots.

pub mod summary;
