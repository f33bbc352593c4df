/// Buoy registry for the monitoring service.
///
/// Defines the canonical list of sensor buoys monitored by this service,
/// along with their metadata and initial sensor values. This is the single
/// source of truth for buoy ids; all other modules should reference buoys
/// from here rather than hardcoding ids.

use crate::model::SensorReading;

// ---------------------------------------------------------------------------
// Buoy metadata
// ---------------------------------------------------------------------------

/// Static metadata for a single monitored buoy.
pub struct BuoyStation {
    /// Stable buoy id, e.g. "B01".
    pub id: &'static str,
    /// Display name shown in notifications and the activity log.
    pub name: &'static str,
    /// Human-readable description of the buoy's role in the deployment.
    pub description: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Sensor values reported at deployment, used to seed the fleet before
    /// the first cycle.
    pub initial_reading: SensorReading,
}

/// All monitored buoys along the Cagayan de Oro river reach, ordered from
/// downstream to upstream.
pub static BUOY_REGISTRY: &[BuoyStation] = &[
    BuoyStation {
        id: "B01",
        name: "Buoy 01",
        description: "Downstream reference buoy nearest the city reach. \
                      Use for current conditions at the populated bank.",
        latitude: 8.4735907,
        longitude: 124.8698826,
        initial_reading: SensorReading {
            flow_rate_mps: 2.5,
            water_level_m: 1.20,
            temperature_c: 28.3,
            sediment_present: false,
        },
    },
    BuoyStation {
        id: "B02",
        name: "Buoy 02",
        description: "Mid-reach buoy below the main tributary confluence. \
                      Rising flow here typically leads the city reach.",
        latitude: 8.5151001,
        longitude: 124.8063018,
        initial_reading: SensorReading {
            flow_rate_mps: 1.8,
            water_level_m: 0.95,
            temperature_c: 27.4,
            sediment_present: true,
        },
    },
    BuoyStation {
        id: "B03",
        name: "Buoy 03",
        description: "Upstream warning buoy. Earliest indicator of runoff \
                      surges entering the monitored reach.",
        latitude: 8.5390109,
        longitude: 124.7704314,
        initial_reading: SensorReading {
            flow_rate_mps: 1.2,
            water_level_m: 1.40,
            temperature_c: 29.1,
            sediment_present: false,
        },
    },
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Returns the ids of all registered buoys.
pub fn all_buoy_ids() -> Vec<&'static str> {
    BUOY_REGISTRY.iter().map(|b| b.id).collect()
}

/// Looks up a buoy by id. Returns `None` if not found.
pub fn find_buoy(id: &str) -> Option<&'static BuoyStation> {
    BUOY_REGISTRY.iter().find(|b| b.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buoy_ids_are_valid_format() {
        // Ids are "B" followed by a two-digit ordinal. The format is the
        // shape of our data identifiers, so lock it down here.
        for buoy in BUOY_REGISTRY {
            assert_eq!(buoy.id.len(), 3, "id {} should be 3 characters", buoy.id);
            assert!(buoy.id.starts_with('B'), "id {} should start with B", buoy.id);
            assert!(
                buoy.id[1..].chars().all(|c| c.is_ascii_digit()),
                "id {} should end in digits",
                buoy.id,
            );
        }
    }

    #[test]
    fn test_buoy_ids_are_unique() {
        let ids = all_buoy_ids();
        for (i, id) in ids.iter().enumerate() {
            assert!(
                !ids[i + 1..].contains(id),
                "duplicate buoy id {} in registry",
                id,
            );
        }
    }

    #[test]
    fn test_coordinates_are_plausible() {
        // All buoys sit on one river reach; coordinates must be real WGS84
        // values in the deployment area, not placeholder zeros.
        for buoy in BUOY_REGISTRY {
            assert!(
                buoy.latitude > 8.0 && buoy.latitude < 9.0,
                "{} latitude out of deployment range",
                buoy.id,
            );
            assert!(
                buoy.longitude > 124.0 && buoy.longitude < 125.0,
                "{} longitude out of deployment range",
                buoy.id,
            );
        }
    }

    #[test]
    fn test_find_buoy_by_id() {
        let buoy = find_buoy("B02").expect("B02 should be registered");
        assert_eq!(buoy.name, "Buoy 02");
        assert!(buoy.initial_reading.sediment_present);
    }

    #[test]
    fn test_find_unknown_buoy_returns_none() {
        assert!(find_buoy("B99").is_none());
    }

    #[test]
    fn test_initial_readings_are_physical() {
        for buoy in BUOY_REGISTRY {
            let r = &buoy.initial_reading;
            assert!(r.flow_rate_mps > 0.0, "{} flow should be positive", buoy.id);
            assert!(r.water_level_m > 0.0, "{} level should be positive", buoy.id);
            assert!(
                (20.0..=35.0).contains(&r.temperature_c),
                "{} temperature outside sensor envelope",
                buoy.id,
            );
        }
    }
}
