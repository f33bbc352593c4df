/// Nominatim reverse-geocoding client.
///
/// Resolves buoy coordinates to a display address for the summary panel and
/// map popups. This is the service's only remote dependency, and it is
/// strictly cosmetic: a failed lookup is logged and swallowed at this
/// boundary, the buoy keeps `address: None`, and classification and
/// escalation detection proceed untouched.
///
/// API documentation: https://nominatim.org/release-docs/latest/api/Reverse/

use serde::Deserialize;

use crate::logging;
use crate::model::GeocodeError;
use crate::monitor::Fleet;

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("buoymon_service/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// API response structures
// ---------------------------------------------------------------------------

/// Reverse-geocoding response from Nominatim (`format=jsonv2`).
/// Only the display name is used; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
}

impl ReverseResponse {
    /// Extracts a usable address, treating an absent or empty display name
    /// as no result.
    pub fn into_address(self) -> Result<String, GeocodeError> {
        match self.display_name {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(GeocodeError::NoAddressFound),
        }
    }
}

// ---------------------------------------------------------------------------
// API client functions
// ---------------------------------------------------------------------------

/// Builds the reverse-geocoding URL for a position.
///
/// `zoom=14` asks for suburb-level granularity, which reads better on the
/// dashboard than a house-number match for a mid-river float.
pub fn build_reverse_url(latitude: f64, longitude: f64) -> String {
    format!(
        "{}/reverse?format=jsonv2&lat={}&lon={}&zoom=14",
        NOMINATIM_BASE_URL, latitude, longitude
    )
}

/// Resolves a position to a display address.
pub fn reverse_geocode(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
) -> Result<String, GeocodeError> {
    let url = build_reverse_url(latitude, longitude);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(|e| GeocodeError::RequestError(e.to_string()))?;

    if !response.status().is_success() {
        return Err(GeocodeError::HttpError(response.status().as_u16()));
    }

    let parsed: ReverseResponse = response
        .json()
        .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

    parsed.into_address()
}

// ---------------------------------------------------------------------------
// Fleet boundary
// ---------------------------------------------------------------------------

/// Resolves addresses for every buoy that does not have one yet.
///
/// This is the swallowing boundary: failures are classified and logged, the
/// buoy keeps `None`, and the caller may retry on a later pass. Returns the
/// number of addresses resolved.
pub fn resolve_missing_addresses(client: &reqwest::blocking::Client, fleet: &mut Fleet) -> usize {
    let pending: Vec<(String, f64, f64)> = fleet
        .buoys()
        .iter()
        .filter(|b| b.address.is_none())
        .map(|b| (b.id.clone(), b.latitude, b.longitude))
        .collect();

    let mut resolved = 0;
    for (id, lat, lng) in pending {
        match reverse_geocode(client, lat, lng) {
            Ok(address) => {
                logging::info(
                    logging::DataSource::Geocode,
                    Some(&id),
                    &format!("resolved address: {}", address),
                );
                fleet.set_address(&id, address);
                resolved += 1;
            }
            Err(err) => {
                logging::log_geocode_failure(&id, "reverse geocode", &err);
            }
        }
    }
    resolved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_url_contains_position_and_format() {
        let url = build_reverse_url(8.4735907, 124.8698826);
        assert!(url.starts_with("https://nominatim.openstreetmap.org/reverse"));
        assert!(url.contains("format=jsonv2"));
        assert!(url.contains("lat=8.4735907"));
        assert!(url.contains("lon=124.8698826"));
        assert!(url.contains("zoom=14"));
    }

    #[test]
    fn test_response_parsing_extracts_display_name() {
        // Trimmed Nominatim jsonv2 payload.
        let body = r#"{
            "place_id": 297602139,
            "display_name": "Macasandig, Cagayan de Oro, Misamis Oriental, Philippines",
            "lat": "8.4570565",
            "lon": "124.6378592"
        }"#;
        let parsed: ReverseResponse = serde_json::from_str(body).expect("payload should parse");
        assert_eq!(
            parsed.into_address().unwrap(),
            "Macasandig, Cagayan de Oro, Misamis Oriental, Philippines",
        );
    }

    #[test]
    fn test_missing_display_name_is_no_address() {
        let parsed: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).expect("should parse");
        assert_eq!(parsed.into_address(), Err(GeocodeError::NoAddressFound));
    }

    #[test]
    fn test_empty_display_name_is_no_address() {
        let parsed: ReverseResponse =
            serde_json::from_str(r#"{"display_name": "  "}"#).expect("should parse");
        assert_eq!(parsed.into_address(), Err(GeocodeError::NoAddressFound));
    }

    #[test]
    #[ignore] // Don't run in CI - depends on external API
    fn test_live_reverse_geocode_of_first_buoy() {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();
        let buoy = &crate::buoys::BUOY_REGISTRY[0];
        let address = reverse_geocode(&client, buoy.latitude, buoy.longitude)
            .expect("Nominatim should resolve the deployment area");
        assert!(!address.is_empty());
    }
}
