//! OSRM HTTP adapter for road distance matrices.

use serde::Deserialize;
use tracing::warn;

use crate::error::{PlanError, Result};
use crate::models::Coordinate;
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Road-network distances from an OSRM `table` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn table_url(&self, locations: &[Coordinate]) -> String {
        // OSRM wants lon,lat
        let coords = locations
            .iter()
            .map(|location| format!("{:.6},{:.6}", location.lon, location.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[Coordinate]) -> Result<Vec<Vec<f64>>> {
        if locations.len() < 2 {
            return Ok(vec![vec![0.0; locations.len()]; locations.len()]);
        }

        let body = self
            .client
            .get(self.table_url(locations))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())?;

        body.into_matrix(locations.len()).inspect_err(|err| {
            warn!(locations = locations.len(), error = %err, "unusable OSRM table response");
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn into_matrix(self, n: usize) -> Result<Vec<Vec<f64>>> {
        if self.code != "Ok" {
            return Err(PlanError::distance_matrix(format!(
                "OSRM answered {}: {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }

        let rows = self
            .distances
            .ok_or_else(|| PlanError::distance_matrix("OSRM response has no distances"))?;
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(PlanError::distance_matrix(format!(
                "OSRM returned a matrix of the wrong shape for {n} locations"
            )));
        }

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(j, value)| {
                        value.ok_or_else(|| {
                            PlanError::distance_matrix(format!("no road path from {i} to {j}"))
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OsrmTableResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_table_url_uses_lon_lat_order() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://osrm.local/".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let url = client.table_url(&[
            Coordinate::new(39.7392, -104.9903),
            Coordinate::new(39.742, -104.9982),
        ]);
        assert_eq!(
            url,
            "http://osrm.local/table/v1/foot/-104.990300,39.739200;-104.998200,39.742000?annotations=distance"
        );
    }

    #[test]
    fn test_single_location_needs_no_request() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();

        let matrix = client.matrix_for(&[Coordinate::new(39.7, -104.9)]).unwrap();
        assert_eq!(matrix, vec![vec![0.0]]);
    }

    #[test]
    fn test_response_into_matrix() {
        let response = parse(r#"{"code":"Ok","distances":[[0,812.4],[790.1,0]]}"#);
        let matrix = response.into_matrix(2).unwrap();
        assert_eq!(matrix, vec![vec![0.0, 812.4], vec![790.1, 0.0]]);
    }

    #[test]
    fn test_response_error_code() {
        let response = parse(r#"{"code":"InvalidQuery","message":"Query string malformed"}"#);
        let err = response.into_matrix(2).unwrap_err();
        assert!(err.to_string().contains("InvalidQuery"));
    }

    #[test]
    fn test_response_wrong_shape() {
        let response = parse(r#"{"code":"Ok","distances":[[0,1.0]]}"#);
        assert!(matches!(response.into_matrix(2), Err(PlanError::DistanceMatrix(_))));
    }

    #[test]
    fn test_response_unreachable_pair() {
        let response = parse(r#"{"code":"Ok","distances":[[0,null],[3.0,0]]}"#);
        let err = response.into_matrix(2).unwrap_err();
        assert!(err.to_string().contains("no road path from 0 to 1"));
    }
}
