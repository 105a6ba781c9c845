use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Deserialize;

use orbitwatch_domain::{Credentials, ElementSet, MonitorError};
use orbitwatch_ports::ElementSetProvider;

/// One row of a `tle_latest` JSON response. Space-Track serializes every
/// field as a string.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TleRow {
    #[serde(rename = "NORAD_CAT_ID")]
    pub norad_cat_id: String,
    #[serde(rename = "OBJECT_NAME")]
    pub object_name: String,
    #[serde(rename = "TLE_LINE1")]
    pub tle_line1: String,
    #[serde(rename = "TLE_LINE2")]
    pub tle_line2: String,
    #[serde(rename = "EPOCH")]
    pub epoch: String,
}

impl TleRow {
    pub(crate) fn into_element_set(self) -> Result<ElementSet, MonitorError> {
        let norad_id = self.norad_cat_id.trim().parse::<u32>().map_err(|_| {
            MonitorError::DataFetch(format!("bad catalog id {:?}", self.norad_cat_id))
        })?;
        let epoch = parse_epoch(&self.epoch).ok_or_else(|| MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("unparseable epoch {:?}", self.epoch),
        })?;
        Ok(ElementSet {
            norad_id,
            name: self.object_name.trim().to_string(),
            line1: self.tle_line1,
            line2: self.tle_line2,
            epoch,
        })
    }
}

fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// HTTP client for the Space-Track API. Authenticates per fetch and
/// forwards the session cookie to the query endpoint, the way the upstream
/// service expects.
pub struct SpaceTrackClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpaceTrackClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, MonitorError> {
        let response = self
            .http
            .post(format!("{}/ajaxauth/login", self.base_url))
            .form(&[
                ("identity", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MonitorError::DataFetch(format!("login request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MonitorError::AuthenticationFailed);
        }
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .unwrap_or_default();
        Ok(cookie)
    }
}

#[async_trait]
impl ElementSetProvider for SpaceTrackClient {
    async fn fetch_element_sets(
        &self,
        credentials: &Credentials,
        object_ids: &[u32],
    ) -> Result<Vec<ElementSet>, MonitorError> {
        let cookie = self.login(credentials).await?;

        let ids = object_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/basicspacedata/query/class/tle_latest/NORAD_CAT_ID/{ids}/orderby/NORAD_CAT_ID/format/json",
            self.base_url
        );

        let response = self
            .http
            .get(url)
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| MonitorError::DataFetch(format!("element set query failed: {e}")))?;
        if !response.status().is_success() {
            return Err(MonitorError::DataFetch(format!(
                "element set query returned {}",
                response.status()
            )));
        }

        let rows: Vec<TleRow> = response
            .json()
            .await
            .map_err(|e| MonitorError::DataFetch(format!("bad element set payload: {e}")))?;

        let mut sets = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_element_set() {
                Ok(set) => sets.push(set),
                // One bad row must not cost the rest of the fleet.
                Err(error) => tracing::warn!(%error, "skipping malformed element set row"),
            }
        }
        tracing::info!(count = sets.len(), "fetched element sets from provider");
        Ok(sets)
    }
}
