//! Fixed-column extraction of mean orbital elements from two-line sets.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use orbitwatch_domain::{ElementSet, MonitorError};

/// Mean orbital elements parsed from an element set, angles in degrees,
/// mean motion in revolutions per day.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanElements {
    pub norad_id: u32,
    pub epoch: DateTime<Utc>,
    pub mean_motion_rev_day: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
}

fn field(line: &str, range: std::ops::Range<usize>, norad_id: u32) -> Result<f64, MonitorError> {
    let raw = line
        .get(range.clone())
        .ok_or_else(|| MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("line shorter than column {}", range.end),
        })?
        .trim();
    raw.parse::<f64>()
        .map_err(|_| MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("unparseable field {raw:?} at columns {}..{}", range.start, range.end),
        })
}

/// Eccentricity is stored with an implied leading "0." in columns 26..33.
fn eccentricity_field(line: &str, norad_id: u32) -> Result<f64, MonitorError> {
    let raw = line
        .get(26..33)
        .ok_or_else(|| MonitorError::ElementSetMalformed {
            norad_id,
            reason: "line 2 shorter than eccentricity columns".to_string(),
        })?
        .trim();
    format!("0.{raw}")
        .parse::<f64>()
        .map_err(|_| MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("unparseable eccentricity {raw:?}"),
        })
}

/// Epoch in line 1 is a two-digit year (columns 18..20) and a fractional
/// day of year (columns 20..32). Years below 57 are 2000s.
pub fn parse_epoch(line1: &str, norad_id: u32) -> Result<DateTime<Utc>, MonitorError> {
    let yy = field(line1, 18..20, norad_id)? as i32;
    let doy = field(line1, 20..32, norad_id)?;
    let year = if yy < 57 { 2000 + yy } else { 1900 + yy };
    let ordinal = doy.floor() as u32;
    let date = NaiveDate::from_yo_opt(year, ordinal).ok_or_else(|| {
        MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("day of year {ordinal} out of range for {year}"),
        }
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| MonitorError::ElementSetMalformed {
        norad_id,
        reason: "invalid epoch midnight".to_string(),
    })?;
    let frac_ms = ((doy - doy.floor()) * 86_400_000.0).round() as i64;
    Ok(Utc.from_utc_datetime(&(midnight + Duration::milliseconds(frac_ms))))
}

/// Extracts mean elements from the two fixed-format lines. Checksums are
/// not verified; out-of-range and non-finite fields are rejected.
pub fn parse_element_set(set: &ElementSet) -> Result<MeanElements, MonitorError> {
    let norad_id = set.norad_id;
    let epoch = parse_epoch(&set.line1, norad_id)?;

    let inclination_deg = field(&set.line2, 8..16, norad_id)?;
    let raan_deg = field(&set.line2, 17..25, norad_id)?;
    let eccentricity = eccentricity_field(&set.line2, norad_id)?;
    let arg_perigee_deg = field(&set.line2, 34..42, norad_id)?;
    let mean_anomaly_deg = field(&set.line2, 43..51, norad_id)?;
    let mean_motion_rev_day = field(&set.line2, 52..63, norad_id)?;

    let elements = MeanElements {
        norad_id,
        epoch,
        mean_motion_rev_day,
        eccentricity,
        inclination_deg,
        raan_deg,
        arg_perigee_deg,
        mean_anomaly_deg,
    };

    if !(0.0..1.0).contains(&elements.eccentricity) {
        return Err(MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("eccentricity {} outside [0, 1)", elements.eccentricity),
        });
    }
    if elements.mean_motion_rev_day <= 0.0 || !elements.mean_motion_rev_day.is_finite() {
        return Err(MonitorError::ElementSetMalformed {
            norad_id,
            reason: format!("mean motion {} not positive", elements.mean_motion_rev_day),
        });
    }
    Ok(elements)
}
