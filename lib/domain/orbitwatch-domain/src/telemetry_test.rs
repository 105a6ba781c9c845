use chrono::{TimeZone, Utc};

use crate::telemetry::{TelemetryChannel, TelemetrySample, CHANNEL_COUNT};

fn sample() -> TelemetrySample {
    TelemetrySample {
        altitude_km: 412.0,
        velocity_km_s: 7.66,
        power_pct: 91.0,
        temperature_c: 21.5,
        communication_pct: 97.0,
        voltage_v: 12.1,
        solar_efficiency_pct: 88.0,
        attitude_control_pct: 95.0,
        fuel_level_pct: 76.0,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn vector_order_matches_channel_order() {
    let s = sample();
    let vector = s.as_vector();
    assert_eq!(vector.len(), CHANNEL_COUNT);
    for (i, channel) in TelemetryChannel::ALL.iter().enumerate() {
        assert_eq!(vector[i], s.channel(*channel), "channel {channel:?} out of order");
    }
}

#[test]
fn validate_rejects_non_finite_channels() {
    let mut s = sample();
    assert!(s.validate().is_ok());
    s.temperature_c = f64::NAN;
    assert!(s.validate().is_err());
}
