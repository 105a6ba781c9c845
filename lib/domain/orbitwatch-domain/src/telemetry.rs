use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

pub const CHANNEL_COUNT: usize = 9;

/// Named telemetry channels in their canonical order.
///
/// The order of `TelemetryChannel::ALL` is the order `as_vector` emits and
/// the order every model consumes, for training and inference alike.
/// Reordering it silently corrupts normalization statistics, so both sides
/// go through this one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryChannel {
    Altitude,
    Velocity,
    Power,
    Temperature,
    Communication,
    Voltage,
    SolarEfficiency,
    AttitudeControl,
    FuelLevel,
}

impl TelemetryChannel {
    pub const ALL: [TelemetryChannel; CHANNEL_COUNT] = [
        TelemetryChannel::Altitude,
        TelemetryChannel::Velocity,
        TelemetryChannel::Power,
        TelemetryChannel::Temperature,
        TelemetryChannel::Communication,
        TelemetryChannel::Voltage,
        TelemetryChannel::SolarEfficiency,
        TelemetryChannel::AttitudeControl,
        TelemetryChannel::FuelLevel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TelemetryChannel::Altitude => "Altitude",
            TelemetryChannel::Velocity => "Velocity",
            TelemetryChannel::Power => "Power",
            TelemetryChannel::Temperature => "Temperature",
            TelemetryChannel::Communication => "Communication",
            TelemetryChannel::Voltage => "Voltage",
            TelemetryChannel::SolarEfficiency => "Solar Efficiency",
            TelemetryChannel::AttitudeControl => "Attitude Control",
            TelemetryChannel::FuelLevel => "Fuel Level",
        }
    }
}

/// One fixed-schema engineering telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub altitude_km: f64,
    pub velocity_km_s: f64,
    pub power_pct: f64,
    pub temperature_c: f64,
    pub communication_pct: f64,
    pub voltage_v: f64,
    pub solar_efficiency_pct: f64,
    pub attitude_control_pct: f64,
    pub fuel_level_pct: f64,
    pub timestamp: DateTime<Utc>,
}

impl TelemetrySample {
    /// Channel values in canonical order.
    pub fn as_vector(&self) -> [f64; CHANNEL_COUNT] {
        [
            self.altitude_km,
            self.velocity_km_s,
            self.power_pct,
            self.temperature_c,
            self.communication_pct,
            self.voltage_v,
            self.solar_efficiency_pct,
            self.attitude_control_pct,
            self.fuel_level_pct,
        ]
    }

    pub fn channel(&self, channel: TelemetryChannel) -> f64 {
        match channel {
            TelemetryChannel::Altitude => self.altitude_km,
            TelemetryChannel::Velocity => self.velocity_km_s,
            TelemetryChannel::Power => self.power_pct,
            TelemetryChannel::Temperature => self.temperature_c,
            TelemetryChannel::Communication => self.communication_pct,
            TelemetryChannel::Voltage => self.voltage_v,
            TelemetryChannel::SolarEfficiency => self.solar_efficiency_pct,
            TelemetryChannel::AttitudeControl => self.attitude_control_pct,
            TelemetryChannel::FuelLevel => self.fuel_level_pct,
        }
    }

    /// Rejects non-finite values at the synthesizer/scorer boundary.
    pub fn validate(&self) -> Result<(), MonitorError> {
        for (channel, value) in TelemetryChannel::ALL.iter().zip(self.as_vector()) {
            if !value.is_finite() {
                return Err(MonitorError::TelemetryInvalid {
                    channel: channel.label(),
                    value,
                });
            }
        }
        Ok(())
    }
}
