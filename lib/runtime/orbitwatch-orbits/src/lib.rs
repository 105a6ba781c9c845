//! Orbital propagation and telemetry synthesis. Pure compute, no I/O.

pub mod geodetic;
pub mod propagator;
pub mod synthesizer;
pub mod tle;

pub use geodetic::{geodetic, geodetic_spherical, gmst_rad, wrap_longitude_deg};
pub use propagator::propagate;
pub use synthesizer::{ChaChaNoise, FixedNoise, NoiseSource, TelemetrySynthesizer};
pub use tle::{parse_element_set, MeanElements};

#[cfg(test)]
mod propagator_test;
