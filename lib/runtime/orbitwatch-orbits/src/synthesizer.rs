//! Engineering telemetry synthesis from orbital state. Every channel is a
//! deterministic function of the state plus bounded noise, clipped to its
//! valid range; the noise source is a trait so tests can pin it.

use chrono::Timelike;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use orbitwatch_domain::{GeodeticPosition, OrbitalState, TelemetrySample};

/// Uniform noise in [0, 1). Implementations must be cheap; the synthesizer
/// draws several values per sample.
pub trait NoiseSource: Send {
    fn unit(&mut self) -> f64;
}

pub struct ChaChaNoise(ChaCha8Rng);

impl ChaChaNoise {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl NoiseSource for ChaChaNoise {
    fn unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Constant noise source for tests; 0.5 centres every noise band.
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

fn pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

pub struct TelemetrySynthesizer<N: NoiseSource> {
    noise: N,
}

impl TelemetrySynthesizer<ChaChaNoise> {
    /// Default synthesizer; `seed` pins the noise stream for reproducible
    /// runs, `None` draws from entropy.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let noise = match seed {
            Some(seed) => ChaChaNoise::seeded(seed),
            None => ChaChaNoise::from_entropy(),
        };
        Self::new(noise)
    }
}

impl<N: NoiseSource> TelemetrySynthesizer<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Derives the nine-channel sample for one propagated state.
    ///
    /// Power follows sun-angle geometry; temperature follows sun exposure
    /// and altitude; the voltage regime splits on the power bus being
    /// sunlit-charged (> 80%).
    pub fn synthesize(
        &mut self,
        state: &OrbitalState,
        position: &GeodeticPosition,
    ) -> TelemetrySample {
        let hour = state.timestamp.hour() as f64 + state.timestamp.minute() as f64 / 60.0;
        let sun_angle = ((hour * 15.0 + position.longitude_deg).to_radians()).cos();

        let power = pct(80.0 + sun_angle * 20.0 + self.noise.unit() * 5.0);
        let temperature = (20.0 + sun_angle * 30.0 - position.altitude_km / 100.0
            + (self.noise.unit() - 0.5) * 10.0)
            .clamp(-120.0, 150.0);
        let communication = pct(90.0 + self.noise.unit() * 10.0);
        let voltage = if power > 80.0 {
            12.0 + (self.noise.unit() - 0.5)
        } else {
            10.0 + self.noise.unit() * 2.0
        };
        let solar_efficiency = pct(power - 5.0 + self.noise.unit() * 10.0);
        let attitude_control = pct(95.0 + (self.noise.unit() - 0.5) * 10.0);
        let fuel_level = pct(80.0 + (self.noise.unit() - 0.5) * 30.0);

        TelemetrySample {
            altitude_km: position.altitude_km,
            velocity_km_s: state.speed_km_s(),
            power_pct: power,
            temperature_c: temperature,
            communication_pct: communication,
            voltage_v: voltage,
            solar_efficiency_pct: solar_efficiency,
            attitude_control_pct: attitude_control,
            fuel_level_pct: fuel_level,
            timestamp: state.timestamp,
        }
    }
}
