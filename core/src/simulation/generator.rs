use crate::math::geo::flat_earth_offset;
use crate::record::Sample;
use crate::simulation::clock::{Clock, SystemClock};
use crate::simulation::config::{ConfigError, GeneratorConfig};
use crate::simulation::profile::{
    baseline_temperature, MotionProfile, ACCEL_NOISE_STD, GYRO_NOISE_STD, TEMPERATURE_NOISE_STD,
};
use crate::telemetry::log::LogManager;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Mutable position and time owned by one generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub current_lat: f64,
    pub current_lon: f64,
    pub current_time: f64,
}

/// Random-walk motion and sensor synthesizer for a single animal.
///
/// Each generator owns its state exclusively; run concurrent streams on
/// separate instances.
pub struct TelemetryGenerator<C: Clock = SystemClock> {
    config: GeneratorConfig,
    profile: MotionProfile,
    baseline_temp: f64,
    state: SimulationState,
    rng: StdRng,
    pub(crate) clock: C,
    logger: LogManager,
}

impl TelemetryGenerator<SystemClock> {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TelemetryGenerator<C> {
    pub fn with_clock(config: GeneratorConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let profile = MotionProfile::for_mode(&config.movement_mode);
        let baseline_temp = baseline_temperature(&config.species);
        let state = SimulationState {
            current_lat: config.start_latitude,
            current_lon: config.start_longitude,
            current_time: 0.0,
        };
        Ok(Self {
            config,
            profile,
            baseline_temp,
            state,
            rng,
            clock,
            logger: LogManager::new("wildcore::simulation"),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Returns to the configured start position and time zero. With a fixed
    /// seed the random sequence restarts as well.
    pub fn reset(&mut self) {
        self.state = SimulationState {
            current_lat: self.config.start_latitude,
            current_lon: self.config.start_longitude,
            current_time: 0.0,
        };
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.clock.reset();
        self.logger.detail(&format!(
            "reset {} {} to ({:.6}, {:.6})",
            self.config.species,
            self.config.movement_mode,
            self.state.current_lat,
            self.state.current_lon
        ));
    }

    /// Advances the simulation one time step and emits the resulting sample.
    pub fn step(&mut self) -> Sample {
        let (latitude, longitude) = self.advance_position();
        let [accel_x, accel_y, accel_z] = self.triaxial(self.profile.accel_base, ACCEL_NOISE_STD);
        let [gyro_x, gyro_y, gyro_z] = self.triaxial(self.profile.gyro_base, GYRO_NOISE_STD);
        let compass = self.rng.gen_range(0.0..360.0);
        let temperature = self.gaussian(self.baseline_temp, TEMPERATURE_NOISE_STD);
        self.state.current_time += 1.0 / self.config.sampling_rate_hz;

        Sample {
            timestamp: self.clock.now(),
            species: self.config.species.clone(),
            movement_mode: self.config.movement_mode.clone(),
            latitude,
            longitude,
            accel_x,
            accel_y,
            accel_z,
            gyro_x,
            gyro_y,
            gyro_z,
            compass,
            temperature,
        }
    }

    fn advance_position(&mut self) -> (f64, f64) {
        let bearing = self.rng.gen_range(0.0f64..360.0).to_radians();
        let (lat, lon) = flat_earth_offset(
            self.state.current_lat,
            self.state.current_lon,
            self.profile.step_m,
            bearing,
        );
        self.state.current_lat = lat;
        self.state.current_lon = lon;
        (lat, lon)
    }

    fn triaxial(&mut self, base: f64, std: f64) -> [f64; 3] {
        [
            self.gaussian(base, std),
            self.gaussian(base, std),
            self.gaussian(base, std),
        ]
    }

    fn gaussian(&mut self, mean: f64, std: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std * z
    }
}
