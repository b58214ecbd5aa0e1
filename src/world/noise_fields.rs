//! Seeded fractal noise fields feeding the terrain classifier.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::config::WorldGenConfig;

// Per-field seed offsets keep the four fields uncorrelated.
const MOISTURE_SEED_OFFSET: u64 = 101;
const TEMPERATURE_SEED_OFFSET: u64 = 211;
const RIVER_SEED_OFFSET: u64 = 307;

/// Per-tile samples of the four generation fields.
///
/// Elevation and river stay in `[-1, 1]`; moisture and temperature are
/// remapped to `[0, 1]` for the classifier's thresholds.
#[derive(Clone, Copy, Debug)]
pub struct TileSample {
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub river: f64,
}

/// Four independent fBm fields derived from one world seed.
pub struct NoiseFields {
    elevation: Fbm<Perlin>,
    moisture: Fbm<Perlin>,
    temperature: Fbm<Perlin>,
    river: Fbm<Perlin>,
}

impl NoiseFields {
    pub fn new(seed: u64, config: &WorldGenConfig) -> Self {
        let field = |seed: u64, frequency: f64| {
            Fbm::<Perlin>::new(seed as u32)
                .set_frequency(frequency)
                .set_octaves(config.octaves)
                .set_persistence(config.persistence)
                .set_lacunarity(config.lacunarity)
        };
        Self {
            elevation: field(seed, config.frequency),
            moisture: field(
                seed.wrapping_add(MOISTURE_SEED_OFFSET),
                config.climate_frequency,
            ),
            temperature: field(
                seed.wrapping_add(TEMPERATURE_SEED_OFFSET),
                config.climate_frequency,
            ),
            river: field(seed.wrapping_add(RIVER_SEED_OFFSET), config.climate_frequency),
        }
    }

    /// Samples all four fields at a grid position.
    pub fn sample(&self, row: usize, col: usize) -> TileSample {
        let point = [col as f64, row as f64];
        TileSample {
            elevation: self.elevation.get(point).clamp(-1.0, 1.0),
            moisture: to_unit(self.moisture.get(point)),
            temperature: to_unit(self.temperature.get(point)),
            river: self.river.get(point).clamp(-1.0, 1.0),
        }
    }
}

/// Remaps `[-1, 1]` noise to `[0, 1]`.
fn to_unit(value: f64) -> f64 {
    (value.clamp(-1.0, 1.0) + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_samples_identically() {
        let config = WorldGenConfig::default();
        let a = NoiseFields::new(9, &config);
        let b = NoiseFields::new(9, &config);
        for row in 0..16 {
            for col in 0..16 {
                let sa = a.sample(row, col);
                let sb = b.sample(row, col);
                assert_eq!(sa.elevation, sb.elevation);
                assert_eq!(sa.moisture, sb.moisture);
                assert_eq!(sa.temperature, sb.temperature);
                assert_eq!(sa.river, sb.river);
            }
        }
    }

    #[test]
    fn samples_stay_in_range() {
        let config = WorldGenConfig::default();
        let fields = NoiseFields::new(3, &config);
        for row in 0..32 {
            for col in 0..32 {
                let s = fields.sample(row, col);
                assert!((-1.0..=1.0).contains(&s.elevation));
                assert!((0.0..=1.0).contains(&s.moisture));
                assert!((0.0..=1.0).contains(&s.temperature));
                assert!((-1.0..=1.0).contains(&s.river));
            }
        }
    }

    #[test]
    fn fields_are_uncorrelated() {
        let config = WorldGenConfig::default();
        let fields = NoiseFields::new(11, &config);
        let mut elevation_matches_moisture = true;
        for i in 0..16 {
            let s = fields.sample(i, i * 3);
            if s.elevation != s.moisture * 2.0 - 1.0 {
                elevation_matches_moisture = false;
            }
        }
        assert!(!elevation_matches_moisture);
    }
}
