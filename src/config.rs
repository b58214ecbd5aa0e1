//! World generation options.

use serde::{Deserialize, Serialize};

/// Configuration for procedural world generation.
///
/// All fields have defaults tuned for archipelago-style maps; a given
/// configuration always reproduces the same world bit for bit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Base seed; retries perturb it by +1 per attempt
    pub seed: u64,
    /// Number of noise octaves for terrain detail
    pub octaves: usize,
    /// Per-octave amplitude falloff
    pub persistence: f64,
    /// Per-octave frequency growth
    pub lacunarity: f64,
    /// Elevation noise frequency per tile (lower = larger islands)
    pub frequency: f64,
    /// Frequency of the moisture/temperature/river fields
    pub climate_frequency: f64,
    /// Elevation below which a tile is water or reef
    pub sea_level: f64,
    /// Reef band offset below sea level (must be <= 0)
    pub reef_level: f64,
    /// Elevation above which land becomes hills
    pub hill_level: f64,
    /// Half-width of the river noise band carved through land
    pub river_threshold: f64,
    /// Maximum whole-pipeline attempts before accepting a degraded world
    pub max_retries: u32,
    /// Minimum island count the archipelago must reach
    pub min_islands: usize,
    /// Islands larger than this are eroded from the coast inward
    pub max_island_size: usize,
    /// Fixed village count per island; `None` derives it from coast length
    pub villages_per_island: Option<u32>,
    /// Villages per coastal tile when `villages_per_island` is `None`
    pub village_density: f64,
    /// Probability that an eligible land tile hosts a native settlement
    pub native_density: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 0.2,
            climate_frequency: 0.08,
            sea_level: 0.18,
            reef_level: -0.06,
            hill_level: 0.48,
            river_threshold: 0.02,
            max_retries: 10,
            min_islands: 10,
            max_island_size: 256,
            villages_per_island: None,
            village_density: 0.1,
            native_density: 0.05,
        }
    }
}

impl WorldGenConfig {
    /// Validates parameter ranges, failing fast with a descriptive error.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=10).contains(&self.octaves) {
            return Err(format!("octaves must be 1-10, got {}", self.octaves));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(format!(
                "persistence must be in (0.0, 1.0], got {}",
                self.persistence
            ));
        }
        if self.lacunarity < 1.0 {
            return Err(format!("lacunarity must be >= 1.0, got {}", self.lacunarity));
        }
        if !(self.frequency > 0.0) {
            return Err(format!("frequency must be > 0.0, got {}", self.frequency));
        }
        if !(self.climate_frequency > 0.0) {
            return Err(format!(
                "climate_frequency must be > 0.0, got {}",
                self.climate_frequency
            ));
        }
        if !(-1.0..=1.0).contains(&self.sea_level) {
            return Err(format!("sea_level must be -1.0-1.0, got {}", self.sea_level));
        }
        if self.reef_level > 0.0 {
            return Err(format!("reef_level must be <= 0.0, got {}", self.reef_level));
        }
        if self.hill_level <= self.sea_level {
            return Err(format!(
                "hill_level must be above sea_level ({}), got {}",
                self.sea_level, self.hill_level
            ));
        }
        if self.river_threshold < 0.0 {
            return Err(format!(
                "river_threshold must be >= 0.0, got {}",
                self.river_threshold
            ));
        }
        if self.min_islands == 0 {
            return Err("min_islands must be >= 1".to_string());
        }
        if self.max_island_size == 0 {
            return Err("max_island_size must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.village_density) {
            return Err(format!(
                "village_density must be 0.0-1.0, got {}",
                self.village_density
            ));
        }
        if !(0.0..=1.0).contains(&self.native_density) {
            return Err(format!(
                "native_density must be 0.0-1.0, got {}",
                self.native_density
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WorldGenConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_octaves() {
        let config = WorldGenConfig {
            octaves: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("octaves"), "error should name the field: {}", err);
    }

    #[test]
    fn rejects_negative_frequency() {
        let config = WorldGenConfig {
            frequency: -0.1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("frequency"), "error should name the field: {}", err);
    }

    #[test]
    fn rejects_positive_reef_level() {
        let config = WorldGenConfig {
            reef_level: 0.1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("reef_level"), "error should name the field: {}", err);
    }

    #[test]
    fn rejects_hill_level_below_sea_level() {
        let config = WorldGenConfig {
            hill_level: 0.1,
            sea_level: 0.2,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("hill_level"), "error should name the field: {}", err);
    }

    #[test]
    fn rejects_out_of_range_densities() {
        let config = WorldGenConfig {
            village_density: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = WorldGenConfig {
            native_density: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: WorldGenConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.octaves, WorldGenConfig::default().octaves);
        assert!(config.validate().is_ok());
    }
}
