use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::backend::surface::VdwSurface;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Energies at which the descriptor is sampled, either spelled out or as an
/// evenly spaced range with both end points included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnergyGrid {
    Linspace { start: f64, stop: f64, points: usize },
    Explicit(Vec<f64>),
}

impl EnergyGrid {
    pub fn energies(&self) -> Vec<f64> {
        match *self {
            Self::Linspace {
                start,
                stop,
                points,
            } => linspace(start, stop, points),
            Self::Explicit(ref energies) => energies.clone(),
        }
    }
}

impl Default for EnergyGrid {
    fn default() -> Self {
        Self::Linspace {
            start: -20.0,
            stop: 2.0,
            points: 10,
        }
    }
}

/// `points` evenly spaced values from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            (0..points).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Settings of one descriptor run, as read from a JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub energy_grid: EnergyGrid,
    pub smoothing_width: f64,
    pub surface: VdwSurface,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            energy_grid: EnergyGrid::default(),
            smoothing_width: 1.0,
            surface: VdwSurface::default(),
        }
    }
}

impl DescriptorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{linspace, DescriptorConfig, EnergyGrid};

    #[test]
    fn linspace_includes_end_points() {
        let grid = linspace(-20.0, 2.0, 10);

        assert_eq!(grid.len(), 10);
        assert_relative_eq!(grid[0], -20.0);
        assert_relative_eq!(grid[9], 2.0, epsilon = 1e-12);
        assert_relative_eq!(grid[1] - grid[0], 22.0 / 9.0, epsilon = 1e-12);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.5, 1.0, 1), vec![0.5]);
    }

    #[test]
    fn reads_linspace_config() {
        let config: DescriptorConfig = serde_json::from_str(
            r#"{"energy_grid":{"start":-1.0,"stop":1.0,"points":3},"smoothing_width":0.5,"surface":{"density":2.0}}"#,
        )
        .unwrap();

        assert_eq!(config.energy_grid.energies(), vec![-1.0, 0.0, 1.0]);
        assert_relative_eq!(config.smoothing_width, 0.5);
        assert_relative_eq!(config.surface.density, 2.0);
        assert_relative_eq!(config.surface.scale_factor, 1.4);
    }

    #[test]
    fn reads_explicit_grid_and_defaults() {
        let config: DescriptorConfig =
            serde_json::from_str(r#"{"energy_grid":[-0.5, 0.25]}"#).unwrap();

        assert_eq!(
            config.energy_grid,
            EnergyGrid::Explicit(vec![-0.5, 0.25])
        );
        assert_relative_eq!(config.smoothing_width, 1.0);

        let config: DescriptorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DescriptorConfig::default());
    }
}
