use crate::core::orientation::{DEFAULT_TAIL_COUNT, OrientationParams};
use crate::core::utils::geometry::{Direction, canonical_up};
use crate::core::utils::identifiers::RootPreset;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error("Unknown root preset '{0}'")]
    UnknownRootPreset(String),
}

/// Resolves a root preset by name, as accepted by [`RootPreset::from_str`].
pub fn parse_root_preset(name: &str) -> Result<RootPreset, ConfigError> {
    RootPreset::from_str(name).map_err(|_| ConfigError::UnknownRootPreset(name.to_string()))
}

/// How atoms are partitioned into rigid bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// One rigid body per fragment identifier.
    #[default]
    ByFragment,
    /// The whole structure moves as a single rigid body.
    WholeStructure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorientConfig {
    pub orientation: OrientationParams,
    /// Target used for fragments without an entry in the target table.
    pub default_direction: Direction,
    pub grouping: GroupingMode,
    /// Reject non-finite coordinates and targets instead of propagating them.
    pub validate_coordinates: bool,
    /// Process fragments on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ReorientConfig {
    fn default() -> Self {
        Self {
            orientation: OrientationParams::default(),
            default_direction: canonical_up(),
            grouping: GroupingMode::default(),
            validate_coordinates: false,
            parallel: true,
        }
    }
}

#[derive(Default)]
pub struct ReorientConfigBuilder {
    root_preset: Option<RootPreset>,
    root_markers: Option<Vec<String>>,
    tail_count: Option<usize>,
    default_direction: Option<Direction>,
    undetermined_direction: Option<Direction>,
    grouping: Option<GroupingMode>,
    validate_coordinates: Option<bool>,
    parallel: Option<bool>,
}

impl ReorientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_preset(mut self, preset: RootPreset) -> Self {
        self.root_preset = Some(preset);
        self
    }
    /// Explicit markers take precedence over any preset.
    pub fn root_markers(mut self, markers: Vec<String>) -> Self {
        self.root_markers = Some(markers);
        self
    }
    pub fn tail_count(mut self, count: usize) -> Self {
        self.tail_count = Some(count);
        self
    }
    pub fn default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = Some(direction);
        self
    }
    pub fn undetermined_direction(mut self, direction: Direction) -> Self {
        self.undetermined_direction = Some(direction);
        self
    }
    pub fn grouping(mut self, grouping: GroupingMode) -> Self {
        self.grouping = Some(grouping);
        self
    }
    pub fn validate_coordinates(mut self, validate: bool) -> Self {
        self.validate_coordinates = Some(validate);
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> Result<ReorientConfig, ConfigError> {
        let tail_count = self.tail_count.unwrap_or(DEFAULT_TAIL_COUNT);
        if tail_count == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "tail_count",
                reason: "at least one tail atom is required".to_string(),
            });
        }

        let default_direction = self.default_direction.unwrap_or_else(canonical_up);
        check_direction("default_direction", &default_direction)?;
        let undetermined_direction = self.undetermined_direction.unwrap_or_else(canonical_up);
        check_direction("undetermined_direction", &undetermined_direction)?;

        let root_markers = match self.root_markers {
            Some(markers) => {
                if markers.iter().any(|m| m.trim().is_empty()) {
                    return Err(ConfigError::InvalidParameter {
                        parameter: "root_markers",
                        reason: "markers must not be empty strings".to_string(),
                    });
                }
                markers
            }
            None => self.root_preset.unwrap_or_default().marker_list(),
        };

        Ok(ReorientConfig {
            orientation: OrientationParams {
                root_markers,
                tail_count,
                undetermined_direction,
            },
            default_direction,
            grouping: self.grouping.unwrap_or_default(),
            validate_coordinates: self.validate_coordinates.unwrap_or(false),
            parallel: self.parallel.unwrap_or(true),
        })
    }
}

fn check_direction(parameter: &'static str, direction: &Direction) -> Result<(), ConfigError> {
    if !direction.iter().all(|c| c.is_finite()) {
        return Err(ConfigError::InvalidParameter {
            parameter,
            reason: format!("{:?} is not finite", direction),
        });
    }
    if direction.norm() == 0.0 {
        return Err(ConfigError::InvalidParameter {
            parameter,
            reason: "direction must have non-zero length".to_string(),
        });
    }
    Ok(())
}
