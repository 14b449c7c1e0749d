use thiserror::Error;

use super::config::ConfigError;
use crate::core::utils::geometry::Direction;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Fragment {fragment_id}: atom {serial} has non-finite coordinates")]
    NonFiniteCoordinates { fragment_id: isize, serial: usize },

    #[error("Fragment {fragment_id}: target direction {direction:?} is not finite")]
    NonFiniteTarget {
        fragment_id: isize,
        direction: Direction,
    },
}
