//! Typed errors raised by the game core.
//!
//! The presentation layer works with [`color_eyre`] reports, but everything below it (grid access,
//! generation, move parsing) fails with a [`MazeError`] so callers can match on the exact failure.

use thiserror::Error;

use crate::grid::Pos;

/// Errors surfaced by the maze core.
///
/// Every variant is deterministic given its inputs; nothing in the core is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A grid access fell outside the grid dimensions.
    ///
    /// This is a programming error on the caller side, as every caller bounds-checks before
    /// touching the grid, but the grid still refuses to clamp the position silently.
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        pos: Pos,
        /// Width of the grid that was accessed.
        width: usize,
        /// Height of the grid that was accessed.
        height: usize,
    },
    /// A maze was requested with dimensions too small to hold a single room, or too large to be
    /// allocated.
    #[error("invalid maze dimensions {width}x{height}, both sides must be between 3 and 1024")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A command token did not name a known direction or action.
    #[error("unrecognized move direction `{0}`")]
    InvalidDirection(String),
}

/// Result alias used throughout the game core.
pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = MazeError::OutOfBounds {
            pos: Pos::new(7, 2),
            width: 5,
            height: 5,
        };

        assert_eq!(
            err.to_string(),
            "position (7, 2) is outside the 5x5 grid",
            "message should name the position and the grid size"
        );
    }

    #[test]
    fn test_invalid_dimensions_message() {
        let err = MazeError::InvalidDimensions {
            width: 2,
            height: 10,
        };

        assert!(
            err.to_string().contains("2x10"),
            "message should include the rejected dimensions"
        );
    }

    #[test]
    fn test_invalid_direction_message() {
        let err = MazeError::InvalidDirection("north-east".to_owned());

        assert_eq!(
            err.to_string(),
            "unrecognized move direction `north-east`",
            "message should quote the rejected token"
        );
    }
}
