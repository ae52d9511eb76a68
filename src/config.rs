//! Command-line configuration and in-game settings.

use std::{ops::RangeInclusive, path::PathBuf};

use clap::{value_parser, Parser};

use crate::types::Difficulty;

/// Accepted maze widths, borders included.
pub const WIDTH_RANGE: RangeInclusive<u16> = 10..=50;

/// Accepted maze heights, borders included.
pub const HEIGHT_RANGE: RangeInclusive<u16> = 10..=30;

/// Widens a size range into the bounds expected by clap's integer parsers.
fn parser_range(range: &RangeInclusive<u16>) -> RangeInclusive<i64> {
    i64::from(*range.start())..=i64::from(*range.end())
}

/// Clamps a size into a range of accepted sizes.
fn clamp_size(value: usize, range: &RangeInclusive<u16>) -> usize {
    value.clamp(usize::from(*range.start()), usize::from(*range.end()))
}

/// Command-line options of the game.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Maze width in cells, borders included.
    #[arg(long, default_value_t = 25, value_parser = value_parser!(u16).range(parser_range(&WIDTH_RANGE)))]
    pub width: u16,
    /// Maze height in cells, borders included.
    #[arg(long, default_value_t = 15, value_parser = value_parser!(u16).range(parser_range(&HEIGHT_RANGE)))]
    pub height: u16,
    /// Difficulty profile deciding how many keys, traps and coins are placed.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,
    /// Seed for the maze generator, making every maze of the run reproducible.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File receiving the game log. Nothing is logged when omitted.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Maze parameters editable from the options menu.
///
/// This structure holds the size and difficulty the next maze will be generated with. Every
/// setter clamps its input to the accepted ranges, so the settings are always valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Maze width, within [`WIDTH_RANGE`].
    width: usize,
    /// Maze height, within [`HEIGHT_RANGE`].
    height: usize,
    /// Difficulty profile.
    difficulty: Difficulty,
}

impl Settings {
    /// Builds settings from raw values, clamping the size into the accepted ranges.
    #[must_use]
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Self {
        Self {
            width: clamp_size(width, &WIDTH_RANGE),
            height: clamp_size(height, &HEIGHT_RANGE),
            difficulty,
        }
    }

    /// Maze width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Maze height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Difficulty profile.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Sets the width, clamped into [`WIDTH_RANGE`].
    pub fn set_width(&mut self, width: usize) {
        *self = Self::new(width, self.height, self.difficulty);
    }

    /// Sets the height, clamped into [`HEIGHT_RANGE`].
    pub fn set_height(&mut self, height: usize) {
        *self = Self::new(self.width, height, self.difficulty);
    }

    /// Sets the difficulty profile.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self::new(
            config.width.into(),
            config.height.into(),
            config.difficulty,
        )
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["maze-explorer"]).expect("defaults should parse");

        assert_eq!(config.width, 25);
        assert_eq!(config.height, 15);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::try_parse_from([
            "maze-explorer",
            "--width",
            "50",
            "--height",
            "10",
            "--difficulty",
            "hard",
            "--seed",
            "42",
            "--log-file",
            "maze.log",
        ])
        .expect("values are in range");

        assert_eq!(config.width, 50);
        assert_eq!(config.height, 10);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_file, Some(PathBuf::from("maze.log")));
    }

    #[test]
    fn test_out_of_range_size_is_rejected() {
        assert!(Config::try_parse_from(["maze-explorer", "--width", "9"]).is_err());
        assert!(Config::try_parse_from(["maze-explorer", "--width", "51"]).is_err());
        assert!(Config::try_parse_from(["maze-explorer", "--height", "31"]).is_err());
        assert!(Config::try_parse_from(["maze-explorer", "--difficulty", "extreme"]).is_err());
    }

    #[test]
    fn test_parser_bounds_follow_size_ranges() {
        for (flag, range) in [("--width", WIDTH_RANGE), ("--height", HEIGHT_RANGE)] {
            for accepted in [*range.start(), *range.end()] {
                let value = accepted.to_string();
                assert!(
                    Config::try_parse_from(["maze-explorer", flag, value.as_str()]).is_ok(),
                    "{flag} {value} should be accepted"
                );
            }
            for rejected in [range.start() - 1, range.end() + 1] {
                let value = rejected.to_string();
                assert!(
                    Config::try_parse_from(["maze-explorer", flag, value.as_str()]).is_err(),
                    "{flag} {value} should be rejected"
                );
            }

            let settings = Settings::new(usize::MAX, usize::MAX, Difficulty::Easy);
            let clamped = if flag == "--width" {
                settings.width()
            } else {
                settings.height()
            };
            assert_eq!(
                clamped,
                usize::from(*range.end()),
                "{flag} settings should clamp to the same bound"
            );
        }
    }

    #[test]
    fn test_settings_clamp() {
        let mut settings = Settings::new(100, 1, Difficulty::Easy);

        assert_eq!(settings.width(), 50);
        assert_eq!(settings.height(), 10);

        settings.set_width(settings.width() + 1);
        settings.set_height(settings.height().saturating_sub(1));
        assert_eq!(settings.width(), 50, "width stays at its maximum");
        assert_eq!(settings.height(), 10, "height stays at its minimum");

        settings.set_width(33);
        settings.set_difficulty(Difficulty::Hard);
        assert_eq!(settings.width(), 33);
        assert_eq!(settings.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::try_parse_from(["maze-explorer", "--width", "31", "--height", "21"])
            .expect("values are in range");

        assert_eq!(
            Settings::from(&config),
            Settings::new(31, 21, Difficulty::Medium)
        );
    }
}
