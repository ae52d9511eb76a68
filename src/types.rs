//! Type definitions and enums for the game state, player input and navigation.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use clap::ValueEnum;

use crate::error::MazeError;

/// Difficulty profile used when placing items in a new maze.
///
/// The profile only matters at generation time, where it decides how many keys must be collected
/// and how many traps and coins are scattered through the maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Difficulty {
    /// Few keys and traps.
    Easy,
    /// The default profile.
    #[default]
    Medium,
    /// Many keys and traps.
    Hard,
}

/// Number of each item to place in a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemCounts {
    /// Keys that must be collected before the exit opens.
    pub required_keys: usize,
    /// Traps to scatter through the maze.
    pub traps: usize,
    /// Coins to scatter through the maze.
    pub coins: usize,
}

impl Difficulty {
    /// Returns the item counts this profile assigns to a maze of the given size.
    ///
    /// All counts scale with `width + height` using integer division and never drop below a fixed
    /// per-profile minimum.
    #[must_use]
    pub const fn item_counts(self, width: usize, height: usize) -> ItemCounts {
        let total = width.saturating_add(height);
        let (required_keys, traps, coins) = match self {
            Self::Easy => (max(1, total / 25), max(2, total / 15), max(5, total / 8)),
            Self::Medium => (max(2, total / 20), max(3, total / 12), max(7, total / 7)),
            Self::Hard => (max(3, total / 15), max(5, total / 10), max(10, total / 6)),
        };

        ItemCounts {
            required_keys,
            traps,
            coins,
        }
    }

    /// Returns the next profile, wrapping from hard back to easy.
    #[must_use]
    pub const fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    /// Returns the previous profile, wrapping from easy back to hard.
    #[must_use]
    pub const fn easier(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }
}

/// `Ord::max` is not usable in const contexts.
const fn max(lhs: usize, rhs: usize) -> usize {
    if lhs > rhs {
        lhs
    } else {
        rhs
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

/// One of the four cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
}

impl Direction {
    /// All directions in the fixed up, right, down, left order used as a search tie-break.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the unit `(row, col)` vector of the direction.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            _ => Err(MazeError::InvalidDirection(token.to_owned())),
        }
    }
}

/// A single request from the input layer to the game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the player one cell.
    Move(Direction),
    /// Ask for the next step towards the exit.
    Hint,
    /// Throw the current maze away and start a fresh one.
    Restart,
}

impl FromStr for Command {
    type Err = MazeError;

    /// Parses `up`, `down`, `left`, `right`, `hint` or `restart`, ignoring case.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "hint" => Ok(Self::Hint),
            "restart" => Ok(Self::Restart),
            _ => token.parse().map(Self::Move),
        }
    }
}

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The player reached the exit holding enough keys.
    Won,
    /// The player stepped on a trap.
    Lost,
}

impl GameStatus {
    /// Returns whether the game has ended, after which no move is accepted until a restart.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Side effect resolved by an accepted move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveEffect {
    /// Nothing happened beyond the move itself.
    #[default]
    None,
    /// A key was picked up.
    KeyCollected,
    /// The player stepped on a trap and lost.
    Trapped,
    /// A coin was picked up.
    CoinCollected,
    /// The player reached the exit with enough keys and won.
    Exited,
    /// The player reached the exit without enough keys, so the game goes on.
    ExitLocked,
}

/// Result of applying one move to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the move was carried out. Rejected moves do not count as a turn.
    pub accepted: bool,
    /// Effect of the cell the player stepped on.
    pub effect: MoveEffect,
    /// Status of the session after the move.
    pub status: GameStatus,
}

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// Static page explaining the rules and the controls.
    Instructions,
    /// In-game screen where the maze is displayed and played.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Instructions" menu option.
    Instructions,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Items in display order.
    pub(crate) const ALL: [Self; 4] = [
        Self::StartGame,
        Self::Options,
        Self::Instructions,
        Self::Quit,
    ];

    /// Returns the label shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::StartGame => "Start Game",
            Self::Options => "Options",
            Self::Instructions => "Instructions",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one, staying put on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::StartGame => Self::Options,
            Self::Options => Self::Instructions,
            Self::Instructions | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying put on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::StartGame | Self::Options => Self::StartGame,
            Self::Instructions => Self::Options,
            Self::Quit => Self::Instructions,
        }
    }
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// Difficulty profile selector.
    Difficulty,
    /// Maze width selector.
    Width,
    /// Maze height selector.
    Height,
    /// "Return" navigation option.
    Back,
}

impl OptionsMenuItem {
    /// Items in display order.
    pub(crate) const ALL: [Self; 4] = [Self::Difficulty, Self::Width, Self::Height, Self::Back];

    /// Returns the item below this one, staying put on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Difficulty => Self::Width,
            Self::Width => Self::Height,
            Self::Height | Self::Back => Self::Back,
        }
    }

    /// Returns the item above this one, staying put on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Difficulty | Self::Width => Self::Difficulty,
            Self::Height => Self::Width,
            Self::Back => Self::Height,
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Options menu configuration.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Maze Explorer",
            Self::OptionsMenu(_) => "Options",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_minimums_on_small_mazes() {
        assert_eq!(
            Difficulty::Easy.item_counts(10, 10),
            ItemCounts {
                required_keys: 1,
                traps: 2,
                coins: 5,
            }
        );
        assert_eq!(
            Difficulty::Medium.item_counts(10, 10),
            ItemCounts {
                required_keys: 2,
                traps: 3,
                coins: 7,
            }
        );
        assert_eq!(
            Difficulty::Hard.item_counts(10, 10),
            ItemCounts {
                required_keys: 3,
                traps: 5,
                coins: 10,
            }
        );
    }

    #[test]
    fn test_difficulty_scales_with_size() {
        // total = 80
        assert_eq!(
            Difficulty::Easy.item_counts(50, 30),
            ItemCounts {
                required_keys: 3,
                traps: 5,
                coins: 10,
            }
        );
        assert_eq!(
            Difficulty::Medium.item_counts(50, 30),
            ItemCounts {
                required_keys: 4,
                traps: 6,
                coins: 11,
            }
        );
        assert_eq!(
            Difficulty::Hard.item_counts(50, 30),
            ItemCounts {
                required_keys: 5,
                traps: 8,
                coins: 13,
            }
        );
    }

    #[test]
    fn test_difficulty_counts_saturate_on_huge_sizes() {
        let counts = Difficulty::Easy.item_counts(usize::MAX, usize::MAX);

        assert_eq!(counts.required_keys, usize::MAX / 25);
        assert_eq!(counts.coins, usize::MAX / 8);
    }

    #[test]
    fn test_difficulty_cycling() {
        assert_eq!(Difficulty::Easy.harder(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.harder(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.easier(), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.easier(), Difficulty::Easy);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" Right ".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(MazeError::InvalidDirection("sideways".to_owned()))
        );
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!("hint".parse::<Command>(), Ok(Command::Hint));
        assert_eq!("Restart".parse::<Command>(), Ok(Command::Restart));
        assert_eq!("left".parse::<Command>(), Ok(Command::Move(Direction::Left)));
        assert!(
            matches!(
                "jump".parse::<Command>(),
                Err(MazeError::InvalidDirection(_))
            ),
            "unknown tokens should be reported as invalid directions"
        );
    }

    #[test]
    fn test_direction_deltas_are_unit_vectors() {
        for direction in Direction::ALL {
            let (d_row, d_col) = direction.delta();
            assert_eq!(
                d_row.abs() + d_col.abs(),
                1,
                "{direction:?} should move exactly one cell"
            );
        }
    }

    #[test]
    fn test_status_terminality() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }

    #[test]
    fn test_main_menu_navigation_saturates() {
        assert_eq!(MainMenuItem::StartGame.previous(), MainMenuItem::StartGame);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Options.next(), MainMenuItem::Instructions);
        assert_eq!(MainMenuItem::Instructions.previous(), MainMenuItem::Options);
    }

    #[test]
    fn test_options_menu_navigation_saturates() {
        assert_eq!(
            OptionsMenuItem::Difficulty.previous(),
            OptionsMenuItem::Difficulty
        );
        assert_eq!(OptionsMenuItem::Back.next(), OptionsMenuItem::Back);
        assert_eq!(OptionsMenuItem::Width.next(), OptionsMenuItem::Height);
    }

    #[test]
    fn test_menu_type_repr_and_value() {
        let main_menu = MenuType::MainMenu(4);
        let options_menu = MenuType::OptionsMenu(4);

        assert_eq!(main_menu.repr(), "Maze Explorer");
        assert_eq!(options_menu.repr(), "Options");
        assert_eq!(main_menu.value(), 4);
        assert_eq!(options_menu.value(), 4);
    }
}
