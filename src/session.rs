//! Game session state machine.
//!
//! This module contains the [`Session`] type, which owns the maze being played together with the
//! player position, the item registries and the counters. Every change to a running game goes
//! through [`Session::apply_move`] or [`Session::restart`], one call at a time.

use std::{
    collections::BTreeSet,
    time::{Duration, Instant},
};

use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng as _};

use crate::{
    error::{MazeError, Result},
    generator::{check_dimensions, Maze, MazeGenerator},
    grid::{CellKind, Grid, Pos},
    pathfinding::shortest_path,
    types::{Command, Difficulty, Direction, GameStatus, MoveEffect, MoveOutcome},
};

/// A single game, from maze generation to its win or loss, and every restart after that.
///
/// The session is a plain value: there is no internal locking, and the input layer is expected to
/// hand it one request at a time. The random source is owned by the session so that a seeded one
/// replays the same sequence of mazes.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    /// Generator drawing a fresh maze on every restart.
    generator: MazeGenerator<R>,
    /// Configured maze width.
    width: usize,
    /// Configured maze height.
    height: usize,
    /// Configured difficulty profile.
    difficulty: Difficulty,
    /// State of the maze currently being played.
    round: Round,
}

/// State that is thrown away and rebuilt on every restart.
#[derive(Debug)]
struct Round {
    /// Cell contents, with the player marked while the game is running.
    grid: Grid,
    /// Current player position.
    player: Pos,
    /// Exit position, remembered so the exit survives the player standing on it.
    exit: Pos,
    /// Keys still lying in the maze.
    keys: BTreeSet<Pos>,
    /// Traps in the maze.
    traps: BTreeSet<Pos>,
    /// Coins still lying in the maze.
    coins: BTreeSet<Pos>,
    /// Keys needed to open the exit.
    required_keys: usize,
    /// Keys picked up so far.
    keys_collected: usize,
    /// Coins picked up so far.
    coins_collected: usize,
    /// Accepted moves so far.
    moves: usize,
    /// Lifecycle state.
    status: GameStatus,
    /// When the round started.
    start_time: Instant,
    /// When the round was won or lost.
    end_time: Option<Instant>,
}

impl Round {
    /// Prepares a maze for play by marking the player on its start cell.
    fn new(maze: Maze) -> Result<Self> {
        let Maze {
            mut grid,
            start,
            exit,
            keys,
            traps,
            coins,
            required_keys,
        } = maze;

        // A start doubling as the exit keeps its exit marking.
        if grid.get(start)? != CellKind::Exit {
            grid.set(start, CellKind::Player)?;
        }

        Ok(Self {
            grid,
            player: start,
            exit,
            keys,
            traps,
            coins,
            required_keys,
            keys_collected: 0,
            coins_collected: 0,
            moves: 0,
            status: GameStatus::InProgress,
            start_time: Instant::now(),
            end_time: None,
        })
    }

    /// Moves the round into a terminal state and stops its clock.
    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.end_time = Some(Instant::now());
    }
}

/// Result of dispatching a [`Command`] to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A move was attempted.
    Moved(MoveOutcome),
    /// A hint was computed, holding the next recommended cell if the exit is reachable.
    Hint(Option<Pos>),
    /// A fresh maze was generated and the counters were reset.
    Restarted,
}

/// Read-only projection of a session handed to the display layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Copy of the cell contents.
    pub grid: Grid,
    /// Player position.
    pub player: Pos,
    /// Exit position.
    pub exit: Pos,
    /// Difficulty the maze was generated with.
    pub difficulty: Difficulty,
    /// Keys needed to open the exit.
    pub required_keys: usize,
    /// Keys picked up so far.
    pub keys_collected: usize,
    /// Coins picked up so far.
    pub coins_collected: usize,
    /// Accepted moves so far.
    pub moves: usize,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Play time so far, frozen once the game has ended.
    pub elapsed: Duration,
}

impl Session<StdRng> {
    /// Creates a session over an entropy-seeded random source.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the size is rejected by [`check_dimensions`].
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Result<Self> {
        Self::with_rng(width, height, difficulty, StdRng::from_entropy())
    }

    /// Creates a session whose mazes are fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the size is rejected by [`check_dimensions`].
    pub fn seeded(width: usize, height: usize, difficulty: Difficulty, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session drawing its mazes from the given random source.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the size is rejected by [`check_dimensions`].
    pub fn with_rng(width: usize, height: usize, difficulty: Difficulty, rng: R) -> Result<Self> {
        let mut generator = MazeGenerator::new(rng);
        let maze = generator.generate(width, height, difficulty)?;
        info!("new {difficulty} session on a {width}x{height} maze");

        Ok(Self {
            generator,
            width,
            height,
            difficulty,
            round: Round::new(maze)?,
        })
    }

    /// Creates a session playing an already built maze.
    ///
    /// This function lets callers hand in a crafted layout. The maze's grid size becomes the
    /// configured size, so later restarts generate mazes of the same dimensions.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the grid size is rejected by [`check_dimensions`].
    /// - [`MazeError::OutOfBounds`] if the start or the exit lies outside the grid.
    pub fn from_maze(maze: Maze, difficulty: Difficulty, rng: R) -> Result<Self> {
        let (width, height) = (maze.grid.width(), maze.grid.height());
        check_dimensions(width, height)?;
        if !maze.grid.in_bounds(maze.exit) {
            return Err(MazeError::OutOfBounds {
                pos: maze.exit,
                width,
                height,
            });
        }

        Ok(Self {
            generator: MazeGenerator::new(rng),
            width,
            height,
            difficulty,
            round: Round::new(maze)?,
        })
    }

    /// Applies a single move of the player.
    ///
    /// This function is the only place where a running game changes. A move out of the grid or
    /// into a wall is rejected without touching anything, and every move is rejected once the
    /// game has ended. An accepted move vacates the previous cell, counts one turn and resolves
    /// the content of the destination cell:
    ///
    /// - a key or a coin is collected and removed from its registry;
    /// - a trap loses the game;
    /// - the exit wins the game if enough keys were collected, and is otherwise just stood on.
    ///
    /// The exit is restored when the player walks off it, so a locked exit can be retried later.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] if the session's own positions no longer fit its grid, which
    ///   only happens if a crafted maze was inconsistent.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let round = &mut self.round;
        let rejected = MoveOutcome {
            accepted: false,
            effect: MoveEffect::None,
            status: round.status,
        };

        if round.status.is_terminal() {
            return Ok(rejected);
        }

        let Some(target) = round
            .player
            .step(direction)
            .filter(|pos| round.grid.in_bounds(*pos))
        else {
            trace!("move {direction:?} from {} leaves the grid", round.player);
            return Ok(rejected);
        };

        let content = round.grid.get(target)?;
        if content == CellKind::Wall {
            trace!("move {direction:?} from {} hits a wall", round.player);
            return Ok(rejected);
        }

        let vacated = if round.player == round.exit {
            CellKind::Exit
        } else {
            CellKind::Open
        };
        round.grid.set(round.player, vacated)?;
        round.player = target;
        round.moves += 1;

        let effect = match content {
            CellKind::Key => {
                round.keys_collected += 1;
                let _ = round.keys.remove(&target);
                debug!(
                    "key collected at {target} ({}/{})",
                    round.keys_collected, round.required_keys
                );
                MoveEffect::KeyCollected
            }
            CellKind::Trap => {
                round.finish(GameStatus::Lost);
                info!("trap at {target} after {} moves, game lost", round.moves);
                MoveEffect::Trapped
            }
            CellKind::Coin => {
                round.coins_collected += 1;
                let _ = round.coins.remove(&target);
                debug!("coin collected at {target} ({} total)", round.coins_collected);
                MoveEffect::CoinCollected
            }
            CellKind::Exit if round.keys_collected >= round.required_keys => {
                round.finish(GameStatus::Won);
                info!(
                    "exit reached after {} moves with {} coins, game won",
                    round.moves, round.coins_collected
                );
                MoveEffect::Exited
            }
            CellKind::Exit => {
                debug!(
                    "exit reached with {}/{} keys, still locked",
                    round.keys_collected, round.required_keys
                );
                MoveEffect::ExitLocked
            }
            CellKind::Wall | CellKind::Open | CellKind::Player | CellKind::HintMarker => {
                MoveEffect::None
            }
        };

        if !round.status.is_terminal() {
            round.grid.set(target, CellKind::Player)?;
        }

        Ok(MoveOutcome {
            accepted: true,
            effect,
            status: round.status,
        })
    }

    /// Throws the current maze away and starts over on a freshly generated one.
    ///
    /// The configured size and difficulty are kept, while counters, registries and the clock are
    /// reset.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the configured size is too small, which cannot happen
    ///   for a session that was built successfully.
    pub fn restart(&mut self) -> Result<()> {
        let maze = self
            .generator
            .generate(self.width, self.height, self.difficulty)?;
        self.round = Round::new(maze)?;
        info!("session restarted on a new {}x{} maze", self.width, self.height);

        Ok(())
    }

    /// Changes the configured size and difficulty, then restarts.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the size is rejected by [`check_dimensions`], in which
    ///   case the session is left untouched.
    pub fn reconfigure(&mut self, width: usize, height: usize, difficulty: Difficulty) -> Result<()> {
        check_dimensions(width, height)?;

        self.width = width;
        self.height = height;
        self.difficulty = difficulty;
        self.restart()
    }

    /// Returns the next cell to step on to reach the exit along a shortest walk.
    ///
    /// [`None`] is returned when the player already stands on the exit or, on a corrupted grid,
    /// when the exit cannot be reached. The session itself is not modified; showing the hint is
    /// up to the caller.
    #[must_use]
    pub fn hint(&self) -> Option<Pos> {
        shortest_path(&self.round.grid, self.round.player, self.round.exit)?
            .first()
            .copied()
    }

    /// Dispatches a parsed command.
    ///
    /// # Errors
    ///
    /// - Any error of [`Session::apply_move`] or [`Session::restart`].
    pub fn handle_command(&mut self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Move(direction) => self.apply_move(direction).map(CommandOutcome::Moved),
            Command::Hint => Ok(CommandOutcome::Hint(self.hint())),
            Command::Restart => self.restart().map(|()| CommandOutcome::Restarted),
        }
    }

    /// Builds a read-only copy of everything the display layer needs.
    #[must_use]
    pub fn render_snapshot(&self) -> Snapshot {
        let round = &self.round;
        let elapsed = round
            .end_time
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(round.start_time);

        Snapshot {
            grid: round.grid.clone(),
            player: round.player,
            exit: round.exit,
            difficulty: self.difficulty,
            required_keys: round.required_keys,
            keys_collected: round.keys_collected,
            coins_collected: round.coins_collected,
            moves: round.moves,
            status: round.status,
            elapsed,
        }
    }
}

impl<R> Session<R> {
    /// Configured maze width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Configured maze height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Configured difficulty profile.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.round.status
    }

    /// Current player position.
    #[must_use]
    pub const fn player(&self) -> Pos {
        self.round.player
    }

    /// Exit position.
    #[must_use]
    pub const fn exit(&self) -> Pos {
        self.round.exit
    }

    /// Cell contents of the maze being played.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.round.grid
    }

    /// Keys still lying in the maze.
    #[must_use]
    pub const fn keys(&self) -> &BTreeSet<Pos> {
        &self.round.keys
    }

    /// Traps in the maze.
    #[must_use]
    pub const fn traps(&self) -> &BTreeSet<Pos> {
        &self.round.traps
    }

    /// Coins still lying in the maze.
    #[must_use]
    pub const fn coins(&self) -> &BTreeSet<Pos> {
        &self.round.coins
    }

    /// Keys needed to open the exit.
    #[must_use]
    pub const fn required_keys(&self) -> usize {
        self.round.required_keys
    }

    /// Keys picked up so far.
    #[must_use]
    pub const fn keys_collected(&self) -> usize {
        self.round.keys_collected
    }

    /// Coins picked up so far.
    #[must_use]
    pub const fn coins_collected(&self) -> usize {
        self.round.coins_collected
    }

    /// Accepted moves so far.
    #[must_use]
    pub const fn moves(&self) -> usize {
        self.round.moves
    }
}
