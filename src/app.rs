//! Core application state and logic for the maze game.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    config::{Config, Settings},
    events,
    grid::Pos,
    session::{CommandOutcome, Session},
    types::{Command, MainMenuItem, MoveEffect, Screen},
    ui,
};

/// How long a hinted cell stays highlighted, in milliseconds.
///
/// This constant controls how long the next recommended step is drawn over the maze after the
/// player asks for a hint. The session itself never stores the marker; it only lives in the
/// application state until it expires.
pub(crate) const HINT_DURATION_MS: u64 = 1000;

/// Hinted cell currently highlighted on the in-game screen.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Hint {
    /// Cell recommended as the next step.
    pub(crate) pos: Pos,
    /// When the hint was requested.
    pub(crate) shown_at: Instant,
}

/// Short message shown under the maze after an action that did not end the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    /// The player stands on the exit without enough keys.
    ExitLocked,
    /// A hint was requested but the exit cannot be reached from the player position.
    NoPath,
}

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Maze parameters as edited in the options menu.
    ///
    /// These only reach the session when the user leaves the options menu, which regenerates the
    /// maze with the new parameters.
    pub(crate) settings: Settings,
    /// Game session being played.
    pub(crate) session: Session,
    /// Hint currently highlighted, if any.
    pub(crate) hint: Option<Hint>,
    /// Message about the last action, if any.
    pub(crate) notice: Option<Notice>,
}

impl App {
    /// Creates a new instance of the App structure from the command-line configuration.
    ///
    /// The session is seeded from [`Config::seed`] when one is given, so every maze of the run can
    /// be replayed; otherwise it is seeded from system entropy.
    ///
    /// # Errors
    ///
    /// - [`crate::MazeError::InvalidDimensions`] if the configured size is too small.
    pub fn new(config: &Config) -> Result<Self> {
        let settings = Settings::from(config);
        let (width, height, difficulty) =
            (settings.width(), settings.height(), settings.difficulty());
        let session = match config.seed {
            Some(seed) => Session::seeded(width, height, difficulty, seed)?,
            None => Session::new(width, height, difficulty)?,
        };

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            settings,
            session,
            hint: None,
            notice: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Starts a game on a fresh maze and switches to the in-game screen.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        self.session.restart()?;
        self.clear_overlays();
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Pushes the edited settings to the session if they differ from the ones in use.
    pub(crate) fn apply_settings(&mut self) -> Result<()> {
        let settings = self.settings;
        let unchanged = settings.width() == self.session.width()
            && settings.height() == self.session.height()
            && settings.difficulty() == self.session.difficulty();

        if !unchanged {
            self.session
                .reconfigure(settings.width(), settings.height(), settings.difficulty())?;
            info!(
                "settings changed to {}x{} on {}",
                settings.width(),
                settings.height(),
                settings.difficulty()
            );
        }

        Ok(())
    }

    /// Forwards a command to the session and records what should be shown about its outcome.
    pub(crate) fn command(&mut self, command: Command) -> Result<()> {
        self.clear_overlays();

        match self.session.handle_command(command)? {
            CommandOutcome::Moved(outcome) if outcome.effect == MoveEffect::ExitLocked => {
                self.notice = Some(Notice::ExitLocked);
            }
            CommandOutcome::Hint(Some(pos)) => {
                self.hint = Some(Hint {
                    pos,
                    shown_at: Instant::now(),
                });
            }
            CommandOutcome::Hint(None) if self.session.player() == self.session.exit() => {
                self.notice = Some(Notice::ExitLocked);
            }
            CommandOutcome::Hint(None) => self.notice = Some(Notice::NoPath),
            CommandOutcome::Moved(_) | CommandOutcome::Restarted => {}
        }

        Ok(())
    }

    /// Drops the hint once it has been shown long enough.
    pub(crate) fn tick(&mut self) {
        if self
            .hint
            .is_some_and(|hint| hint.shown_at.elapsed() >= Duration::from_millis(HINT_DURATION_MS))
        {
            self.hint = None;
        }
    }

    /// Removes the hint and the notice left over from a previous action.
    pub(crate) fn clear_overlays(&mut self) {
        self.hint = None;
        self.notice = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        grid::CellKind,
        session::tests::{corridor, crafted},
        types::{Difficulty, Direction, GameStatus},
    };

    /// Builds an application over a small seeded maze.
    pub(crate) fn create_test_app() -> App {
        let config = Config {
            width: 15,
            height: 11,
            difficulty: Difficulty::Easy,
            seed: Some(3),
            log_file: None,
        };

        App::new(&config).expect("configuration is valid")
    }

    #[test]
    fn test_new_app_state() {
        let app = create_test_app();

        assert!(!app.exit);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(app.session.width(), 15);
        assert_eq!(app.session.height(), 11);
        assert!(app.hint.is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_start_game_switches_screen_and_resets() {
        let mut app = create_test_app();
        app.notice = Some(Notice::NoPath);

        app.start_game().expect("restart succeeds");

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.session.moves(), 0);
        assert_eq!(app.session.status(), GameStatus::InProgress);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_hint_command_sets_and_expires_hint() {
        let mut app = create_test_app();

        app.command(Command::Hint).expect("hint never fails");
        let hint = app.hint.expect("a fresh maze has a path to its exit");
        assert_eq!(Some(hint.pos), app.session.hint());

        app.tick();
        assert!(app.hint.is_some(), "the hint is still fresh");

        app.hint = Some(Hint {
            pos: hint.pos,
            shown_at: Instant::now()
                .checked_sub(Duration::from_millis(HINT_DURATION_MS + 1))
                .expect("clock is past the hint duration"),
        });
        app.tick();
        assert!(app.hint.is_none(), "the hint should expire");
    }

    #[test]
    fn test_move_command_clears_hint() {
        let mut app = create_test_app();
        app.command(Command::Hint).expect("hint never fails");

        app.command(Command::Move(Direction::Up))
            .expect("move is valid");

        assert!(app.hint.is_none(), "any new command hides the previous hint");
    }

    #[test]
    fn test_hint_on_locked_exit_reports_the_lock() {
        let mut app = create_test_app();
        app.session = crafted(corridor(
            [CellKind::Exit, CellKind::Key, CellKind::Open, CellKind::Open],
            1,
        ));
        app.command(Command::Move(Direction::Right))
            .expect("move is valid");

        app.command(Command::Hint).expect("hint never fails");

        assert!(app.hint.is_none(), "there is no step left to show");
        assert_eq!(app.notice, Some(Notice::ExitLocked));
    }

    #[test]
    fn test_apply_settings_reconfigures_only_on_change() {
        let mut app = create_test_app();
        let before = app.session.grid().clone();

        app.apply_settings().expect("settings are valid");
        assert_eq!(app.session.grid(), &before, "unchanged settings keep the maze");

        app.settings.set_width(21);
        app.settings.set_difficulty(Difficulty::Hard);
        app.apply_settings().expect("settings are valid");
        assert_eq!(app.session.width(), 21);
        assert_eq!(app.session.difficulty(), Difficulty::Hard);
    }
}
