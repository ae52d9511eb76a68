//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{Command, Direction, MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI, so that the hint
/// overlay expires even when no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    app.tick();

    Ok(())
}

/// Dispatches a key press to the handler of the current screen.
///
/// The `q` key quits from every screen; every other key is interpreted by the screen handlers.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    match app.screen {
        Screen::MainMenu(item) => handle_main_menu_key(app, item, code)?,
        Screen::OptionsMenu(item) => handle_options_menu_key(app, item, code)?,
        Screen::Instructions => {
            if matches!(
                code,
                KeyCode::Char('h' | 'l') | KeyCode::Esc | KeyCode::Enter
            ) {
                app.screen = Screen::MainMenu(MainMenuItem::Instructions);
            }
        }
        Screen::InGame => handle_in_game_key(app, code)?,
    }

    Ok(())
}

/// Handles key presses on the main menu.
///
/// The 'j' and 'k' keys move the cursor down and up, while 'l' selects the item under it.
fn handle_main_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::StartGame => app.start_game()?,
            MainMenuItem::Options => {
                app.screen = Screen::OptionsMenu(OptionsMenuItem::Difficulty);
            }
            MainMenuItem::Instructions => app.screen = Screen::Instructions,
            MainMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }

    Ok(())
}

/// Handles key presses on the options menu.
///
/// The 'j' and 'k' keys move the cursor, 'l' raises the value under it and 'h' lowers it. Leaving
/// through the "Return" item applies the edited settings, regenerating the maze if they changed.
fn handle_options_menu_key(app: &mut App, item: OptionsMenuItem, code: KeyCode) -> Result<()> {
    let raise = matches!(code, KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter);
    let lower = matches!(code, KeyCode::Char('h') | KeyCode::Left);

    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::OptionsMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::OptionsMenu(item.previous()),
        _ if raise || lower => {
            let settings = &mut app.settings;
            match item {
                OptionsMenuItem::Difficulty if raise => {
                    settings.set_difficulty(settings.difficulty().harder());
                }
                OptionsMenuItem::Difficulty => {
                    settings.set_difficulty(settings.difficulty().easier());
                }
                OptionsMenuItem::Width if raise => settings.set_width(settings.width() + 1),
                OptionsMenuItem::Width => settings.set_width(settings.width().saturating_sub(1)),
                OptionsMenuItem::Height if raise => settings.set_height(settings.height() + 1),
                OptionsMenuItem::Height => {
                    settings.set_height(settings.height().saturating_sub(1));
                }
                OptionsMenuItem::Back => {
                    app.apply_settings()?;
                    app.screen = Screen::MainMenu(MainMenuItem::Options);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles key presses while playing.
///
/// The arrow keys move the player, 'h' asks for a hint, 'r' restarts on a fresh maze and 'Esc'
/// returns to the main menu.
fn handle_in_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    let command = match code {
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Char('h') => Command::Hint,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Esc => {
            app.clear_overlays();
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
            return Ok(());
        }
        _ => return Ok(()),
    };

    app.command(command)
}
