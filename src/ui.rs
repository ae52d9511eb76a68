//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    app::Notice,
    config::Settings,
    grid::CellKind,
    types::{GameStatus, MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Text of the instructions screen, one entry per line.
const INSTRUCTIONS: [&str; 16] = [
    "Find the exit (E) and walk onto it to escape the maze.",
    "The exit stays locked until you hold every required key (K).",
    "Coins (C) are optional and only add to your score.",
    "Traps (T) end the game as soon as you step on them.",
    "",
    "Controls",
    "  arrows   move one cell",
    "  h        highlight the next step towards the exit",
    "  r        restart on a new maze",
    "  esc      return to the main menu",
    "  q        quit",
    "",
    "Symbols",
    "  P you    E exit    K key",
    "  C coin   T trap    # wall",
    "",
];

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item, &app.settings),
        Screen::Instructions => instructions(frame),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller through the returned rows, one per item.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];

    let layout = Layout::vertical([Constraint::Length(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let hints = match menu {
        MenuType::MainMenu(_) => "(j) down / (k) up / (l) select",
        MenuType::OptionsMenu(_) => "(j/k) move / (h/l) change",
    };
    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom(hints)
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Style of a menu entry, depending on whether the cursor is on it.
const fn entry_style(active: bool) -> Style {
    if active {
        Style::new().fg(Color::White).bg(Color::Green)
    } else {
        Style::new().fg(Color::Green)
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays one row per [`MainMenuItem`] and highlights the one under the cursor.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let rows = init_menu(frame, MenuType::MainMenu(4));

    for (entry, area) in MainMenuItem::ALL.into_iter().zip(rows.iter()) {
        let line = Line::styled(entry.label(), entry_style(entry == item)).centered();
        frame.render_widget(line, *area);
    }
}

/// Renders the options menu screen with the editable maze parameters.
///
/// Each parameter row shows the value the next maze will be generated with, while the "Return"
/// row leads back to the main menu.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, settings: &Settings) {
    clear(frame);

    let rows = init_menu(frame, MenuType::OptionsMenu(4));

    for (entry, area) in OptionsMenuItem::ALL.into_iter().zip(rows.iter()) {
        let label = match entry {
            OptionsMenuItem::Difficulty => format!("Difficulty: {}", settings.difficulty()),
            OptionsMenuItem::Width => format!("Width: {}", settings.width()),
            OptionsMenuItem::Height => format!("Height: {}", settings.height()),
            OptionsMenuItem::Back => "Return".to_owned(),
        };
        let line = Line::styled(label, entry_style(entry == item)).centered();
        frame.render_widget(line, *area);
    }
}

/// Renders the static page describing the goal, the controls and the symbols of the game.
pub(crate) fn instructions(frame: &mut Frame) {
    clear(frame);

    let [space] = Layout::horizontal([Constraint::Length(66)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [space] = Layout::vertical([Constraint::Length(18)])
        .flex(Flex::Center)
        .areas(space);

    let block = Block::bordered()
        .title("Instructions")
        .title_bottom("(h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let text: Vec<Line> = INSTRUCTIONS.into_iter().map(Line::raw).collect();
    frame.render_widget(Paragraph::new(text).block(block), space);
}

/// Two-character text drawn for a cell, so the board keeps a roughly square aspect.
const fn cell_symbol(cell: CellKind) -> &'static str {
    match cell {
        CellKind::Wall => "##",
        CellKind::Open => "  ",
        CellKind::Player => "P ",
        CellKind::Exit => "E ",
        CellKind::Key => "K ",
        CellKind::Trap => "T ",
        CellKind::Coin => "C ",
        CellKind::HintMarker => "H ",
    }
}

/// Colors of a cell on the board.
const fn cell_style(cell: CellKind) -> Style {
    match cell {
        CellKind::Wall => Style::new().fg(Color::White).bg(Color::White),
        CellKind::Open => Style::new(),
        CellKind::Player => Style::new()
            .fg(Color::Yellow)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        CellKind::Exit => Style::new().fg(Color::Black).bg(Color::Green),
        CellKind::Key => Style::new().fg(Color::Yellow),
        CellKind::Trap => Style::new().fg(Color::Red),
        CellKind::Coin => Style::new().fg(Color::Cyan),
        CellKind::HintMarker => Style::new().fg(Color::Black).bg(Color::Magenta),
    }
}

/// Renders the in-game screen with the board, the game status and the controls.
///
/// The board is drawn from a snapshot of the session. A pending hint is overlaid on that copy
/// only, so the session grid never holds a hint marker.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or if the hinted cell
/// falls outside of the board.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let snapshot = app.session.render_snapshot();
    let mut grid = snapshot.grid;
    if let Some(hint) = app.hint {
        grid.set(hint.pos, CellKind::HintMarker)?;
    }

    let [content_area, status_area, tooltip_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let board_width = u16::try_from(grid.width() * 2 + 2)?;
    let board_height = u16::try_from(grid.height() + 2)?;
    let [board_area] = Layout::vertical([Constraint::Length(board_height)])
        .flex(Flex::Center)
        .areas(content_area);
    let [board_area] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(board_area);

    let rows: Vec<Line> = (0..grid.height())
        .map(|row| {
            Line::from(
                grid.row(row)
                    .map(|cell| Span::styled(cell_symbol(cell), cell_style(cell)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let board = Block::bordered()
        .title(snapshot.difficulty.to_string())
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);

    frame.render_widget(Paragraph::new(rows).block(board), board_area);

    let status = match (snapshot.status, app.notice) {
        (GameStatus::Won, _) => Line::styled(
            format!(
                "You escaped in {:.2}s with {} moves and {} coins! Press (r) for a new maze.",
                snapshot.elapsed.as_secs_f64(),
                snapshot.moves,
                snapshot.coins_collected
            ),
            Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        (GameStatus::Lost, _) => Line::styled(
            "You stepped on a trap. Press (r) for a new maze.",
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        (GameStatus::InProgress, Some(Notice::ExitLocked)) => Line::styled(
            format!(
                "The exit is locked, collect {} more key(s).",
                snapshot
                    .required_keys
                    .saturating_sub(snapshot.keys_collected)
            ),
            Style::new().fg(Color::Yellow),
        ),
        (GameStatus::InProgress, Some(Notice::NoPath)) => {
            Line::styled("No path to the exit.", Style::new().fg(Color::Yellow))
        }
        (GameStatus::InProgress, None) => Line::styled(
            format!(
                "Keys {}/{} | Coins {} | Moves {} | Time {}s",
                snapshot.keys_collected,
                snapshot.required_keys,
                snapshot.coins_collected,
                snapshot.moves,
                snapshot.elapsed.as_secs()
            ),
            Style::new().fg(Color::Green),
        ),
    };

    frame.render_widget(status.centered(), status_area);

    let tooltip_block = Block::bordered()
        .title("(arrows) move / (h) hint / (r) restart / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::tests::create_test_app,
        session::tests::{corridor, crafted},
        types::{Command, Direction},
    };
    use ratatui::{backend::TestBackend, buffer::Cell, Terminal};

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Draws the application once and returns the rendered buffer, one string per row.
    fn render(app: &App) -> Vec<String> {
        let mut terminal = create_test_terminal();
        let _ = terminal
            .draw(|frame| draw(app, frame).expect("drawing should succeed in test"))
            .expect("terminal drawing should succeed");

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }

    /// Checks whether any rendered row contains the given text.
    fn shows(rows: &[String], text: &str) -> bool {
        rows.iter().any(|row| row.contains(text))
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app();

        let rows = render(&app);

        for label in ["Maze Explorer", "Start Game", "Options", "Instructions", "Quit"] {
            assert!(shows(&rows, label), "main menu should show {label}");
        }
    }

    #[test]
    fn test_draw_options_menu() {
        let mut app = create_test_app();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Width);

        let rows = render(&app);

        for label in ["Difficulty: Easy", "Width: 15", "Height: 11", "Return"] {
            assert!(shows(&rows, label), "options menu should show {label}");
        }
    }

    #[test]
    fn test_draw_instructions() {
        let mut app = create_test_app();
        app.screen = Screen::Instructions;

        let rows = render(&app);

        assert!(shows(&rows, "Instructions"), "instructions should have a title");
        assert!(shows(&rows, "Traps (T)"), "instructions should describe traps");
        assert!(shows(&rows, "(h) return"), "instructions should tell how to leave");
    }

    #[test]
    fn test_draw_in_game_board() {
        let mut app = create_test_app();
        app.start_game().expect("restart succeeds");

        let rows = render(&app);
        let grid = app.session.grid();

        for row in 0..grid.height() {
            let expected: String = grid.row(row).map(cell_symbol).collect();
            assert!(shows(&rows, &expected), "board row {row} should be drawn");
        }
        assert!(shows(&rows, "Keys 0/"), "the status line should count keys");
        assert!(shows(&rows, "Moves 0"), "the status line should count moves");
        assert!(shows(&rows, "(h) hint"), "the tooltip should list the controls");
    }

    #[test]
    fn test_draw_in_game_hint_overlay() {
        let mut app = create_test_app();
        app.start_game().expect("restart succeeds");
        app.command(Command::Hint).expect("hint never fails");
        let hint = app.hint.expect("a fresh maze has a path to its exit");

        let rows = render(&app);

        let mut marked = app.session.grid().clone();
        marked
            .set(hint.pos, CellKind::HintMarker)
            .expect("hint is on the board");
        let expected: String = marked.row(hint.pos.row).map(cell_symbol).collect();
        assert!(shows(&rows, &expected), "the hinted cell should be highlighted");
        assert!(
            app.session.grid().positions_of(CellKind::HintMarker).next().is_none(),
            "the session grid never holds the marker"
        );
    }

    #[test]
    fn test_draw_locked_exit_notice() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        app.session = crafted(corridor(
            [CellKind::Exit, CellKind::Key, CellKind::Open, CellKind::Open],
            1,
        ));

        app.command(Command::Move(Direction::Right))
            .expect("move is valid");
        let rows = render(&app);

        assert!(
            shows(&rows, "collect 1 more key(s)"),
            "the locked exit should be reported"
        );
    }

    #[test]
    fn test_draw_won_and_lost_status() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        app.session = crafted(corridor(
            [CellKind::Key, CellKind::Exit, CellKind::Open, CellKind::Open],
            1,
        ));
        app.command(Command::Move(Direction::Right))
            .expect("move is valid");
        app.command(Command::Move(Direction::Right))
            .expect("move is valid");

        let rows = render(&app);
        assert!(shows(&rows, "You escaped in"), "a win should be announced");
        assert!(shows(&rows, "2 moves"), "the win should report the moves");

        app.session = crafted(corridor(
            [CellKind::Trap, CellKind::Exit, CellKind::Open, CellKind::Open],
            0,
        ));
        app.command(Command::Move(Direction::Right))
            .expect("move is valid");

        let rows = render(&app);
        assert!(shows(&rows, "stepped on a trap"), "a loss should be announced");
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(4));
            assert_eq!(layout.len(), 4, "main menu should have 4 items");
            assert!(
                layout.iter().all(|row| row.height == 1),
                "every item should get a full row"
            );
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }
}
