mod config;
mod services;
mod ui;

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Settings;
use crate::services::file_ops;
use crate::services::session::EditSession;
use crate::ui::app::{App, Screen};
use crate::ui::picker::PickerAction;
use crate::ui::{dialogs, help, picker};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("huedit {} - Find and re-pick HTML/CSS colors in a text file", VERSION);
    println!();
    println!("USAGE:");
    println!("    huedit [OPTIONS] <FILE>");
    println!();
    println!("ARGS:");
    println!("    <FILE>    The text file to scan for color references");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!();
    println!("The modified text is written to a sibling file named");
    println!("{{name}}-modified{{ext}}; the source file is never changed.");
}

fn print_version() {
    println!("huedit {}", VERSION);
}

fn main() -> io::Result<()> {
    // Handle command line arguments
    let args: Vec<String> = env::args().collect();
    let mut file_arg: Option<&str> = None;
    if args.len() > 1 {
        match args[1].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            arg => file_arg = Some(arg),
        }
    }

    let Some(file_arg) = file_arg else {
        eprintln!("Error: missing required <FILE> argument");
        eprintln!("Usage: huedit <FILE>");
        std::process::exit(1);
    };

    // Fatal file errors are reported before the terminal enters raw mode.
    let path = PathBuf::from(file_arg);
    if !path.is_file() {
        eprintln!("Error: file not found: {}", path.display());
        std::process::exit(1);
    }
    let source_text = match file_ops::read_source(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: could not read {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let settings = Settings::load();
    let session = EditSession::new(path, source_text);
    let mut app = App::new(session, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // Clear screen before entering alternate screen
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        crossterm::cursor::Show
    )?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }
    if let Some(ref saved) = app.saved_path {
        println!("Saved modified file: {}", saved.display());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw::draw(f, app))?;

        // Poll with timeout so the message timer keeps ticking
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Overlays take input priority: picker, then dialogs
                if app.picker.is_some() {
                    handle_picker_input(app, key.code, key.modifiers);
                } else if app.dialog.is_some() {
                    if dialogs::handle_dialog_input(app, key.code) {
                        return Ok(());
                    }
                } else {
                    match app.current_screen {
                        Screen::Help => {
                            if help::handle_input(app, key.code) {
                                app.current_screen = Screen::ColorList;
                            }
                        }
                        Screen::ColorList => {
                            if handle_list_input(app, key.code) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
            Event::Mouse(mouse) => {
                if app.picker.is_none() && app.dialog.is_none() {
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.move_cursor(-1),
                        MouseEventKind::ScrollDown => app.move_cursor(1),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_picker_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let Some(ref mut state) = app.picker else {
        return;
    };
    match picker::handle_input(state, code, modifiers) {
        PickerAction::None => {}
        PickerAction::Cancel => {
            // User cancelled: no replacement is recorded
            app.picker = None;
        }
        PickerAction::Apply => {
            let token = state.token.clone();
            let hex = state.current_hex();
            app.picker = None;
            app.record_replacement(&token, &hex);
        }
    }
}

/// Handles a key on the color list. Returns true when the app should exit.
fn handle_list_input(app: &mut App, code: KeyCode) -> bool {
    match code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return app.request_quit(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-(app.visible_rows.max(1) as i32)),
        KeyCode::PageDown => app.move_cursor(app.visible_rows.max(1) as i32),
        KeyCode::Home => app.cursor_to_start(),
        KeyCode::End => app.cursor_to_end(),

        // Enter/Space - pick a replacement for the selected color
        KeyCode::Enter | KeyCode::Char(' ') => app.open_picker(),

        // Clear the pending replacement on the selected row
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Delete => app.clear_selected(),

        // Save and exit
        KeyCode::Char('s') | KeyCode::Char('S') => return app.request_save(),

        // Help / theme
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.show_help(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(),

        _ => {}
    }
    false
}
