use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use crossterm::event::{KeyCode, KeyEvent};
use log::{error, info};
use metaclass_ui::logging::{clear_log_files, init_logging, log_file_path};
use metaclass_ui::{App, AppMode, Event, EventHandler, Logo, Roster};
use metaclass_ui::{TerminalGuard, init_panic_hook, init_tui};
use ratatui::Terminal;
use ratatui::backend::Backend as RatatuiBackend;

fn main() -> Result<()>
{
    let log_path = log_file_path()?;
    let default_roster = Roster::default_path()?;

    // Parse command line arguments
    let matches = Command::new("metaclass_ui")
        .about("Terminal view of the MetaClass banned-user list")
        .version(crate_version!())
        // Inform about the default locations
        .after_help(format!(
            "Without FILE the roster is read from {}.\nLogs are written to {}",
            default_roster.display(),
            log_path.display()
        ))
        .arg(
            Arg::new("users")
                .help("JSON file with the banned users")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("logo")
                .long("logo")
                .help("Logo image reference shown in the menu")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Delete the log files and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("clear-log")
    {
        clear_log_files(&log_path)?;
        println!("Log files cleared");
        return Ok(());
    }

    init_logging(&log_path)?;
    init_panic_hook();

    let roster = match matches.get_one::<PathBuf>("users")
    {
        Some(path) => Roster::load(path),
        None => Roster::load_default(),
    }
    .inspect_err(|err| error!("Could not load roster: {err:#}"))?;

    let mut logo = Logo::default();
    if let Some(source) = matches.get_one::<String>("logo")
    {
        logo.source.clone_from(source);
    }

    info!(
        "Starting with {} banned users, logo {}",
        roster.users().len(),
        logo.source
    );

    let app = App::new(roster.into_users(), logo);

    // Use RAII to ensure terminal cleanup happens
    let _terminal_guard = TerminalGuard::new()?;
    let mut terminal = init_tui()?;

    let event_handler = EventHandler::new(Duration::from_millis(250));

    run_app(&mut terminal, app, &event_handler)
}

/// Run the main loop.
///
/// # Arguments
///
/// * `terminal` - The terminal to draw to
/// * `app` - The app to run
/// * `event_handler` - The event handler to handle events
///
/// # Errors
///
/// Returns an error if the terminal fails to draw or the event reader stops.
fn run_app<T: RatatuiBackend>(
    terminal: &mut Terminal<T>,
    mut app: App,
    event_handler: &EventHandler,
) -> Result<()>
where
    T::Error: Send + Sync + 'static,
{
    loop
    {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event_handler.next()?
        {
            handle_key(&mut app, key);
        }

        if app.should_quit
        {
            break;
        }
    }

    Ok(())
}

/// Applies one key press to the app.
///
/// # Arguments
///
/// * `app` - The app to update
/// * `key` - The pressed key
fn handle_key(app: &mut App, key: KeyEvent)
{
    match (app.mode, key.code)
    {
        // Quit with 'q' in normal mode
        (AppMode::Normal, KeyCode::Char('q')) =>
        {
            app.should_quit = true;
        }

        // Help toggle with '?'
        (AppMode::Normal | AppMode::Help, KeyCode::Char('?')) |
        (AppMode::Help, KeyCode::Esc) =>
        {
            app.toggle_help();
        }

        // Burger menu
        (AppMode::Normal, KeyCode::Char('m')) =>
        {
            app.toggle_menu();
        }
        (AppMode::Normal, KeyCode::Enter) =>
        {
            app.activate_link();
        }

        // Navigation in normal mode
        (AppMode::Normal, KeyCode::Char('j') | KeyCode::Down) =>
        {
            app.move_down();
        }
        (AppMode::Normal, KeyCode::Char('k') | KeyCode::Up) =>
        {
            app.move_up();
        }
        (AppMode::Normal, KeyCode::Char('g') | KeyCode::Home) =>
        {
            app.go_to_first();
        }
        (AppMode::Normal, KeyCode::Char('G') | KeyCode::End) =>
        {
            app.go_to_last();
        }

        // Search handling
        (AppMode::Normal, KeyCode::Char('/')) =>
        {
            app.enter_search_mode();
        }
        (AppMode::Search, KeyCode::Enter) =>
        {
            app.perform_search();
            app.exit_search_mode();
        }
        (AppMode::Search, KeyCode::Esc) =>
        {
            app.exit_search_mode();
        }
        (AppMode::Search, KeyCode::Backspace) =>
        {
            app.remove_search_char();
        }
        (AppMode::Search, KeyCode::Char(ch)) =>
        {
            app.add_search_char(ch);
        }

        // Search result navigation
        (AppMode::Normal, KeyCode::Char('n')) =>
        {
            app.next_search_result();
        }
        (AppMode::Normal, KeyCode::Char('N')) =>
        {
            app.prev_search_result();
        }
        (AppMode::Normal, KeyCode::Esc) =>
        {
            app.reset_search_highlights();
        }

        _ =>
        {} // Ignore other key combinations
    }
}

#[cfg(test)]
mod tests
{
    use crossterm::event::KeyModifiers;
    use metaclass_ui::UserRecord;

    use super::*;

    fn user(meta_id: &str, name: &str, surname: &str) -> UserRecord
    {
        UserRecord {
            meta_id: meta_id.to_owned(),
            name: name.to_owned(),
            surname: surname.to_owned(),
            email: String::new(),
        }
    }

    fn sample_app() -> App
    {
        App::new(
            vec![
                user("m-1", "Ada", "Lovelace"),
                user("m-2", "Alan", "Turing"),
                user("m-3", "Grace", "Hopper"),
            ],
            Logo::default(),
        )
    }

    fn press(app: &mut App, codes: &[KeyCode])
    {
        for code in codes
        {
            handle_key(app, KeyEvent::new(*code, KeyModifiers::NONE));
        }
    }

    #[test]
    fn open_menu_takes_movement_keys()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('m'), KeyCode::Char('j')]);

        assert!(app.menu.is_open());
        assert_eq!(
            app.menu
                .selected_link()
                .map(|link| link.label),
            Some("HOME")
        );
        assert_eq!(app.user_list.selected(), Some(0));
    }

    #[test]
    fn closed_menu_leaves_movement_to_the_list()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Down]);

        assert!(!app.menu.is_open());
        assert_eq!(app.user_list.selected(), Some(2));
        assert_eq!(
            app.menu
                .selected_link()
                .map(|link| link.label),
            Some("LOGIN")
        );
    }

    #[test]
    fn enter_in_open_menu_records_route()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('m'), KeyCode::Enter]);

        assert_eq!(app.pending_route, Some("/login"));
        assert!(app.menu.is_open());
    }

    #[test]
    fn enter_with_closed_menu_does_not_navigate()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.pending_route, None);
    }

    #[test]
    fn question_mark_is_typed_while_searching()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('?')]);

        assert_eq!(app.mode, AppMode::Search);
        assert_eq!(app.search_text, "?");
    }

    #[test]
    fn q_is_typed_while_searching()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('q')]);

        assert!(!app.should_quit);
        assert_eq!(app.mode, AppMode::Search);
        assert_eq!(app.search_text, "q");
    }

    #[test]
    fn q_quits_in_normal_mode()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('q')]);

        assert!(app.should_quit);
    }

    #[test]
    fn help_opens_and_closes()
    {
        let mut app = sample_app();

        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.user_list.selected(), Some(0));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn search_runs_on_enter()
    {
        let mut app = sample_app();

        press(
            &mut app,
            &[
                KeyCode::Char('/'),
                KeyCode::Char('h'),
                KeyCode::Char('x'),
                KeyCode::Backspace,
                KeyCode::Char('o'),
                KeyCode::Enter,
            ],
        );

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search_text, "ho");
        assert_eq!(app.user_list.matches(), [2]);
        assert_eq!(app.user_list.selected(), Some(2));
    }

    #[test]
    fn escape_in_search_keeps_highlights()
    {
        let mut app = sample_app();

        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('a'), KeyCode::Enter],
        );
        let hits = app.user_list.matches().len();

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.user_list.matches().len(), hits);

        press(&mut app, &[KeyCode::Esc]);
        assert!(app.user_list.matches().is_empty());
    }
}
