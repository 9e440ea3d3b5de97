//! Application module for the banned-user page.
//!
//! This module provides the main application state and logic. It owns the
//! records and the component states, and turns key presses into operations on
//! the burger menu and the user list.
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::menu::{Logo, ToggleMenu};
use super::shell::PageShell;
use super::user_list::BannedUserList;
use crate::nav::NavLink;
use crate::roster::UserRecord;

/// Application mode that determines the current UI state.
///
/// Controls what is displayed and how user input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode
{
    /// Normal browsing mode - default state.
    Normal,
    /// Help overlay is displayed.
    Help,
    /// Search mode - accepting search input.
    Search,
}

/// Main application state.
pub struct App
{
    /// Banned users, exactly as supplied.
    pub users: Vec<UserRecord>,
    /// Current application mode.
    pub mode: AppMode,
    /// Current search query text.
    pub search_text: String,
    /// Flag indicating if the application should exit.
    pub should_quit: bool,
    /// Burger menu in the header.
    pub menu: ToggleMenu,
    /// Selection and search state of the user list.
    pub user_list: BannedUserList,
    /// Target of the last activated link, for the router to pick up.
    pub pending_route: Option<&'static str>,
    /// Footer status text.
    status: String,
}

impl App
{
    /// Creates a new App instance.
    ///
    /// # Arguments
    ///
    /// * `users` - The banned users to show
    /// * `logo` - The logo shown in the burger panel
    #[must_use]
    pub fn new(users: Vec<UserRecord>, logo: Logo) -> Self
    {
        let user_list = BannedUserList::new(&users);

        Self {
            users,
            mode: AppMode::Normal,
            search_text: String::new(),
            should_quit: false,
            menu: ToggleMenu::new(logo),
            user_list,
            pending_route: None,
            status: String::new(),
        }
    }

    /// Footer status text.
    #[must_use]
    pub fn status(&self) -> &str
    {
        &self.status
    }

    /// Renders the application UI to the provided frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the UI to
    pub fn render(&mut self, frame: &mut Frame)
    {
        PageShell::new(&self.users)
            .with_status(&self.status)
            .render(frame, &mut self.menu, &mut self.user_list);

        // Render help if in help mode
        if self.mode == AppMode::Help
        {
            Self::render_help(frame);
        }

        // Render search if in search mode
        if self.mode == AppMode::Search
        {
            self.render_search(frame);
        }
    }

    /// Renders the help overlay with keyboard shortcuts.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the help overlay to
    fn render_help(frame: &mut Frame)
    {
        // Create a centered rectangle.
        let area = centered_rect(60, 60, frame.area());

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let text = Text::from(vec![
            Line::from("MetaClass Help:"),
            Line::from(""),
            Line::from("m: Open/close the menu"),
            Line::from("j/k or ↓/↑: Move down/up"),
            Line::from("g/G: Go to first/last user"),
            Line::from("Enter: Follow the selected menu link"),
            Line::from("/: Search users"),
            Line::from("n/N: Next/previous search result"),
            Line::from("q: Quit"),
            Line::from("?: Toggle help"),
        ]);

        let help_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help")
                    .style(Style::default()),
            )
            .style(Style::default())
            .wrap(Wrap { trim: true });

        frame.render_widget(help_box, area);
    }

    /// Renders the search input box.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the search box to
    fn render_search(&self, frame: &mut Frame)
    {
        let frame_area = frame.area();
        let area = Rect::new(
            frame_area.width / 4,
            frame_area.height.saturating_sub(3),
            frame_area.width / 2,
            3.min(frame_area.height),
        );

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let text = Text::from(format!("/{}", self.search_text));

        let search_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search")
                    .style(Style::default()),
            )
            .style(Style::default());

        frame.render_widget(search_box, area);
    }

    /// Opens or closes the burger menu.
    pub fn toggle_menu(&mut self)
    {
        self.menu.toggle();
        info!("Menu is now {}", self.menu.classes().trigger);
    }

    /// Moves down in the open menu, or in the user list otherwise.
    pub fn move_down(&mut self)
    {
        if self.menu.is_open()
        {
            self.menu.select_next();
        }
        else
        {
            self.user_list.next();
        }
    }

    /// Moves up in the open menu, or in the user list otherwise.
    pub fn move_up(&mut self)
    {
        if self.menu.is_open()
        {
            self.menu.select_previous();
        }
        else
        {
            self.user_list.previous();
        }
    }

    /// Jumps to the first user.
    pub const fn go_to_first(&mut self)
    {
        self.user_list.first();
    }

    /// Jumps to the last user.
    pub const fn go_to_last(&mut self)
    {
        self.user_list.last();
    }

    /// Follows the selected menu link.
    ///
    /// Only does something while the menu is open. The target is recorded in
    /// `pending_route`; the menu stays as it is.
    ///
    /// # Returns
    ///
    /// The followed link, if any.
    pub fn activate_link(&mut self) -> Option<&'static NavLink>
    {
        if !self.menu.is_open()
        {
            return None;
        }

        let link = self.menu.selected_link()?;

        info!("Navigating to {} ({})", link.target, link.label);
        self.pending_route = Some(link.target);
        self.status = format!("route: {}", link.target);

        Some(link)
    }

    /// Toggles the help overlay.
    pub fn toggle_help(&mut self)
    {
        self.mode = if self.mode == AppMode::Help
        {
            AppMode::Normal
        }
        else
        {
            AppMode::Help
        };
    }

    /// Enters search mode, clearing any previous search.
    pub fn enter_search_mode(&mut self)
    {
        self.mode = AppMode::Search;
        self.search_text.clear();
    }

    /// Exits search mode and returns to normal mode.
    pub const fn exit_search_mode(&mut self)
    {
        self.mode = AppMode::Normal;
    }

    /// Adds a character to the search text.
    ///
    /// # Arguments
    ///
    /// * `ch` - The character to add
    pub fn add_search_char(&mut self, ch: char)
    {
        self.search_text.push(ch);
    }

    /// Removes the last character from the search text.
    pub fn remove_search_char(&mut self)
    {
        self.search_text.pop();
    }

    /// Searches the users for the current search text.
    ///
    /// # Returns
    ///
    /// The number of matching users.
    pub fn perform_search(&mut self) -> usize
    {
        let hits = self
            .user_list
            .search(&self.users, &self.search_text);

        self.status = if self.search_text.is_empty()
        {
            String::new()
        }
        else
        {
            format!("{hits} match(es) for \"{}\"", self.search_text)
        };

        hits
    }

    /// Moves to the next search result.
    pub fn next_search_result(&mut self)
    {
        self.user_list.next_match();
    }

    /// Moves to the previous search result.
    pub fn prev_search_result(&mut self)
    {
        self.user_list.previous_match();
    }

    /// Drops search highlighting.
    pub fn reset_search_highlights(&mut self)
    {
        self.user_list.clear_search();
        self.status.clear();
    }
}

/// Creates a centered rectangle inside the given area.
///
/// # Arguments
///
/// * `percent_x` - Width of the rectangle as a percentage of the parent area
/// * `percent_y` - Height of the rectangle as a percentage of the parent area
/// * `area` - Parent rectangle
///
/// # Returns
///
/// A new rectangle positioned in the center of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect
{
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
