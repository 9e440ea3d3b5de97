//! Page shell.
//!
//! Lays out the banned-user page: a header carrying the title and both menus,
//! the user list in the middle, and a footer with key hints and status.
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::menu::{StaticMenu, ToggleMenu};
use super::user_list::BannedUserList;
use crate::roster::UserRecord;

/// Title row, three rows for the burger bars, and the bottom border.
const HEADER_HEIGHT: u16 = 5;

const FOOTER_HEIGHT: u16 = 3;

/// Room for the three-column bars plus padding and the separator.
const TRIGGER_WIDTH: u16 = 7;

const TITLE: &str = "MetaClass";

const FOOTER_TITLE: &str = "© Commigo";

const KEY_HINTS: &str = "? help  m menu  / search  q quit";

const TITLE_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

const STATUS_STYLE: Style = Style::new().fg(Color::Cyan);

/// Regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellAreas
{
    /// Title and menus.
    pub header: Rect,
    /// Banned-user list.
    pub main: Rect,
    /// Key hints and status.
    pub footer: Rect,
}

/// The banned-user page.
///
/// Holds nothing but borrowed inputs. The users are forwarded to the list
/// exactly as received.
#[derive(Debug, Clone, Copy)]
pub struct PageShell<'a>
{
    /// Records for the content region.
    users: &'a [UserRecord],
    /// Status text for the footer.
    status: &'a str,
}

impl<'a> PageShell<'a>
{
    /// Creates a page for `users`.
    ///
    /// # Arguments
    ///
    /// * `users` - The records to show, in display order
    #[must_use]
    pub const fn new(users: &'a [UserRecord]) -> Self
    {
        Self { users, status: "" }
    }

    /// Sets the status text shown in the footer.
    #[must_use]
    pub const fn with_status(mut self, status: &'a str) -> Self
    {
        self.status = status;
        self
    }

    /// The records forwarded to the content region.
    #[must_use]
    pub const fn users(&self) -> &'a [UserRecord]
    {
        self.users
    }

    /// Splits `area` into header, main, and footer regions.
    #[must_use]
    pub fn layout(area: Rect) -> ShellAreas
    {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        ShellAreas {
            header: chunks[0],
            main: chunks[1],
            footer: chunks[2],
        }
    }

    /// Renders the whole page.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `menu` - The burger menu drawn in the header
    /// * `list` - The list state for the content region
    pub fn render(&self, frame: &mut Frame, menu: &mut ToggleMenu, list: &mut BannedUserList)
    {
        let areas = Self::layout(frame.area());

        Self::render_header(frame, areas.header, menu);
        list.render(frame, areas.main, self.users);
        self.render_footer(frame, areas.footer);

        // Last, so the open panel covers the list
        menu.render_panel(frame, areas.main);
    }

    /// Renders the title, the static links, and the burger trigger.
    fn render_header(frame: &mut Frame, area: Rect, menu: &ToggleMenu)
    {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .title(Span::styled(TITLE, TITLE_STYLE));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(TRIGGER_WIDTH)])
            .split(inner);

        // Links on the middle bar's row
        let links_area = Rect {
            y: columns[0]
                .y
                .saturating_add(1)
                .min(columns[0].bottom().saturating_sub(1)),
            height: columns[0].height.min(1),
            ..columns[0]
        };
        StaticMenu::render(frame, links_area);

        menu.render_trigger(frame, columns[1]);
    }

    /// Renders key hints and the status text.
    fn render_footer(&self, frame: &mut Frame, area: Rect)
    {
        let mut spans = vec![Span::raw(KEY_HINTS)];

        if !self.status.is_empty()
        {
            spans.push(Span::raw("  │  "));
            spans.push(Span::styled(self.status, STATUS_STYLE));
        }

        let footer = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(FOOTER_TITLE),
        );

        frame.render_widget(footer, area);
    }
}
