//! Navigation menus.
//!
//! Two variants render the same link sequence: a [`StaticMenu`] that is always
//! laid out in the header, and a [`ToggleMenu`] (the burger button) that
//! expands into a panel when opened.
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::nav::{NAV_LINKS, NavLink};

const TRIGGER_STYLE: Style = Style::new().fg(Color::Gray);

const TRIGGER_OPEN_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const PANEL_BORDER_STYLE: Style = Style::new().fg(Color::Gray);

const PANEL_HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const PANEL_HIGHLIGHT_SYMBOL: &str = "> ";

/// Three bars while closed.
const BARS_CLOSED: [&str; 3] = ["───", "───", "───"];

/// The bars fold into a cross while open.
const BARS_OPEN: [&str; 3] = ["╲ ╱", " ╳ ", "╱ ╲"];

/// Width of the expanded panel, borders included.
const PANEL_WIDTH: u16 = 22;

/// Links, a blank line, the logo, and two borders.
#[allow(clippy::cast_possible_truncation)]
const PANEL_HEIGHT: u16 = NAV_LINKS.len() as u16 + 4;

/// Gap between links in the static menu.
const STATIC_LINK_GAP: &str = "   ";

/// Class names of the burger trigger and its panel for one menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuClasses
{
    /// Class of the burger trigger.
    pub trigger: &'static str,
    /// Class of the link panel.
    pub panel: &'static str,
}

/// Builds the class names for the given state.
///
/// The open modifiers are `open` on the trigger and `menu2Open` on the panel.
#[must_use]
pub const fn class_names(is_open: bool) -> MenuClasses
{
    if is_open
    {
        MenuClasses {
            trigger: "hamburger-menu open",
            panel: "menu2 menu2Open",
        }
    }
    else
    {
        MenuClasses {
            trigger: "hamburger-menu",
            panel: "menu2",
        }
    }
}

/// Open/closed state of a [`ToggleMenu`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState
{
    /// Whether the panel is expanded.
    is_open: bool,
}

impl MenuState
{
    /// Whether the panel is expanded.
    #[must_use]
    pub const fn is_open(self) -> bool
    {
        self.is_open
    }

    /// Flips between open and closed.
    pub const fn toggle(&mut self)
    {
        self.is_open = !self.is_open;
    }
}

/// Image reference shown at the bottom of the open panel.
///
/// The source is never resolved here; the terminal only shows the alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo
{
    /// Where the image lives.
    pub source: String,
    /// Text shown in place of the image.
    pub alt: String,
}

impl Default for Logo
{
    fn default() -> Self
    {
        Self {
            source: "img/MetaClassLogo.png".to_owned(),
            alt: "MetaClass".to_owned(),
        }
    }
}

/// Burger button that expands into a link panel.
#[derive(Debug)]
pub struct ToggleMenu
{
    /// Open/closed state.
    state: MenuState,
    /// Logo shown under the links.
    logo: Logo,
    /// Selected link inside the panel.
    selection: ListState,
}

impl ToggleMenu
{
    /// Creates a closed menu showing `logo` in its panel.
    ///
    /// # Arguments
    ///
    /// * `logo` - The logo reference to pass through to the panel
    #[must_use]
    pub fn new(logo: Logo) -> Self
    {
        Self {
            state: MenuState::default(),
            logo,
            selection: ListState::default().with_selected(Some(0)),
        }
    }

    /// Whether the panel is expanded.
    #[must_use]
    pub const fn is_open(&self) -> bool
    {
        self.state.is_open()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> MenuState
    {
        self.state
    }

    /// Opens a closed menu or closes an open one.
    pub const fn toggle(&mut self)
    {
        self.state.toggle();
    }

    /// Class names for the current state.
    #[must_use]
    pub const fn classes(&self) -> MenuClasses
    {
        class_names(self.is_open())
    }

    /// The logo reference, exactly as supplied.
    #[must_use]
    pub const fn logo(&self) -> &Logo
    {
        &self.logo
    }

    /// The links listed in the panel.
    #[must_use]
    pub const fn links(&self) -> &'static [NavLink]
    {
        NAV_LINKS
    }

    /// Moves the panel selection down, stopping at the last link.
    pub fn select_next(&mut self)
    {
        let last = NAV_LINKS.len().saturating_sub(1);
        let next = self
            .selection
            .selected()
            .map_or(0, |index| index.saturating_add(1).min(last));

        self.selection.select(Some(next));
    }

    /// Moves the panel selection up, stopping at the first link.
    pub fn select_previous(&mut self)
    {
        let previous = self
            .selection
            .selected()
            .map_or(0, |index| index.saturating_sub(1));

        self.selection.select(Some(previous));
    }

    /// The link currently selected in the panel.
    #[must_use]
    pub fn selected_link(&self) -> Option<&'static NavLink>
    {
        self.selection
            .selected()
            .and_then(|index| NAV_LINKS.get(index))
    }

    /// Renders the burger trigger.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area reserved for the trigger
    pub fn render_trigger(&self, frame: &mut Frame, area: Rect)
    {
        let (bars, style) = if self.is_open()
        {
            (BARS_OPEN, TRIGGER_OPEN_STYLE)
        }
        else
        {
            (BARS_CLOSED, TRIGGER_STYLE)
        };

        let lines: Vec<Line> = bars
            .iter()
            .map(|bar| Line::styled(*bar, style))
            .collect();

        let trigger = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::LEFT)
                    .border_style(TRIGGER_STYLE),
            );

        frame.render_widget(trigger, area);
    }

    /// Renders the link panel when the menu is open.
    ///
    /// The panel is anchored to the top-right corner of `area` and drawn on
    /// top of whatever is already there. Nothing is drawn while closed.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area the panel may cover
    pub fn render_panel(&mut self, frame: &mut Frame, area: Rect)
    {
        if !self.is_open()
        {
            return;
        }

        let panel_area = panel_area(area);

        // Overlay, so wipe what is underneath
        frame.render_widget(Clear, panel_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(PANEL_BORDER_STYLE)
            .title("Menu");
        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);

        let items: Vec<ListItem> = NAV_LINKS
            .iter()
            .map(|link| ListItem::new(link.label))
            .collect();

        let list = List::new(items)
            .highlight_style(PANEL_HIGHLIGHT_STYLE)
            .highlight_symbol(PANEL_HIGHLIGHT_SYMBOL);

        #[allow(clippy::cast_possible_truncation)]
        let list_height = (NAV_LINKS.len() as u16).min(inner.height);
        let list_area = Rect { height: list_height, ..inner };
        frame.render_stateful_widget(list, list_area, &mut self.selection);

        // Logo sits on the last inner row, under a blank line
        if inner.height > list_height.saturating_add(1)
        {
            let logo_area = Rect {
                y: inner.bottom().saturating_sub(1),
                height: 1,
                ..inner
            };
            let logo = Paragraph::new(format!("[{}]", self.logo.alt))
                .alignment(Alignment::Center)
                .style(Style::new().fg(Color::Cyan));
            frame.render_widget(logo, logo_area);
        }
    }
}

impl Default for ToggleMenu
{
    fn default() -> Self
    {
        Self::new(Logo::default())
    }
}

/// Stateless row of navigation links.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMenu;

impl StaticMenu
{
    /// The links, always the same four in the same order.
    #[must_use]
    pub const fn links() -> &'static [NavLink]
    {
        NAV_LINKS
    }

    /// The links laid out on a single line.
    #[must_use]
    pub fn line() -> Line<'static>
    {
        let mut spans = Vec::with_capacity(NAV_LINKS.len() * 2);

        for (index, link) in NAV_LINKS.iter().enumerate()
        {
            if index > 0
            {
                spans.push(Span::raw(STATIC_LINK_GAP));
            }
            spans.push(Span::styled(
                link.label,
                Style::new().add_modifier(Modifier::UNDERLINED),
            ));
        }

        Line::from(spans)
    }

    /// Renders the links into `area`.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area to render the links in
    pub fn render(frame: &mut Frame, area: Rect)
    {
        frame.render_widget(Paragraph::new(Self::line()), area);
    }
}

/// Panel rectangle in the top-right corner of `area`, clamped to it.
fn panel_area(area: Rect) -> Rect
{
    let width = PANEL_WIDTH.min(area.width);
    let height = PANEL_HEIGHT.min(area.height);

    Rect::new(
        area.right().saturating_sub(width),
        area.y,
        width,
        height,
    )
}
