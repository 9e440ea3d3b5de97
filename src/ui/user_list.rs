//! Banned-user list.
//!
//! Shows the records handed over by the page, tracks the selected row and
//! highlights search hits.
use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use regex::{Regex, RegexBuilder};
use textwrap::wrap;

use crate::roster::UserRecord;

const LIST_HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const MATCH_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow);

const NAME_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

const DETAIL_STYLE: Style = Style::new().fg(Color::Gray);

const LIST_HIGHLIGHT_SYMBOL: &str = "> ";

const EMPTY_PLACEHOLDER: &str = "No banned users";

/// Selection and search state of the banned-user list.
///
/// The records themselves are not stored; they are passed in on every call so
/// the list always shows exactly what the page forwards.
#[derive(Debug, Default)]
pub struct BannedUserList
{
    /// Number of records last seen.
    len: usize,
    /// Current selection state.
    state: ListState,
    /// Indices of records matching the last search.
    matches: Vec<usize>,
    /// Position inside `matches`.
    current_match: usize,
}

impl BannedUserList
{
    /// Creates the list state for `users`, selecting the first record if any.
    ///
    /// # Arguments
    ///
    /// * `users` - The records that will be displayed
    #[must_use]
    pub fn new(users: &[UserRecord]) -> Self
    {
        let mut list = Self::default();
        list.sync(users.len());
        list
    }

    /// Index of the selected record.
    #[must_use]
    pub const fn selected(&self) -> Option<usize>
    {
        self.state.selected()
    }

    /// Indices of the records matching the last search.
    #[must_use]
    pub fn matches(&self) -> &[usize]
    {
        &self.matches
    }

    /// Moves the selection to the next record.
    pub fn next(&mut self)
    {
        if let Some(index) = self.state.selected()
        {
            let last = self.len.saturating_sub(1);
            self.state
                .select(Some(index.saturating_add(1).min(last)));
        }
    }

    /// Moves the selection to the previous record.
    pub const fn previous(&mut self)
    {
        if let Some(index) = self.state.selected()
        {
            self.state
                .select(Some(index.saturating_sub(1)));
        }
    }

    /// Moves the selection to the first record.
    pub const fn first(&mut self)
    {
        if self.len > 0
        {
            self.state.select(Some(0));
        }
    }

    /// Moves the selection to the last record.
    pub const fn last(&mut self)
    {
        if self.len > 0
        {
            self.state
                .select(Some(self.len - 1));
        }
    }

    /// Searches the records for `query`.
    ///
    /// Matching is literal and case-insensitive over every field of a record.
    /// The selection jumps to the first hit.
    ///
    /// # Arguments
    ///
    /// * `users` - The records to search
    /// * `query` - The text to look for
    ///
    /// # Returns
    ///
    /// The number of matching records.
    pub fn search(&mut self, users: &[UserRecord], query: &str) -> usize
    {
        self.sync(users.len());
        self.clear_search();

        if query.is_empty()
        {
            return 0;
        }

        let Some(pattern) = build_pattern(query)
        else
        {
            return 0;
        };

        self.matches = users
            .iter()
            .enumerate()
            .filter(|(_, user)| {
                user.fields()
                    .iter()
                    .any(|field| pattern.is_match(field))
            })
            .map(|(index, _)| index)
            .collect();

        self.jump_to_match();

        self.matches.len()
    }

    /// Selects the next search hit, wrapping around at the end.
    pub fn next_match(&mut self)
    {
        if self.matches.is_empty()
        {
            return;
        }

        self.current_match = (self.current_match + 1) % self.matches.len();
        self.jump_to_match();
    }

    /// Selects the previous search hit, wrapping around at the start.
    pub fn previous_match(&mut self)
    {
        if self.matches.is_empty()
        {
            return;
        }

        self.current_match = if self.current_match == 0
        {
            self.matches.len() - 1
        }
        else
        {
            self.current_match - 1
        };

        self.jump_to_match();
    }

    /// Drops the search hits and their highlighting.
    pub fn clear_search(&mut self)
    {
        self.matches.clear();
        self.current_match = 0;
    }

    /// Builds one list item per record.
    ///
    /// # Arguments
    ///
    /// * `users` - The records to display
    /// * `wrap_width` - Width available for the text of an item
    ///
    /// # Returns
    ///
    /// The items, in the same order as `users`.
    #[must_use]
    pub fn items<'a>(&self, users: &'a [UserRecord], wrap_width: usize) -> Vec<ListItem<'a>>
    {
        users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let mut lines = vec![Line::styled(user.display_name(), NAME_STYLE)];

                let details = if user.email.is_empty()
                {
                    user.meta_id.clone()
                }
                else
                {
                    format!("{} · {}", user.meta_id, user.email)
                };

                // textwrap panics on zero width
                lines.extend(
                    wrap(&details, wrap_width.max(1))
                        .into_iter()
                        .map(|part| Line::styled(format!("  {part}"), DETAIL_STYLE)),
                );

                let item = ListItem::new(lines);

                if self.matches.contains(&index)
                {
                    item.style(MATCH_STYLE)
                }
                else
                {
                    item
                }
            })
            .collect()
    }

    /// Renders the list to the specified area.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area within the frame to render the list
    /// * `users` - The records to display, exactly as received
    pub fn render(&mut self, frame: &mut Frame, area: Rect, users: &[UserRecord])
    {
        self.sync(users.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Banned users ({})", users.len()))
            .title_alignment(Alignment::Left);

        if users.is_empty()
        {
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .alignment(Alignment::Center)
                .style(DETAIL_STYLE)
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        // 2 for the border, 2 for the detail indent
        let wrap_width = (area.width as usize).saturating_sub(LIST_HIGHLIGHT_SYMBOL.len() + 4);

        let list = List::new(self.items(users, wrap_width))
            .block(block)
            .highlight_style(LIST_HIGHLIGHT_STYLE)
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(list, area, &mut self.state);
    }

    /// Keeps the selection inside a list of `len` records.
    fn sync(&mut self, len: usize)
    {
        self.len = len;

        if len == 0
        {
            self.state.select(None);
            self.clear_search();
            return;
        }

        match self.state.selected()
        {
            Some(index) if index >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) =>
            {}
        }

        self.matches
            .retain(|index| *index < len);
        if self.current_match >= self.matches.len()
        {
            self.current_match = 0;
        }
    }

    /// Selects the current search hit.
    fn jump_to_match(&mut self)
    {
        if let Some(index) = self
            .matches
            .get(self.current_match)
        {
            self.state.select(Some(*index));
        }
    }
}

/// Compiles `query` into a literal, case-insensitive pattern.
fn build_pattern(query: &str) -> Option<Regex>
{
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(err) =>
        {
            warn!("Could not build search pattern for {query:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::ui::testing::render_to_text;

    fn user(meta_id: &str, name: &str, surname: &str, email: &str) -> UserRecord
    {
        UserRecord {
            meta_id: meta_id.to_owned(),
            name: name.to_owned(),
            surname: surname.to_owned(),
            email: email.to_owned(),
        }
    }

    fn sample() -> Vec<UserRecord>
    {
        vec![
            user("m-1", "Ada", "Lovelace", "ada@example.org"),
            user("m-2", "Alan", "Turing", ""),
            user("m-3", "Grace", "Hopper", "grace@navy.example"),
        ]
    }

    #[test]
    fn selects_first_record()
    {
        let list = BannedUserList::new(&sample());

        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn empty_list_has_no_selection()
    {
        let mut list = BannedUserList::new(&[]);
        list.next();
        list.last();

        assert_eq!(list.selected(), None);
    }

    #[test]
    fn selection_is_clamped()
    {
        let mut list = BannedUserList::new(&sample());

        list.previous();
        assert_eq!(list.selected(), Some(0));

        list.next();
        list.next();
        list.next();
        assert_eq!(list.selected(), Some(2));

        list.first();
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn search_is_case_insensitive()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);

        let hits = list.search(&users, "HOPPER");

        assert_eq!(hits, 1);
        assert_eq!(list.matches(), [2]);
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn search_is_literal()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);

        // "." would match every record as a regex
        assert_eq!(list.search(&users, "."), 2);
        assert_eq!(list.search(&users, "m-?"), 0);
    }

    #[test]
    fn search_covers_every_field()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);

        assert_eq!(list.search(&users, "m-2"), 1);
        assert_eq!(list.search(&users, "navy"), 1);
        assert_eq!(list.search(&users, "a"), 3);
    }

    #[test]
    fn matches_wrap_around()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);
        list.search(&users, "example");

        assert_eq!(list.selected(), Some(0));

        list.next_match();
        assert_eq!(list.selected(), Some(2));

        list.next_match();
        assert_eq!(list.selected(), Some(0));

        list.previous_match();
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn empty_query_clears_hits()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);
        list.search(&users, "Ada");

        assert_eq!(list.search(&users, ""), 0);
        assert!(list.matches().is_empty());
    }

    #[test]
    fn one_item_per_record()
    {
        let users = sample();
        let list = BannedUserList::new(&users);

        assert_eq!(list.items(&users, 40).len(), users.len());
    }

    #[test]
    fn renders_every_record()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);

        let text = render_to_text(50, 12, |frame| {
            let area = frame.area();
            list.render(frame, area, &users);
        });

        assert!(text.contains("Banned users (3)"));
        assert!(text.contains("> Lovelace Ada"));
        assert!(text.contains("Turing Alan"));
        assert!(text.contains("Hopper Grace"));
        assert!(text.contains("m-1 · ada@example.org"));
    }

    #[test]
    fn renders_placeholder_when_empty()
    {
        let mut list = BannedUserList::new(&[]);

        let text = render_to_text(40, 5, |frame| {
            let area = frame.area();
            list.render(frame, area, &[]);
        });

        assert!(text.contains("Banned users (0)"));
        assert!(text.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn shrinking_input_keeps_selection_in_range()
    {
        let users = sample();
        let mut list = BannedUserList::new(&users);
        list.last();

        let fewer = &users[..1];
        let _ = render_to_text(40, 6, |frame| {
            let area = frame.area();
            list.render(frame, area, fewer);
        });

        assert_eq!(list.selected(), Some(0));
    }
}
