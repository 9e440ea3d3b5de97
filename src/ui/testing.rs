//! Helpers for inspecting rendered frames in tests.
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};

/// Draws once into an off-screen terminal and returns the buffer as text,
/// one line per row.
pub fn render_to_text(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String
{
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();

    for row in 0..height
    {
        for column in 0..width
        {
            text.push_str(buffer[(column, row)].symbol());
        }
        text.push('\n');
    }

    text
}
