//! Navigation links shared by every menu on the page.
//!
//! Targets are symbolic paths handed to whatever does the routing; nothing in
//! this crate interprets them.

/// A single navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink
{
    /// Text shown to the user.
    pub label: &'static str,
    /// Route the link points at.
    pub target: &'static str,
}

impl NavLink
{
    /// Creates a link from a label and a target path.
    #[must_use]
    pub const fn new(label: &'static str, target: &'static str) -> Self
    {
        Self { label, target }
    }
}

/// The fixed link sequence, in display order.
pub const NAV_LINKS: &[NavLink] = &[
    NavLink::new("LOGIN", "/login"),
    NavLink::new("HOME", "/"),
    NavLink::new("ABOUT", "/"),
    NavLink::new("CONTACTS", "/"),
];
