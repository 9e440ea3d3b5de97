//! `MetaClass` UI Library
//!
//! Terminal rendition of the `MetaClass` banned-user page.
//!
//! # Features
//!
//! - A burger menu that expands into a link panel, and a static link row
//! - A page shell composing header, banned-user list, and footer
//! - Loading the banned-user roster from a local JSON export
//!
//! # Modules
//!
//! - `nav`: The navigation links shared by both menus
//! - `roster`: Banned-user records and their loading
//! - `ui`: Terminal user interface components and event handling
pub mod nav;
pub mod roster;
pub mod ui;

pub use nav::{NAV_LINKS, NavLink};
pub use roster::{Roster, UserRecord};
pub use ui::logging;
pub use ui::{
    App, AppMode, BannedUserList, Event, EventHandler, Logo, PageShell, StaticMenu,
    TerminalGuard, ToggleMenu, init_panic_hook, init_tui,
};
