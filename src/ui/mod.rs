//! User Interface module for the banned-user page.
//!
//! Contains the page components (menus, user list, page shell) and the
//! terminal plumbing that hosts them: event handling, application state, and
//! terminal lifecycle.
mod app;
mod event;
mod guard;
pub mod logging;
pub mod menu;
pub mod shell;
#[cfg(test)]
mod testing;
pub mod user_list;

pub use app::{App, AppMode};
pub use event::{Event, EventHandler};
pub use guard::{TerminalGuard, init_panic_hook, init_tui};
pub use menu::{Logo, MenuClasses, MenuState, StaticMenu, ToggleMenu, class_names};
pub use shell::{PageShell, ShellAreas};
pub use user_list::BannedUserList;
