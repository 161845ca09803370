//! fOS SPA
//!
//! Page enhancement for server-rendered sites: internal links swap the
//! page's `main` in place instead of reloading, and forms validate on the
//! client with inline and global feedback.
//!
//! A [`Page`] owns the live document and is driven by its host: clicks,
//! blurs, typing, history moves and the passage of time all come in as
//! calls.

pub mod alert;
pub mod config;
pub mod error;
pub mod history;
pub mod listeners;
pub mod loader;
pub mod logging;
pub mod navigation;
pub mod page;
pub mod styles;
pub mod template;
pub mod theme;
pub mod timers;

pub use alert::{AlertKind, AlertManager};
pub use config::{AlertTimings, ConfigError, SpaConfig};
pub use error::{LoadError, PageError};
pub use history::{HistoryManager, HistoryState, PopState};
pub use loader::{LoadState, PageLoader};
pub use logging::init_logging;
pub use navigation::{NavigationMode, NavigationRequest, is_internal_link};
pub use page::{ClickOutcome, NavigationOutcome, Page, SubmitOutcome};
pub use template::render_template;
pub use theme::{ThemeCycler, ThemeMode};
