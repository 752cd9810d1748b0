mod authentication;
mod session;
mod presentation;
mod calendar_views;
mod dialogs;

pub use authentication::load_session;
pub use session::run_tui;
