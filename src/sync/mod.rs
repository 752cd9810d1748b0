pub mod session;
pub mod studio_api;
pub mod deadline_loader;

pub use deadline_loader::{DeadlineLoader, LoadError, LoadHandle, SourceUpdate};
pub use session::{Session, SessionError, SessionStore};
pub use studio_api::{ApiError, StudioApi, StudioClient};
