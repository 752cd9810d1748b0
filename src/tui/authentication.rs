use studio_deadlines::storage::config::Config;
use studio_deadlines::sync::session::{Session, SessionError, SessionStore};

/// Reads the session the studio web app left behind. Signing in happens
/// there, so a missing token just tells the user where it goes.
pub fn load_session(config: &Config) -> Result<Session, SessionError> {
    let store = SessionStore::new(config.api.session_file.clone());

    match store.load() {
        Ok(session) => {
            tracing::info!("Session loaded for {}", session.greeting_name());
            Ok(session)
        }
        Err(e) => {
            println!("No usable session found at:");
            println!("{}", store.path().display());
            println!("\nCreate it with the token from the studio web app:");
            println!("  {{ \"access_token\": \"...\", \"display_name\": \"...\", \"role\": \"photographer\" }}");
            println!("\nThe API address is set in {}", Config::config_path().display());
            Err(e)
        }
    }
}
