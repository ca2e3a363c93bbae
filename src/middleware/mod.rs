pub mod csrf;

use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use rand::{distributions::Alphanumeric, Rng};

/// Minimum length of a usable `SECRET_KEY`.
const SECRET_KEY_MIN_LENGTH: usize = 64;

/// Session signing key from `SECRET_KEY`, or a random one if it is unusable.
pub fn session_key() -> Key {
    match std::env::var("SECRET_KEY") {
        Ok(key) if key.len() >= SECRET_KEY_MIN_LENGTH => Key::from(key.as_bytes()),
        other => {
            let random_string: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(128)
                .map(char::from)
                .collect();
            log::warn!(
                "SECRET_KEY was invalid. Reason: {:?}\r\nSession cookies will be invalidated every time the application restarts. A secret key must be at least {} bytes.",
                other.map(|k| format!("{} bytes", k.len())),
                SECRET_KEY_MIN_LENGTH
            );
            Key::from(random_string.as_bytes())
        }
    }
}

/// Cookie-backed session store carrying the CSRF token.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_same_site(SameSite::Lax)
        .cookie_secure(false) // Allow HTTP for development
        .session_lifecycle(PersistentSession::default())
        .build()
}
