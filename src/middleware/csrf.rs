//! Cross-site request forgery guard for the vote form.
//!
//! Opening a question's detail page stores a random token in the visitor's
//! cookie session and renders it into the form as the hidden `csrf_token`
//! field. A vote is only counted when the submitted field matches the session.
//! The token lives as long as the session, so re-rendering the form after a
//! rejected selection reuses it.
use actix_session::Session;
use actix_web::{error, Error};
use rand::{distributions::Alphanumeric, Rng};

pub const VOTE_TOKEN_LENGTH: usize = 32;
const VOTE_TOKEN_KEY: &str = "vote_form_token";

pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your voting session has expired. Reload the question and vote again.";
pub const FORGED_VOTE_MESSAGE: &str =
    "This vote was not submitted from the question's own form.";

fn new_vote_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(VOTE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Token to embed in the vote form, minted on the visitor's first form view.
pub fn vote_form_token(session: &Session) -> Result<String, Error> {
    if let Ok(Some(token)) = session.get::<String>(VOTE_TOKEN_KEY) {
        return Ok(token);
    }

    let token = new_vote_token();
    session.insert(VOTE_TOKEN_KEY, &token).map_err(|e| {
        log::error!("Could not save vote form token to session: {}", e);
        error::ErrorInternalServerError("Could not prepare the vote form.")
    })?;
    Ok(token)
}

/// Reject a vote unless `submitted` matches the token issued with the form.
pub fn verify_vote_form_token(
    session: &Session,
    question_id: i32,
    submitted: &str,
) -> Result<(), Error> {
    let issued = session
        .get::<String>(VOTE_TOKEN_KEY)
        .map_err(|e| {
            log::error!("Could not read vote form token from session: {}", e);
            error::ErrorInternalServerError("Could not read the voting session.")
        })?
        .ok_or_else(|| {
            log::info!("Vote on question {} arrived without a form session", question_id);
            error::ErrorForbidden(SESSION_EXPIRED_MESSAGE)
        })?;

    if submitted != issued {
        log::warn!("Rejected vote on question {}: form token mismatch", question_id);
        return Err(error::ErrorForbidden(FORGED_VOTE_MESSAGE));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_tokens_are_random_alphanumeric() {
        let first = new_vote_token();
        let second = new_vote_token();

        assert_eq!(first.len(), VOTE_TOKEN_LENGTH);
        assert_eq!(second.len(), VOTE_TOKEN_LENGTH);
        assert_ne!(first, second);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
