//! Casting votes.
//!
//! A vote adds exactly one to a choice's counter. Repeat submissions are
//! repeat votes; there is no voter identity to deduplicate against.

use crate::orm::{choices, questions};
use sea_orm::{entity::*, query::*, sea_query::Expr, DatabaseConnection, DbErr};

/// Message shown when a vote arrives without a usable choice.
pub const NO_SELECTION_MESSAGE: &str = "You didn't select a choice.";

/// Vote operation errors.
#[derive(Debug)]
pub enum VoteError {
    /// The question does not exist
    NotFound,
    /// No choice was submitted, or it does not belong to the question.
    /// Carries the question so the caller can show its choices again.
    NoSelection(questions::Model),
    /// Storage failure
    Database(DbErr),
}

impl std::fmt::Display for VoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteError::NotFound => write!(f, "Question not found."),
            VoteError::NoSelection(_) => write!(f, "{}", NO_SELECTION_MESSAGE),
            VoteError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for VoteError {}

impl From<DbErr> for VoteError {
    fn from(e: DbErr) -> Self {
        VoteError::Database(e)
    }
}

/// Parse a submitted choice field into a choice id.
pub fn parse_choice_id(choice: Option<&str>) -> Option<i32> {
    choice.and_then(|c| c.trim().parse::<i32>().ok())
}

/// Record one vote for `choice` under `question_id`.
///
/// Returns the question voted on. The increment is a single UPDATE guarded by
/// both ids, so a choice from another question never matches.
pub async fn cast_vote(
    db: &DatabaseConnection,
    question_id: i32,
    choice: Option<&str>,
) -> Result<questions::Model, VoteError> {
    let question = questions::Entity::find_by_id(question_id)
        .one(db)
        .await?
        .ok_or(VoteError::NotFound)?;

    let choice_id = match parse_choice_id(choice) {
        Some(id) => id,
        None => return Err(VoteError::NoSelection(question)),
    };

    let result = choices::Entity::update_many()
        .col_expr(
            choices::Column::Votes,
            Expr::col(choices::Column::Votes).add(1),
        )
        .filter(choices::Column::Id.eq(choice_id))
        .filter(choices::Column::QuestionId.eq(question_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(VoteError::NoSelection(question));
    }

    log::debug!("Vote recorded for choice {} on question {}", choice_id, question_id);

    Ok(question)
}
