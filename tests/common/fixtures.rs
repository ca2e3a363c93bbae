//! Test fixtures for creating poll data
#![allow(dead_code)]

use chrono::{Duration, Utc};
use polls::orm::{choices, questions};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// Create a question published `days` days from now.
/// Negative for questions published in the past, positive for future ones.
pub async fn create_question(
    db: &DatabaseConnection,
    question_text: &str,
    days: i64,
) -> Result<questions::Model, DbErr> {
    let pub_date = Utc::now().naive_utc() + Duration::days(days);
    polls::question::create_question(db, question_text, pub_date).await
}

/// Create a question published `days` days from now with the given choices.
pub async fn create_question_with_choices(
    db: &DatabaseConnection,
    question_text: &str,
    days: i64,
    choice_texts: &[&str],
) -> Result<(questions::Model, Vec<choices::Model>), DbErr> {
    let question = create_question(db, question_text, days).await?;

    let mut created = Vec::with_capacity(choice_texts.len());
    for text in choice_texts {
        created.push(polls::question::create_choice(db, question.id, text).await?);
    }

    Ok((question, created))
}

/// Current vote count of a choice.
pub async fn votes_of(db: &DatabaseConnection, choice_id: i32) -> Result<i32, DbErr> {
    let choice = choices::Entity::find_by_id(choice_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("Choice {} not found", choice_id)))?;
    Ok(choice.votes)
}

/// Pull the CSRF token out of a rendered vote form.
pub fn csrf_token_from(body: &str) -> Option<String> {
    let marker = r#"name="csrf_token" value=""#;
    let start = body.find(marker)? + marker.len();
    let end = body[start..].find('"')?;
    Some(body[start..start + end].to_string())
}
