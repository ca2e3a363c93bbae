//! Question lookups and the eligibility rules that decide what visitors see.
//!
//! A question is published once its `pub_date` is not in the future, and it
//! is eligible for display when it is published and owns at least one choice.
//! Listing and detail views only ever show eligible questions; results and
//! voting look questions up regardless.

use crate::orm::{choices, questions};
use chrono::{Duration, NaiveDateTime};
use sea_orm::{
    entity::*, query::*, sea_query::Query, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Select,
};

impl questions::Model {
    pub fn is_published(&self, now: NaiveDateTime) -> bool {
        self.pub_date <= now
    }

    /// True when published within the last `hours` hours, counting back from `now`.
    pub fn was_published_within(&self, now: NaiveDateTime, hours: i64) -> bool {
        now - Duration::hours(hours) <= self.pub_date && self.is_published(now)
    }

    /// True when published within the last day.
    pub fn was_published_recently(&self, now: NaiveDateTime) -> bool {
        self.was_published_within(now, 24)
    }
}

/// Base query for eligible questions: published by `now` and having a choice.
fn eligible(now: NaiveDateTime) -> Select<questions::Entity> {
    questions::Entity::find()
        .filter(questions::Column::PubDate.lte(now))
        .filter(
            questions::Column::Id.in_subquery(
                Query::select()
                    .column(choices::Column::QuestionId)
                    .from(choices::Entity)
                    .to_owned(),
            ),
        )
}

/// Most recently published eligible questions, newest first.
///
/// Questions sharing a `pub_date` keep insertion order.
pub async fn latest_questions(
    db: &DatabaseConnection,
    now: NaiveDateTime,
    limit: u64,
) -> Result<Vec<questions::Model>, DbErr> {
    eligible(now)
        .order_by_desc(questions::Column::PubDate)
        .order_by_asc(questions::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Look up a question by id within the eligible set.
pub async fn find_eligible_question(
    db: &DatabaseConnection,
    question_id: i32,
    now: NaiveDateTime,
) -> Result<Option<questions::Model>, DbErr> {
    eligible(now)
        .filter(questions::Column::Id.eq(question_id))
        .one(db)
        .await
}

/// Look up any question by id.
pub async fn find_question(
    db: &DatabaseConnection,
    question_id: i32,
) -> Result<Option<questions::Model>, DbErr> {
    questions::Entity::find_by_id(question_id).one(db).await
}

/// Choices belonging to a question, in insertion order.
pub async fn choices_for(
    db: &DatabaseConnection,
    question_id: i32,
) -> Result<Vec<choices::Model>, DbErr> {
    choices::Entity::find()
        .filter(choices::Column::QuestionId.eq(question_id))
        .order_by_asc(choices::Column::Id)
        .all(db)
        .await
}

/// Insert a new question.
pub async fn create_question(
    db: &DatabaseConnection,
    question_text: &str,
    pub_date: NaiveDateTime,
) -> Result<questions::Model, DbErr> {
    questions::ActiveModel {
        question_text: Set(question_text.to_owned()),
        pub_date: Set(pub_date),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Insert a new choice with no votes under a question.
pub async fn create_choice(
    db: &DatabaseConnection,
    question_id: i32,
    choice_text: &str,
) -> Result<choices::Model, DbErr> {
    choices::ActiveModel {
        question_id: Set(question_id),
        choice_text: Set(choice_text.to_owned()),
        votes: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
}
