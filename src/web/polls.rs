//! Poll pages: question list, detail with vote form, results, and voting.

use crate::middleware::csrf::{verify_vote_form_token, vote_form_token};
use crate::orm::{choices, questions};
use crate::question::{choices_for, find_eligible_question, find_question, latest_questions};
use crate::vote::{cast_vote, VoteError, NO_SELECTION_MESSAGE};
use actix_session::Session;
use actix_web::{error, get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_polls)
        .service(view_question)
        .service(view_results)
        .service(vote);
}

/// Display model for a question on the index page
#[derive(Debug)]
pub struct QuestionListItem {
    pub question: questions::Model,
    /// Published within the configured recent window
    pub is_new: bool,
}

#[derive(Template)]
#[template(path = "polls/index.html")]
pub struct IndexTemplate {
    pub site_name: String,
    pub latest_question_list: Vec<QuestionListItem>,
}

#[derive(Template)]
#[template(path = "polls/detail.html")]
pub struct DetailTemplate<'a> {
    pub site_name: String,
    pub question: &'a questions::Model,
    pub choices: Vec<choices::Model>,
    pub csrf_token: String,
    pub error_message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "polls/results.html")]
pub struct ResultsTemplate {
    pub site_name: String,
    pub question: questions::Model,
    pub choices: Vec<choices::Model>,
}

#[derive(Deserialize)]
pub struct VoteFormData {
    #[serde(default)]
    pub csrf_token: String,
    /// Raw form value; anything that is not a choice id of this question
    /// counts as no selection.
    #[serde(default)]
    pub choice: Option<String>,
}

pub fn results_url(question_id: i32) -> String {
    format!("/polls/{}/results/", question_id)
}

/// Latest eligible questions, newest first.
#[get("/polls/")]
pub async fn view_polls(db: web::Data<DatabaseConnection>) -> Result<impl Responder, Error> {
    let polls_config = crate::app_config::polls();
    let now = Utc::now().naive_utc();

    let latest_question_list = latest_questions(db.get_ref(), now, polls_config.latest_limit)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch latest questions: {}", e);
            error::ErrorInternalServerError(e)
        })?
        .into_iter()
        .map(|question| QuestionListItem {
            is_new: question.was_published_within(now, polls_config.recent_hours),
            question,
        })
        .collect();

    Ok(IndexTemplate {
        site_name: crate::app_config::site().name,
        latest_question_list,
    }
    .to_response())
}

/// Vote form for an eligible question.
#[get("/polls/{question_id}/")]
pub async fn view_question(
    db: web::Data<DatabaseConnection>,
    session: Session,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let question_id = path.into_inner();
    let now = Utc::now().naive_utc();

    let question = find_eligible_question(db.get_ref(), question_id, now)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("Question not found."))?;

    render_detail(db.get_ref(), &session, &question, None).await
}

/// Results for any existing question, published or not.
#[get("/polls/{question_id}/results/")]
pub async fn view_results(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let question_id = path.into_inner();

    let question = find_question(db.get_ref(), question_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("Question not found."))?;

    let choices = choices_for(db.get_ref(), question.id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(ResultsTemplate {
        site_name: crate::app_config::site().name,
        question,
        choices,
    }
    .to_response())
}

#[post("/polls/{question_id}/vote/")]
pub async fn vote(
    db: web::Data<DatabaseConnection>,
    session: Session,
    path: web::Path<i32>,
    form: web::Form<VoteFormData>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    verify_vote_form_token(&session, question_id, &form.csrf_token)?;

    match cast_vote(db.get_ref(), question_id, form.choice.as_deref()).await {
        Ok(question) => {
            log::info!("Vote cast on question {}", question.id);
            Ok(HttpResponse::Found()
                .append_header(("Location", results_url(question.id)))
                .finish())
        }
        Err(VoteError::NoSelection(question)) => {
            log::debug!("Vote on question {} had no valid selection", question.id);
            render_detail(db.get_ref(), &session, &question, Some(NO_SELECTION_MESSAGE)).await
        }
        Err(VoteError::NotFound) => Err(error::ErrorNotFound("Question not found.")),
        Err(VoteError::Database(e)) => {
            log::error!("Failed to record vote on question {}: {}", question_id, e);
            Err(error::ErrorInternalServerError(e))
        }
    }
}

async fn render_detail(
    db: &DatabaseConnection,
    session: &Session,
    question: &questions::Model,
    error_message: Option<&str>,
) -> Result<HttpResponse, Error> {
    let choices = choices_for(db, question.id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(DetailTemplate {
        site_name: crate::app_config::site().name,
        question,
        choices,
        csrf_token: vote_form_token(session)?,
        error_message,
    }
    .to_response())
}
