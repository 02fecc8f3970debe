use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::error;

use super::clock::Clock;
use super::domain::{ChoiceId, QuestionId};
use super::error::PollError;
use super::form::QuestionForm;
use super::service::{CreateQuestionError, PollService};
use super::store::QuestionStore;
use super::views;

/// Router builder exposing the index, detail, results, vote, and create pages.
pub fn poll_router<S, C>(service: Arc<PollService<S, C>>) -> Router
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/polls/", get(index_handler::<S, C>))
        .route(
            "/polls/create/",
            get(create_form_handler).post(create_handler::<S, C>),
        )
        .route("/polls/:question_id/", get(detail_handler::<S, C>))
        .route(
            "/polls/:question_id/results/",
            get(results_handler::<S, C>),
        )
        .route(
            "/polls/:question_id/vote/",
            axum::routing::post(vote_handler::<S, C>),
        )
        .with_state(service)
}

/// Posted vote form. `choice` is absent when no radio button was selected.
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub choice: Option<String>,
}

impl VoteForm {
    fn choice_id(&self) -> Option<ChoiceId> {
        self.choice
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(ChoiceId)
    }
}

/// Integer-only path segments; anything else is treated as a missing question.
fn parse_question_id(raw: &str) -> Result<QuestionId, PollError> {
    raw.parse::<u64>()
        .map(QuestionId)
        .map_err(|_| PollError::NotFound)
}

pub(crate) fn error_response(err: PollError) -> Response {
    match err {
        PollError::NotFound | PollError::InvalidChoice => {
            (StatusCode::NOT_FOUND, Html(views::render_not_found())).into_response()
        }
        PollError::Store(err) => {
            error!(error = %err, "poll store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::render_server_error()),
            )
                .into_response()
        }
    }
}

pub(crate) async fn index_handler<S, C>(
    State(service): State<Arc<PollService<S, C>>>,
) -> Response
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    match service.index() {
        Ok(questions) => Html(views::render_index(&questions)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<S, C>(
    State(service): State<Arc<PollService<S, C>>>,
    Path(question_id): Path<String>,
) -> Response
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    match parse_question_id(&question_id).and_then(|id| service.detail(id)) {
        Ok(detail) => Html(views::render_detail(&detail, None)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn results_handler<S, C>(
    State(service): State<Arc<PollService<S, C>>>,
    Path(question_id): Path<String>,
) -> Response
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    match parse_question_id(&question_id).and_then(|id| service.results(id)) {
        Ok(detail) => Html(views::render_results(&detail)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Records a vote and redirects to the results page. Any unusable choice,
/// including an undecodable body, re-renders the detail page with an error
/// and a 200 status.
pub(crate) async fn vote_handler<S, C>(
    State(service): State<Arc<PollService<S, C>>>,
    Path(question_id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Response
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    let question_id = match parse_question_id(&question_id) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    let choice_id = form.ok().and_then(|Form(form)| form.choice_id());
    let outcome = match choice_id {
        Some(choice_id) => service.vote(question_id, choice_id),
        None => Err(PollError::InvalidChoice),
    };

    match outcome {
        Ok(_) => Redirect::to(&format!("/polls/{question_id}/results/")).into_response(),
        Err(PollError::InvalidChoice) => match service.detail(question_id) {
            Ok(detail) => (
                StatusCode::OK,
                Html(views::render_detail(&detail, Some(views::NO_CHOICE_MESSAGE))),
            )
                .into_response(),
            Err(err) => error_response(err),
        },
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_form_handler() -> Html<String> {
    Html(views::render_create(&QuestionForm::default(), None))
}

pub(crate) async fn create_handler<S, C>(
    State(service): State<Arc<PollService<S, C>>>,
    Form(form): Form<QuestionForm>,
) -> Response
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    match service.create(&form) {
        Ok(_) => Redirect::to("/polls/").into_response(),
        Err(CreateQuestionError::Form(err)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::render_create(&form, Some(&err.to_string()))),
        )
            .into_response(),
        Err(CreateQuestionError::Store(err)) => error_response(PollError::Store(err)),
    }
}
