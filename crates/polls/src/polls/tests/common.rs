use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::polls::clock::FixedClock;
use crate::polls::domain::{Choice, ChoiceId, NewQuestion, Question, QuestionId};
use crate::polls::store::{InMemoryQuestionStore, QuestionStore, StoreError};
use crate::polls::{poll_router, PollService};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

pub(super) fn question_at(id: u64, pub_date: DateTime<Utc>) -> Question {
    Question {
        id: QuestionId(id),
        question_text: format!("Question {id}"),
        pub_date,
    }
}

pub(super) fn build_service() -> (
    PollService<InMemoryQuestionStore, FixedClock>,
    Arc<InMemoryQuestionStore>,
    Arc<FixedClock>,
) {
    let store = Arc::new(InMemoryQuestionStore::new());
    let clock = Arc::new(FixedClock::new(now()));
    let service = PollService::new(store.clone(), clock.clone());
    (service, store, clock)
}

pub(super) fn build_router() -> (axum::Router, Arc<InMemoryQuestionStore>, Arc<FixedClock>) {
    let (service, store, clock) = build_service();
    (poll_router(Arc::new(service)), store, clock)
}

/// Question published `days` from `now()` (negative for the past).
pub(super) fn create_question(store: &InMemoryQuestionStore, text: &str, days: i64) -> Question {
    store
        .insert_question(NewQuestion {
            question_text: text.to_string(),
            pub_date: now() + Duration::days(days),
        })
        .expect("insert question")
}

pub(super) fn create_question_with_choice(
    store: &InMemoryQuestionStore,
    text: &str,
    days: i64,
) -> (Question, Choice) {
    let question = create_question(store, text, days);
    let choice = store
        .add_choice(question.id, "Choice 1".to_string())
        .expect("add choice");
    (question, choice)
}

pub(super) fn votes_for(store: &InMemoryQuestionStore, question_id: QuestionId) -> Vec<u64> {
    store
        .choices_for(question_id)
        .expect("choices")
        .into_iter()
        .map(|choice| choice.votes)
        .collect()
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) struct UnavailableStore;

impl QuestionStore for UnavailableStore {
    fn insert_question(&self, _question: NewQuestion) -> Result<Question, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert_question_with_choices(
        &self,
        _question: NewQuestion,
        _choice_texts: Vec<String>,
    ) -> Result<(Question, Vec<Choice>), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn add_choice(
        &self,
        _question_id: QuestionId,
        _choice_text: String,
    ) -> Result<Choice, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn question(&self, _id: QuestionId) -> Result<Option<Question>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn questions(&self) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn choices_for(&self, _question_id: QuestionId) -> Result<Vec<Choice>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn add_votes(
        &self,
        _question_id: QuestionId,
        _choice_id: ChoiceId,
        _count: u64,
    ) -> Result<Option<Choice>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete_question(&self, _id: QuestionId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
