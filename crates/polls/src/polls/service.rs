use std::sync::Arc;

use tracing::info;

use super::clock::Clock;
use super::domain::{ChoiceId, NewQuestion, Question, QuestionDetail, QuestionId, QuestionSummary};
use super::error::PollError;
use super::form::{QuestionForm, QuestionFormError};
use super::query::QueryService;
use super::store::{QuestionStore, StoreError};
use super::visibility::was_published_recently;
use super::vote::VoteTransition;

/// Facade used by the HTTP handlers: resolves `now` from the clock and
/// delegates to the query and vote paths.
pub struct PollService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    query: QueryService<S>,
    votes: VoteTransition<S>,
}

impl<S, C> PollService<S, C>
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            query: QueryService::new(store.clone()),
            votes: VoteTransition::new(store.clone()),
            store,
            clock,
        }
    }

    /// Listable questions for the index page, most recent first.
    pub fn index(&self) -> Result<Vec<QuestionSummary>, PollError> {
        let now = self.clock.now();
        let questions = self.query.list_visible(now)?;
        Ok(questions
            .into_iter()
            .map(|question| QuestionSummary {
                recently_published: was_published_recently(&question, now),
                question,
            })
            .collect())
    }

    pub fn detail(&self, id: QuestionId) -> Result<QuestionDetail, PollError> {
        self.query.detail_visible_or_not_found(id, self.clock.now())
    }

    pub fn results(&self, id: QuestionId) -> Result<QuestionDetail, PollError> {
        self.query.detail_visible_or_not_found(id, self.clock.now())
    }

    /// Casts a vote on a published question and returns the updated tallies.
    ///
    /// Unpublished questions are `NotFound`, matching the detail page.
    pub fn vote(&self, id: QuestionId, choice_id: ChoiceId) -> Result<QuestionDetail, PollError> {
        let now = self.clock.now();
        let question = self.query.get_visible_or_not_found(id, now)?;
        let choice = self.votes.cast_vote(question.id, choice_id)?;
        info!(
            question_id = %question.id,
            choice_id = %choice.id,
            votes = choice.votes,
            "vote cast"
        );
        self.query.detail_visible_or_not_found(id, now)
    }

    /// Validates the create form and stores the question with its choices.
    pub fn create(&self, form: &QuestionForm) -> Result<Question, CreateQuestionError> {
        let valid = form.validate(self.clock.now())?;
        let (question, choices) = self.store.insert_question_with_choices(
            NewQuestion {
                question_text: valid.question_text,
                pub_date: valid.pub_date,
            },
            valid.choices,
        )?;

        info!(
            question_id = %question.id,
            pub_date = %question.pub_date,
            choices = choices.len(),
            "question created"
        );
        Ok(question)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreateQuestionError {
    #[error(transparent)]
    Form(#[from] QuestionFormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
