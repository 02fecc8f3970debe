use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{Question, QuestionDetail, QuestionId};
use super::error::PollError;
use super::store::QuestionStore;
use super::visibility::is_published;

/// Read-only lookups filtered through the publication rules.
pub struct QueryService<S> {
    store: Arc<S>,
}

impl<S> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> QueryService<S>
where
    S: QuestionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Published questions that own at least one choice, most recent first.
    ///
    /// Equal `pub_date`s keep id (insertion) order.
    pub fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Question>, PollError> {
        let mut visible = Vec::new();
        for question in self.store.questions()? {
            if is_published(&question, now) && self.store.has_choices(question.id)? {
                visible.push(question);
            }
        }

        visible.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(a.id.cmp(&b.id)));
        Ok(visible)
    }

    /// Single-question access for the detail and results pages.
    ///
    /// Unlike [`list_visible`](Self::list_visible) this does not require choices.
    pub fn get_visible_or_not_found(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<Question, PollError> {
        match self.store.question(id)? {
            Some(question) if is_published(&question, now) => Ok(question),
            _ => Err(PollError::NotFound),
        }
    }

    pub fn detail_visible_or_not_found(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<QuestionDetail, PollError> {
        let question = self.get_visible_or_not_found(id, now)?;
        let choices = self.store.choices_for(question.id)?;
        Ok(QuestionDetail { question, choices })
    }
}
