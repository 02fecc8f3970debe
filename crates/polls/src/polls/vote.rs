use std::sync::Arc;

use tracing::debug;

use super::domain::{Choice, ChoiceId, QuestionId};
use super::error::PollError;
use super::store::QuestionStore;

/// Records one vote per call. There is no per-voter tracking, so repeated
/// calls each count.
pub struct VoteTransition<S> {
    store: Arc<S>,
}

impl<S> Clone for VoteTransition<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> VoteTransition<S>
where
    S: QuestionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Adds exactly one vote to `choice_id`, which must belong to `question_id`.
    ///
    /// A mismatched or unknown choice yields `InvalidChoice` and mutates nothing.
    pub fn cast_vote(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> Result<Choice, PollError> {
        if self.store.question(question_id)?.is_none() {
            return Err(PollError::NotFound);
        }

        match self.store.increment_votes(question_id, choice_id)? {
            Some(choice) => {
                debug!(%question_id, %choice_id, votes = choice.votes, "vote recorded");
                Ok(choice)
            }
            None => Err(PollError::InvalidChoice),
        }
    }
}
