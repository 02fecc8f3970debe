use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Choice, ChoiceId, NewQuestion, Question, QuestionId};

/// Persistence boundary for questions and their choices.
///
/// Implementations must make `add_votes` a single atomic update: the
/// ownership check and the addition happen together, never as a separate read
/// followed by a write.
pub trait QuestionStore: Send + Sync {
    fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;
    /// Inserts a question and all of its choices in one transaction. Nothing
    /// is stored when any part fails.
    fn insert_question_with_choices(
        &self,
        question: NewQuestion,
        choice_texts: Vec<String>,
    ) -> Result<(Question, Vec<Choice>), StoreError>;
    fn add_choice(
        &self,
        question_id: QuestionId,
        choice_text: String,
    ) -> Result<Choice, StoreError>;
    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;
    /// Every stored question in id order.
    fn questions(&self) -> Result<Vec<Question>, StoreError>;
    /// Choices owned by `question_id`, in id order.
    fn choices_for(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError>;
    /// Adds `count` votes to `choice_id` if it belongs to `question_id`.
    /// `None` means nothing changed. Tallies saturate at `u64::MAX`.
    fn add_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
        count: u64,
    ) -> Result<Option<Choice>, StoreError>;
    /// Removes a question and every choice it owns.
    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError>;

    fn increment_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> Result<Option<Choice>, StoreError> {
        self.add_votes(question_id, choice_id, 1)
    }

    fn has_choices(&self, question_id: QuestionId) -> Result<bool, StoreError> {
        Ok(!self.choices_for(question_id)?.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Tables {
    next_question_id: u64,
    next_choice_id: u64,
    questions: BTreeMap<QuestionId, Question>,
    choices: BTreeMap<ChoiceId, Choice>,
}

impl Tables {
    fn insert_question(&mut self, question: NewQuestion) -> Question {
        self.next_question_id += 1;
        let stored = Question {
            id: QuestionId(self.next_question_id),
            question_text: question.question_text,
            pub_date: question.pub_date,
        };
        self.questions.insert(stored.id, stored.clone());
        stored
    }

    fn insert_choice(&mut self, question_id: QuestionId, choice_text: String) -> Choice {
        self.next_choice_id += 1;
        let choice = Choice {
            id: ChoiceId(self.next_choice_id),
            question_id,
            choice_text,
            votes: 0,
        };
        self.choices.insert(choice.id, choice.clone());
        choice
    }
}

/// Process-local store. One mutex guards both tables so each operation is one transaction.
#[derive(Debug, Default, Clone)]
pub struct InMemoryQuestionStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl QuestionStore for InMemoryQuestionStore {
    fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        Ok(self.lock()?.insert_question(question))
    }

    fn insert_question_with_choices(
        &self,
        question: NewQuestion,
        choice_texts: Vec<String>,
    ) -> Result<(Question, Vec<Choice>), StoreError> {
        let mut tables = self.lock()?;
        let question = tables.insert_question(question);
        let choices = choice_texts
            .into_iter()
            .map(|text| tables.insert_choice(question.id, text))
            .collect();
        Ok((question, choices))
    }

    fn add_choice(
        &self,
        question_id: QuestionId,
        choice_text: String,
    ) -> Result<Choice, StoreError> {
        let mut tables = self.lock()?;
        if !tables.questions.contains_key(&question_id) {
            return Err(StoreError::NotFound);
        }
        Ok(tables.insert_choice(question_id, choice_text))
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.lock()?.questions.get(&id).cloned())
    }

    fn questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.lock()?.questions.values().cloned().collect())
    }

    fn choices_for(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .choices
            .values()
            .filter(|choice| choice.question_id == question_id)
            .cloned()
            .collect())
    }

    fn add_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
        count: u64,
    ) -> Result<Option<Choice>, StoreError> {
        let mut tables = self.lock()?;
        match tables.choices.get_mut(&choice_id) {
            Some(choice) if choice.question_id == question_id => {
                choice.votes = choice.votes.saturating_add(count);
                Ok(Some(choice.clone()))
            }
            _ => Ok(None),
        }
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        if tables.questions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.choices.retain(|_, choice| choice.question_id != id);
        Ok(true)
    }

    fn has_choices(&self, question_id: QuestionId) -> Result<bool, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .choices
            .values()
            .any(|choice| choice.question_id == question_id))
    }
}
