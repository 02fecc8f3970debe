//! Question listing, detail access, and voting for the polls app.
//!
//! Visibility is time-based: a question is only reachable once its
//! `pub_date` has passed, and the index additionally hides questions
//! without choices.

pub mod clock;
pub mod domain;
pub mod error;
pub mod form;
pub mod query;
pub mod router;
pub mod seed;
pub mod service;
pub mod store;
pub mod views;
pub mod visibility;
pub mod vote;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    Choice, ChoiceId, NewQuestion, Question, QuestionDetail, QuestionId, QuestionSummary,
};
pub use error::PollError;
pub use form::{QuestionForm, QuestionFormError};
pub use query::QueryService;
pub use router::poll_router;
pub use seed::{PollSeeder, SeedError, SeedSummary};
pub use service::{CreateQuestionError, PollService};
pub use store::{InMemoryQuestionStore, QuestionStore, StoreError};
pub use visibility::{is_published, was_published_recently};
pub use vote::VoteTransition;
