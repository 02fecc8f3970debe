//! Publication-window rules shared by the index, detail, and results views.

use chrono::{DateTime, Duration, Utc};

use super::domain::Question;

/// Width of the "recently published" window.
pub fn recent_window() -> Duration {
    Duration::hours(24)
}

/// A question is published once its `pub_date` is at or before `now`.
pub fn is_published(question: &Question, now: DateTime<Utc>) -> bool {
    question.pub_date <= now
}

/// True iff `now - 1 day <= pub_date <= now`.
///
/// Future questions never qualify, even though `now - pub_date` is then a
/// negative duration that is trivially shorter than a day.
pub fn was_published_recently(question: &Question, now: DateTime<Utc>) -> bool {
    is_published(question, now) && question.pub_date >= now - recent_window()
}

impl Question {
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        is_published(self, now)
    }

    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        was_published_recently(self, now)
    }
}
