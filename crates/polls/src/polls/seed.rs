//! CSV fixtures for bootstrapping a store.
//!
//! Expected headers: `question_text,pub_date,choice_text,votes`. Rows that
//! share `question_text` and `pub_date` describe one question. A blank
//! `choice_text` declares the question without adding a choice, and `pub_date`
//! may be absolute or a day offset from `now` such as `-30d` or `+5d`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{NewQuestion, QuestionId};
use super::form::parse_pub_date;
use super::store::{QuestionStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid seed CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unrecognized pub_date '{value}'")]
    InvalidPubDate { row: usize, value: String },
    #[error("row {row}: question_text is required")]
    MissingQuestionText { row: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counts of what a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub questions: usize,
    pub choices: usize,
    pub votes: u64,
}

pub struct PollSeeder;

impl PollSeeder {
    pub fn from_path<S, P>(store: &S, path: P, now: DateTime<Utc>) -> Result<SeedSummary, SeedError>
    where
        S: QuestionStore + ?Sized,
        P: AsRef<Path>,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(store, file, now)
    }

    pub fn from_reader<S, R>(store: &S, reader: R, now: DateTime<Utc>) -> Result<SeedSummary, SeedError>
    where
        S: QuestionStore + ?Sized,
        R: Read,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen: HashMap<(String, DateTime<Utc>), QuestionId> = HashMap::new();
        let mut summary = SeedSummary::default();

        for (index, record) in csv_reader.deserialize::<SeedRow>().enumerate() {
            let row = record?;
            let row_number = index + 2;
            if row.question_text.is_empty() {
                return Err(SeedError::MissingQuestionText { row: row_number });
            }
            let pub_date =
                resolve_pub_date(&row.pub_date, now).ok_or_else(|| SeedError::InvalidPubDate {
                    row: row_number,
                    value: row.pub_date.clone(),
                })?;

            let key = (row.question_text.clone(), pub_date);
            let question_id = match seen.get(&key) {
                Some(id) => *id,
                None => {
                    let question = store.insert_question(NewQuestion {
                        question_text: row.question_text.clone(),
                        pub_date,
                    })?;
                    summary.questions += 1;
                    seen.insert(key, question.id);
                    question.id
                }
            };

            let Some(choice_text) = row.choice_text else {
                continue;
            };
            let choice = store.add_choice(question_id, choice_text)?;
            summary.choices += 1;
            let votes = row.votes.unwrap_or(0);
            if votes > 0 {
                store.add_votes(question_id, choice.id, votes)?;
                summary.votes = summary.votes.saturating_add(votes);
            }
        }

        Ok(summary)
    }
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    question_text: String,
    pub_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    choice_text: Option<String>,
    #[serde(default)]
    votes: Option<u64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn resolve_pub_date(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Some(days) = trimmed.strip_suffix('d') {
        if let Ok(offset) = days.trim_start_matches('+').parse::<i64>() {
            return Duration::try_days(offset).and_then(|delta| now.checked_add_signed(delta));
        }
    }
    parse_pub_date(trimmed)
}
