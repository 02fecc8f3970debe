use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Longest accepted question or choice text, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// Raw fields posted by the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub pub_date: String,
    /// One choice per line.
    #[serde(default)]
    pub choices: String,
}

/// A create form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestionForm {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionFormError {
    #[error("Question text is required.")]
    MissingQuestionText,
    #[error("Question text must be at most 200 characters.")]
    QuestionTextTooLong,
    #[error("Choice {line} must be at most 200 characters.")]
    ChoiceTextTooLong { line: usize },
    #[error("Enter a valid date/time (got '{0}').")]
    InvalidPubDate(String),
}

impl QuestionForm {
    /// Validates the form. An empty `pub_date` resolves to `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ValidQuestionForm, QuestionFormError> {
        let question_text = self.question_text.trim();
        if question_text.is_empty() {
            return Err(QuestionFormError::MissingQuestionText);
        }
        if question_text.chars().count() > MAX_TEXT_LEN {
            return Err(QuestionFormError::QuestionTextTooLong);
        }

        let pub_date = match self.pub_date.trim() {
            "" => now,
            raw => parse_pub_date(raw)
                .ok_or_else(|| QuestionFormError::InvalidPubDate(raw.to_string()))?,
        };

        let mut choices = Vec::new();
        for (index, line) in self.choices.lines().enumerate() {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text.chars().count() > MAX_TEXT_LEN {
                return Err(QuestionFormError::ChoiceTextTooLong { line: index + 1 });
            }
            choices.push(text.to_string());
        }

        Ok(ValidQuestionForm {
            question_text: question_text.to_string(),
            pub_date,
            choices,
        })
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`, or a bare date (midnight UTC).
pub fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn blank_pub_date_defaults_to_now_and_blank_choices_are_skipped() {
        let form = QuestionForm {
            question_text: "  What's new?  ".to_string(),
            pub_date: String::new(),
            choices: "Not much\n\n  The sky \n".to_string(),
        };

        let valid = form.validate(now()).expect("form is valid");
        assert_eq!(valid.question_text, "What's new?");
        assert_eq!(valid.pub_date, now());
        assert_eq!(valid.choices, vec!["Not much", "The sky"]);
    }

    #[test]
    fn rejects_missing_and_oversized_text() {
        let missing = QuestionForm {
            question_text: "   ".to_string(),
            ..QuestionForm::default()
        };
        assert_eq!(
            missing.validate(now()),
            Err(QuestionFormError::MissingQuestionText)
        );

        let long = QuestionForm {
            question_text: "q".repeat(MAX_TEXT_LEN + 1),
            ..QuestionForm::default()
        };
        assert_eq!(
            long.validate(now()),
            Err(QuestionFormError::QuestionTextTooLong)
        );

        let long_choice = QuestionForm {
            question_text: "Pick".to_string(),
            choices: format!("ok\n{}", "c".repeat(MAX_TEXT_LEN + 1)),
            ..QuestionForm::default()
        };
        assert_eq!(
            long_choice.validate(now()),
            Err(QuestionFormError::ChoiceTextTooLong { line: 2 })
        );
    }

    #[test]
    fn rejects_unparseable_pub_date() {
        let form = QuestionForm {
            question_text: "When?".to_string(),
            pub_date: "next tuesday".to_string(),
            choices: String::new(),
        };
        assert_eq!(
            form.validate(now()),
            Err(QuestionFormError::InvalidPubDate("next tuesday".to_string()))
        );
    }

    #[test]
    fn parses_supported_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 9, 24, 10, 30, 0).unwrap();
        assert_eq!(parse_pub_date("2025-09-24T10:30:00Z"), Some(expected));
        assert_eq!(parse_pub_date("2025-09-24T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_pub_date("2025-09-24T10:30"), Some(expected));
        assert_eq!(parse_pub_date("2025-09-24 10:30"), Some(expected));
        assert_eq!(
            parse_pub_date("2025-09-24"),
            Some(Utc.with_ymd_and_hms(2025, 9, 24, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_pub_date("24/09/2025"), None);
    }
}
