//! HTML pages for the polls app. All user-supplied text goes through [`escape_html`].

use std::fmt::Write;

use super::domain::{QuestionDetail, QuestionSummary};
use super::form::QuestionForm;

pub const EMPTY_INDEX_MESSAGE: &str = "No polls are available.";
pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn render_index(questions: &[QuestionSummary]) -> String {
    let mut body = String::from("<h1>Polls</h1>\n");
    if questions.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", EMPTY_INDEX_MESSAGE);
    } else {
        body.push_str("<ul>\n");
        for summary in questions {
            let badge = if summary.recently_published {
                " <small>new</small>"
            } else {
                ""
            };
            let _ = writeln!(
                body,
                "<li><a href=\"/polls/{}/\">{}</a>{}</li>",
                summary.question.id,
                escape_html(&summary.question.question_text),
                badge
            );
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<p><a href=\"/polls/create/\">Create a poll</a></p>\n");
    page("Polls", &body)
}

pub fn render_detail(detail: &QuestionDetail, error_message: Option<&str>) -> String {
    let question = &detail.question;
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<form action=\"/polls/{}/vote/\" method=\"post\">",
        question.id
    );
    let _ = writeln!(
        body,
        "<fieldset>\n<legend><h1>{}</h1></legend>",
        escape_html(&question.question_text)
    );
    if let Some(message) = error_message {
        let _ = writeln!(body, "<p><strong>{}</strong></p>", escape_html(message));
    }
    for (index, choice) in detail.choices.iter().enumerate() {
        let _ = writeln!(
            body,
            "<input type=\"radio\" name=\"choice\" id=\"choice{n}\" value=\"{id}\">\n<label for=\"choice{n}\">{text}</label><br>",
            n = index + 1,
            id = choice.id,
            text = escape_html(&choice.choice_text)
        );
    }
    body.push_str("</fieldset>\n<input type=\"submit\" value=\"Vote\">\n</form>\n");
    page(&question.question_text, &body)
}

pub fn render_results(detail: &QuestionDetail) -> String {
    let question = &detail.question;
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&question.question_text));
    body.push_str("<ul>\n");
    for choice in &detail.choices {
        let _ = writeln!(
            body,
            "<li>{} -- {} vote{}</li>",
            escape_html(&choice.choice_text),
            choice.votes,
            if choice.votes == 1 { "" } else { "s" }
        );
    }
    body.push_str("</ul>\n");
    let _ = writeln!(body, "<a href=\"/polls/{}/\">Vote again?</a>", question.id);
    page(&question.question_text, &body)
}

pub fn render_create(form: &QuestionForm, error_message: Option<&str>) -> String {
    let mut body = String::from("<h1>Create a poll</h1>\n");
    if let Some(message) = error_message {
        let _ = writeln!(body, "<p><strong>{}</strong></p>", escape_html(message));
    }
    body.push_str("<form action=\"/polls/create/\" method=\"post\">\n");
    let _ = writeln!(
        body,
        "<label for=\"question_text\">Question</label>\n<input type=\"text\" name=\"question_text\" id=\"question_text\" maxlength=\"200\" value=\"{}\"><br>",
        escape_html(&form.question_text)
    );
    let _ = writeln!(
        body,
        "<label for=\"pub_date\">Publish at (UTC, blank for now)</label>\n<input type=\"text\" name=\"pub_date\" id=\"pub_date\" value=\"{}\"><br>",
        escape_html(&form.pub_date)
    );
    let _ = writeln!(
        body,
        "<label for=\"choices\">Choices (one per line)</label>\n<textarea name=\"choices\" id=\"choices\">{}</textarea><br>",
        escape_html(&form.choices)
    );
    body.push_str("<input type=\"submit\" value=\"Create\">\n</form>\n");
    page("Create a poll", &body)
}

pub fn render_not_found() -> String {
    page("Not found", "<h1>Not Found</h1>\n<p>No question matches the given query.</p>\n")
}

pub fn render_server_error() -> String {
    page("Server error", "<h1>Server Error</h1>\n<p>The poll store is unavailable.</p>\n")
}
