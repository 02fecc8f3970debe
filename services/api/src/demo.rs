use crate::infra::seed_store;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use polls::error::AppError;
use polls::polls::{
    Clock, FixedClock, InMemoryQuestionStore, NewQuestion, PollService, QuestionDetail,
    QuestionStore, StoreError,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV fixture to load instead of the built-in sample questions.
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
    /// Evaluate visibility at this instant (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Skip casting the sample vote.
    #[arg(long)]
    pub(crate) skip_vote: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed_csv,
        at,
        skip_vote,
    } = args;

    let now = at.unwrap_or_else(Utc::now);
    let store = Arc::new(InMemoryQuestionStore::new());
    match seed_csv {
        Some(path) => seed_store(store.as_ref(), &path, now)?,
        None => seed_sample_questions(store.as_ref(), now).map_err(demo_store_error)?,
    }

    let service = PollService::new(store.clone(), Arc::new(FixedClock::new(now)));
    walkthrough(&service, store.as_ref(), now, skip_vote)
}

/// Prints the index, casts one vote on the newest question, and prints its results.
fn walkthrough<S, C>(
    service: &PollService<S, C>,
    store: &S,
    now: DateTime<Utc>,
    skip_vote: bool,
) -> Result<(), AppError>
where
    S: QuestionStore + 'static,
    C: Clock + 'static,
{
    println!("Polls as of {}", now.to_rfc3339());
    let index = service.index()?;
    if index.is_empty() {
        println!("  No polls are available.");
        return Ok(());
    }
    for summary in &index {
        let badge = if summary.recently_published {
            " [new]"
        } else {
            ""
        };
        println!(
            "- #{} {} (published {}){}",
            summary.question.id,
            summary.question.question_text,
            summary.question.pub_date.format("%Y-%m-%d %H:%M"),
            badge
        );
    }

    let hidden = store
        .questions()
        .map_err(demo_store_error)?
        .len()
        .saturating_sub(index.len());
    if hidden > 0 {
        println!("  ({hidden} question(s) hidden: unpublished or without choices)");
    }

    if skip_vote {
        return Ok(());
    }

    let featured = &index[0].question;
    let detail = service.detail(featured.id)?;
    let Some(choice) = detail.choices.first() else {
        return Ok(());
    };

    println!(
        "\nVoting for \"{}\" on \"{}\"",
        choice.choice_text, featured.question_text
    );
    let results = service.vote(featured.id, choice.id)?;
    render_results(&results);
    Ok(())
}

fn render_results(results: &QuestionDetail) {
    println!("Results ({} total)", results.total_votes());
    for choice in &results.choices {
        let plural = if choice.votes == 1 { "" } else { "s" };
        println!("- {} -- {} vote{}", choice.choice_text, choice.votes, plural);
    }
    match serde_json::to_string_pretty(results) {
        Ok(json) => println!("Results payload:\n{}", json),
        Err(err) => println!("Results payload unavailable: {}", err),
    }
}

fn demo_store_error(err: StoreError) -> AppError {
    AppError::Poll(err.into())
}

/// Tutorial-style fixtures: one fresh question, one older, one scheduled, one without choices.
fn seed_sample_questions<S>(store: &S, now: DateTime<Utc>) -> Result<(), StoreError>
where
    S: QuestionStore + ?Sized,
{
    let fixtures: [(&str, Duration, &[&str]); 4] = [
        ("What's up?", Duration::hours(2), &["Not much", "The sky", "Just hacking again"]),
        ("Tabs or spaces?", Duration::days(30), &["Tabs", "Spaces"]),
        ("Launch-day lunch?", -Duration::days(5), &["Pizza", "Tacos"]),
        ("Draft: favourite colour?", Duration::days(1), &[]),
    ];

    for (text, age, choices) in fixtures {
        store.insert_question_with_choices(
            NewQuestion {
                question_text: text.to_string(),
                pub_date: now - age,
            },
            choices.iter().map(|choice| choice.to_string()).collect(),
        )?;
    }
    Ok(())
}
