use super::common::*;
use chrono::Duration;
use std::sync::Arc;

use crate::polls::domain::{NewQuestion, QuestionId};
use crate::polls::error::PollError;
use crate::polls::query::QueryService;
use crate::polls::store::{InMemoryQuestionStore, QuestionStore, StoreError};

fn query(store: &Arc<InMemoryQuestionStore>) -> QueryService<InMemoryQuestionStore> {
    QueryService::new(store.clone())
}

#[test]
fn list_visible_is_empty_without_questions() {
    let store = Arc::new(InMemoryQuestionStore::new());
    assert!(query(&store).list_visible(now()).expect("list").is_empty());
}

#[test]
fn list_visible_includes_past_question_with_choice() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (question, _) = create_question_with_choice(&store, "Past Question", -30);

    let visible = query(&store).list_visible(now()).expect("list");
    assert_eq!(visible, vec![question]);
}

#[test]
fn list_visible_excludes_questions_without_choices() {
    let store = Arc::new(InMemoryQuestionStore::new());
    create_question(&store, "Past Question", -30);

    assert!(query(&store).list_visible(now()).expect("list").is_empty());
}

#[test]
fn list_visible_excludes_future_questions() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (past, _) = create_question_with_choice(&store, "Past Question", -30);
    create_question_with_choice(&store, "Future Question", 30);
    create_question(&store, "Future Without Choices", 30);

    let visible = query(&store).list_visible(now()).expect("list");
    assert_eq!(visible, vec![past]);
}

#[test]
fn list_visible_orders_most_recent_first() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (older, _) = create_question_with_choice(&store, "Past Question1", -30);
    let (newer, _) = create_question_with_choice(&store, "Past Question2", -5);

    let visible = query(&store).list_visible(now()).expect("list");
    assert_eq!(visible, vec![newer, older]);
}

#[test]
fn list_visible_breaks_pub_date_ties_by_insertion_order() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (first, _) = create_question_with_choice(&store, "First", -2);
    let (second, _) = create_question_with_choice(&store, "Second", -2);
    let (latest, _) = create_question_with_choice(&store, "Latest", -1);

    let visible = query(&store).list_visible(now()).expect("list");
    assert_eq!(visible, vec![latest, first, second]);
}

#[test]
fn question_published_exactly_now_is_visible() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (question, _) = create_question_with_choice(&store, "Right now", 0);

    let service = query(&store);
    assert_eq!(service.list_visible(now()).expect("list"), vec![question.clone()]);
    assert_eq!(
        service
            .get_visible_or_not_found(question.id, now())
            .expect("visible"),
        question
    );
    assert!(matches!(
        service.get_visible_or_not_found(question.id, now() - Duration::seconds(1)),
        Err(PollError::NotFound)
    ));
}

#[test]
fn get_visible_returns_past_question_even_without_choices() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let question = create_question(&store, "Past Question", -30);

    let found = query(&store)
        .get_visible_or_not_found(question.id, now())
        .expect("past question visible");
    assert_eq!(found, question);
}

#[test]
fn get_visible_hides_future_questions_like_missing_ones() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let future = create_question(&store, "Future Question", 5);
    let service = query(&store);

    assert!(store.question(future.id).expect("lookup").is_some());
    assert!(matches!(
        service.get_visible_or_not_found(future.id, now()),
        Err(PollError::NotFound)
    ));
    assert!(matches!(
        service.get_visible_or_not_found(QuestionId(999), now()),
        Err(PollError::NotFound)
    ));
}

#[test]
fn detail_includes_choices_in_creation_order() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let question = store
        .insert_question(NewQuestion {
            question_text: "What's up?".to_string(),
            pub_date: now() - Duration::hours(1),
        })
        .expect("insert");
    store
        .add_choice(question.id, "Not much".to_string())
        .expect("choice");
    store
        .add_choice(question.id, "The sky".to_string())
        .expect("choice");

    let detail = query(&store)
        .detail_visible_or_not_found(question.id, now())
        .expect("detail");
    let texts: Vec<_> = detail
        .choices
        .iter()
        .map(|choice| choice.choice_text.as_str())
        .collect();
    assert_eq!(texts, vec!["Not much", "The sky"]);
    assert_eq!(detail.total_votes(), 0);
}

#[test]
fn store_failures_propagate() {
    let service = QueryService::new(Arc::new(UnavailableStore));
    assert!(matches!(
        service.list_visible(now()),
        Err(PollError::Store(StoreError::Unavailable(_)))
    ));
    assert!(matches!(
        service.get_visible_or_not_found(QuestionId(1), now()),
        Err(PollError::Store(_))
    ));
}

#[test]
fn deleting_a_question_removes_its_choices() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (question, choice) = create_question_with_choice(&store, "Doomed", -1);
    let (survivor, _) = create_question_with_choice(&store, "Survivor", -1);

    assert!(store.delete_question(question.id).expect("delete"));
    assert!(!store.delete_question(question.id).expect("second delete"));
    assert!(store.choices_for(question.id).expect("choices").is_empty());
    assert!(store
        .increment_votes(question.id, choice.id)
        .expect("increment")
        .is_none());
    assert_eq!(query(&store).list_visible(now()).expect("list"), vec![survivor]);
}

#[test]
fn choices_require_an_existing_question() {
    let store = InMemoryQuestionStore::new();
    assert!(matches!(
        store.add_choice(QuestionId(42), "Orphan".to_string()),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn add_votes_applies_the_whole_count_only_to_owned_choices() {
    let store = Arc::new(InMemoryQuestionStore::new());
    let (question, choice) = create_question_with_choice(&store, "Mine", -1);
    let (other, _) = create_question_with_choice(&store, "Theirs", -1);

    let updated = store
        .add_votes(question.id, choice.id, 5)
        .expect("add")
        .expect("owned choice");
    assert_eq!(updated.votes, 5);
    assert!(store
        .add_votes(other.id, choice.id, 5)
        .expect("add")
        .is_none());

    store
        .add_votes(question.id, choice.id, u64::MAX)
        .expect("add");
    assert_eq!(votes_for(&store, question.id), vec![u64::MAX]);
}
