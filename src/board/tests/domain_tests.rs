//! Validation and mutation tests for tasks and tags.

use crate::board::domain::{
    BoardDomainError, MAX_ORDER, NewTask, OwnerId, Priority, Tag, TagColor, TagId, TagName, Task,
    TaskEdit, TaskStatus, TaskTitle, due_at_noon, order_after, validate_order,
};
use chrono::{NaiveDate, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::str::FromStr;
use uuid::Uuid;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::new_v4())
}

fn titled(title: &str) -> NewTask {
    NewTask::titled(TaskTitle::new(title).expect("valid title"))
}

#[rstest]
fn task_title_is_trimmed() {
    let title = TaskTitle::new("  Write report \n").expect("valid title");
    assert_eq!(title.as_str(), "Write report");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn task_title_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(BoardDomainError::EmptyTaskTitle));
}

#[rstest]
#[case("#1a2B3c")]
#[case("#FFFFFF")]
#[case("#000000")]
fn tag_color_accepts_six_hex_digits(#[case] raw: &str) {
    let color = TagColor::new(raw).expect("valid color");
    assert_eq!(color.as_str(), raw);
}

#[rstest]
#[case("123456")]
#[case("#12345")]
#[case("#1234567")]
#[case("#12345g")]
#[case("red")]
fn tag_color_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(
        TagColor::new(raw),
        Err(BoardDomainError::InvalidTagColor(raw.to_owned()))
    );
}

#[rstest]
fn tag_name_rejects_blank_value() {
    assert_eq!(TagName::new("  "), Err(BoardDomainError::EmptyTagName));
}

#[rstest]
fn tag_relabel_replaces_name_and_color(clock: DefaultClock) {
    let mut tag = Tag::new(
        TagName::new("work").expect("valid name"),
        TagColor::new("#112233").expect("valid color"),
        &clock,
    );
    let id = tag.id();

    tag.relabel(
        TagName::new("home").expect("valid name"),
        TagColor::new("#aabbcc").expect("valid color"),
        &clock,
    );

    assert_eq!(tag.id(), id);
    assert_eq!(tag.name().as_str(), "home");
    assert_eq!(tag.color().as_str(), "#aabbcc");
    assert!(tag.updated_at() >= tag.created_at());
}

#[rstest]
#[case("TODO", TaskStatus::Todo)]
#[case("in_progress", TaskStatus::InProgress)]
#[case(" DONE ", TaskStatus::Done)]
fn task_status_parses_wire_names(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn task_status_rejects_unknown_names() {
    assert!(TaskStatus::try_from("BLOCKED").is_err());
}

#[rstest]
fn task_status_sorts_in_board_order() {
    let mut statuses = vec![TaskStatus::Done, TaskStatus::Todo, TaskStatus::InProgress];
    statuses.sort();
    assert_eq!(statuses, TaskStatus::ALL.to_vec());
}

#[rstest]
fn priority_defaults_to_medium() {
    assert_eq!(Priority::default(), Priority::Medium);
    assert_eq!(Priority::try_from("high"), Ok(Priority::High));
}

#[rstest]
fn validate_order_rejects_negative_values() {
    assert_eq!(validate_order(0), Ok(0));
    assert_eq!(validate_order(-1), Err(BoardDomainError::NegativeOrder(-1)));
}

#[rstest]
fn validate_order_rejects_values_past_the_cap() {
    assert_eq!(validate_order(MAX_ORDER), Ok(MAX_ORDER));
    assert_eq!(
        validate_order(MAX_ORDER + 1),
        Err(BoardDomainError::OrderTooLarge(MAX_ORDER + 1))
    );
}

#[rstest]
fn order_after_appends_or_reports_a_full_column() {
    assert_eq!(order_after(None), Ok(0));
    assert_eq!(order_after(Some(4)), Ok(5));
    assert_eq!(
        order_after(Some(i64::MAX)),
        Err(BoardDomainError::ColumnFull(i64::MAX))
    );
}

#[rstest]
fn due_at_noon_normalises_time_of_day() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
    let due = due_at_noon(date).expect("noon exists");
    assert_eq!(
        due,
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("unambiguous instant")
    );
}

#[rstest]
fn owner_id_parses_uuid_strings() {
    let uuid = Uuid::new_v4();
    let parsed = OwnerId::from_str(&uuid.to_string()).expect("valid owner id");
    assert_eq!(parsed.into_inner(), uuid);
    assert!(matches!(
        OwnerId::from_str("not-a-uuid"),
        Err(BoardDomainError::InvalidOwnerId(_))
    ));
}

#[rstest]
fn task_create_starts_in_todo(clock: DefaultClock, owner: OwnerId) {
    let mut new_task = titled("Plan sprint");
    new_task.description = Some("   ".to_owned());
    new_task.category = Some("work".to_owned());

    let task = Task::create(owner, new_task, 3, &clock).expect("task should be created");

    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.order(), 3);
    assert_eq!(task.priority(), Priority::Medium);
    assert_eq!(task.description(), None);
    assert_eq!(task.category(), Some("work"));
    assert!(!task.completed());
    assert!(task.is_owned_by(owner));
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn task_create_rejects_negative_order(clock: DefaultClock, owner: OwnerId) {
    let result = Task::create(owner, titled("Plan sprint"), -2, &clock);
    assert_eq!(result, Err(BoardDomainError::NegativeOrder(-2)));
}

#[rstest]
fn apply_edit_touches_only_supplied_fields(clock: DefaultClock, owner: OwnerId) {
    let mut new_task = titled("Plan sprint");
    new_task.description = Some("Initial".to_owned());
    new_task.category = Some("work".to_owned());
    let mut task = Task::create(owner, new_task, 0, &clock).expect("task should be created");

    let tag = TagId::new();
    task.apply_edit(
        TaskEdit {
            category: Some(String::new()),
            completed: Some(true),
            tag_ids: Some([tag].into_iter().collect()),
            ..TaskEdit::default()
        },
        &clock,
    );

    assert_eq!(task.title().as_str(), "Plan sprint");
    assert_eq!(task.description(), Some("Initial"));
    assert_eq!(task.category(), None);
    assert!(task.completed());
    assert_eq!(task.status(), TaskStatus::Todo);
    assert!(task.tag_ids().contains(&tag));
}

#[rstest]
fn empty_edit_is_detected() {
    assert!(TaskEdit::default().is_empty());
    let edit = TaskEdit {
        completed: Some(false),
        ..TaskEdit::default()
    };
    assert!(!edit.is_empty());
}

#[rstest]
fn place_sets_status_and_order(clock: DefaultClock, owner: OwnerId) {
    let mut task = Task::create(owner, titled("Ship"), 0, &clock).expect("task should be created");

    task.place(TaskStatus::Done, 4, &clock).expect("valid placement");

    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.order(), 4);
    assert_eq!(
        task.place(TaskStatus::Todo, -1, &clock),
        Err(BoardDomainError::NegativeOrder(-1))
    );
    assert_eq!(task.status(), TaskStatus::Done);
}

#[rstest]
fn detach_tag_reports_presence(clock: DefaultClock, owner: OwnerId) {
    let tag = TagId::new();
    let mut new_task = titled("Tagged");
    new_task.tag_ids.insert(tag);
    let mut task = Task::create(owner, new_task, 0, &clock).expect("task should be created");

    assert!(task.detach_tag(tag));
    assert!(!task.detach_tag(tag));
    assert!(task.tag_ids().is_empty());
}
