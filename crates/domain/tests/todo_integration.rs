//! Integration tests: item lifecycle and the events it raises.

use common::TodoListId;
use domain::{
    Colour, DomainEvent, EventKind, HasDomainEvents, PriorityLevel, TodoItem, TodoList,
};

fn kinds(events: &[DomainEvent]) -> Vec<EventKind> {
    events.iter().map(DomainEvent::kind).collect()
}

#[test]
fn test_full_item_lifecycle_raises_each_event_once() {
    let list = TodoList::create("Garden").unwrap();
    let mut item = TodoItem::create(list.id(), "Mow the lawn").unwrap();

    item.rename("Mow the back lawn").unwrap();
    item.update_details(list.id(), PriorityLevel::Medium, Some("before rain".into()));
    assert!(item.mark_complete());
    assert!(!item.mark_complete());
    item.mark_incomplete();
    assert!(item.set_done(true));
    assert!(item.delete());
    assert!(!item.delete());

    assert_eq!(
        kinds(item.domain_events()),
        vec![
            EventKind::TodoItemCreated,
            EventKind::TodoItemCompleted,
            EventKind::TodoItemCompleted,
            EventKind::TodoItemDeleted,
        ]
    );
}

#[test]
fn test_events_carry_item_snapshot() {
    let list_id = TodoListId::new();
    let mut item = TodoItem::create(list_id, "Water plants").unwrap();
    item.rename("Water tomatoes").unwrap();
    item.mark_complete();

    let events = item.take_domain_events();
    let DomainEvent::TodoItemCompleted(completed) = &events[1] else {
        panic!("expected a completed event, got {:?}", events[1].kind());
    };

    assert_eq!(completed.item_id, item.id());
    assert_eq!(completed.list_id, list_id);
    assert_eq!(completed.title, "Water tomatoes");
    assert!(events[0].occurred_at() <= events[1].occurred_at());
    assert_ne!(events[0].event_id(), events[1].event_id());
}

#[test]
fn test_draining_leaves_queue_empty() {
    let mut item = TodoItem::create(TodoListId::new(), "Prune roses").unwrap();

    assert_eq!(item.take_domain_events().len(), 1);
    assert!(item.domain_events().is_empty());
    assert!(item.take_domain_events().is_empty());
}

#[test]
fn test_serialized_item_has_no_events() {
    let mut item = TodoItem::create(TodoListId::new(), "Rake leaves").unwrap();
    item.mark_complete();

    let json = serde_json::to_string(&item).unwrap();
    let restored: TodoItem = serde_json::from_str(&json).unwrap();

    assert!(restored.is_done());
    assert_eq!(restored.title(), "Rake leaves");
    assert!(restored.domain_events().is_empty());
}

#[test]
fn test_list_round_trips_colour_code() {
    let mut list = TodoList::create("Garden").unwrap();
    list.set_colour(Colour::Green);

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["colour"], "#CCFF99");

    let restored: TodoList = serde_json::from_value(json).unwrap();
    assert_eq!(restored, list);
}
