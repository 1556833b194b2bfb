//! Integration tests for the filter, sort, and paginate pipeline.

mod helpers;

use chrono::NaiveDate;

use trafficwise_core::types::{DateRange, FilterSpec, PageRequest, SortField};
use trafficwise_entity::incident::{IncidentStatus, Severity};
use trafficwise_entity::user::UserDraft;
use trafficwise_service::{ListView, RecordStore, filter_records, paginate, sort_records};

use helpers::{actor, ids, incident, incident_store, seeded_session, user};

#[test]
fn test_filter_identity_preserves_order() {
    let store = incident_store();
    let filtered = filter_records(store.as_slice(), &FilterSpec::default());
    assert_eq!(filtered, store.as_slice());
}

#[test]
fn test_filter_conjunction_equals_sequential_filters() {
    let store = incident_store();
    let severity = FilterSpec::new().with_match("severity", "High");
    let status = FilterSpec::new().with_match("status", "Investigating");
    let both = FilterSpec::new()
        .with_match("severity", "High")
        .with_match("status", "Investigating");

    let combined = filter_records(store.as_slice(), &both);
    let sequential = filter_records(&filter_records(store.as_slice(), &severity), &status);
    assert_eq!(combined, sequential);
    assert!(!combined.is_empty());
}

#[test]
fn test_text_and_date_range_conjunction() {
    let store = incident_store();
    let day = NaiveDate::from_ymd_opt(2024, 7, 28);
    let text = FilterSpec::new().with_text("location inc00");
    let range = FilterSpec::new().with_range(DateRange::new(day, day));
    let both = FilterSpec::new()
        .with_text("location inc00")
        .with_range(DateRange::new(day, day));

    assert_eq!(
        filter_records(store.as_slice(), &both),
        filter_records(&filter_records(store.as_slice(), &text), &range)
    );
}

#[test]
fn test_scenario_free_text_finds_alice() {
    let users = vec![user("u1", "Alice", "Admin"), user("u2", "Bob", "Operator")];
    let found = filter_records(&users, &FilterSpec::new().with_text("ali"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_str(), "u1");
}

#[test]
fn test_sort_is_stable_when_repeated() {
    let store = incident_store();
    for sort in [SortField::asc("severity"), SortField::desc("severity")] {
        let once = sort_records(store.as_slice().to_vec(), &sort);
        let twice = sort_records(once.clone(), &sort);
        assert_eq!(ids(&once), ids(&twice));
    }
}

#[test]
fn test_never_logged_in_users_sort_last() {
    let mut session = seeded_session();
    session
        .create_user(
            &actor("Alice Wonderland"),
            UserDraft {
                name: Some("Eve Adams".to_string()),
                email: Some("eve@example.com".to_string()),
                role: Some("Viewer".to_string()),
                status: None,
            },
        )
        .unwrap();

    let expected = [
        (SortField::asc("lastLogin"), ["usr003", "usr004", "usr001", "usr002", "usr005"]),
        (SortField::desc("lastLogin"), ["usr002", "usr001", "usr004", "usr003", "usr005"]),
    ];
    for (sort, expected) in expected {
        let once = sort_records(session.users().as_slice().to_vec(), &sort);
        let twice = sort_records(once.clone(), &sort);
        let once_ids: Vec<&str> = once.iter().map(|user| user.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|user| user.id.as_str()).collect();
        assert_eq!(once_ids, expected);
        assert_eq!(twice_ids, once_ids);
    }
}

#[test]
fn test_cameras_without_live_counts_sort_last() {
    let session = seeded_session();
    let mut view = ListView::new(10);

    view.set_sort(Some(SortField::asc("vehicles")));
    let page = session.list(session.cameras(), &view);
    let order: Vec<u32> = page.items.iter().map(|camera| camera.id.0).collect();
    assert_eq!(order, vec![2, 1, 5, 3, 4, 6]);

    view.set_sort(Some(SortField::desc("vehicles")));
    let page = session.list(session.cameras(), &view);
    let order: Vec<u32> = page.items.iter().map(|camera| camera.id.0).collect();
    assert_eq!(order, vec![3, 5, 1, 2, 4, 6]);
}

#[test]
fn test_sort_toggle_reverses_single_sort() {
    let store = incident_store();
    let mut view = ListView::new(100);
    view.toggle_sort("reportedAt");
    let ascending = view.render(&store).items;
    view.toggle_sort("reportedAt");
    let descending = view.render(&store).items;

    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(ids(&descending), ids(&reversed));
}

#[test]
fn test_scenario_severity_descending() {
    let incidents = vec![
        incident("INC001", Severity::Low, IncidentStatus::Active, 2),
        incident("INC002", Severity::Critical, IncidentStatus::Active, 1),
        incident("INC003", Severity::Medium, IncidentStatus::Active, 3),
    ];
    let sorted = sort_records(incidents, &SortField::desc("severity"));
    let severities: Vec<Severity> = sorted.iter().map(|i| i.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Critical, Severity::Medium, Severity::Low]
    );
}

#[test]
fn test_pagination_covers_every_record_once() {
    let store = incident_store();
    let sorted = sort_records(store.as_slice().to_vec(), &SortField::asc("severity"));
    for page_size in 1..=13 {
        let first = paginate(&sorted, PageRequest::new(1, page_size));
        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            collected.extend(paginate(&sorted, PageRequest::new(page as i64, page_size)).items);
        }
        assert_eq!(ids(&collected), ids(&sorted), "page size {page_size}");
    }
}

#[test]
fn test_pagination_clamps_out_of_range_pages() {
    let store = incident_store();
    let records = store.as_slice();
    let first = paginate(records, PageRequest::new(1, 5));
    let last = paginate(records, PageRequest::new(first.total_pages as i64, 5));

    assert_eq!(paginate(records, PageRequest::new(0, 5)), first);
    assert_eq!(paginate(records, PageRequest::new(-4, 5)), first);
    assert_eq!(paginate(records, PageRequest::new(42, 5)), last);
}

#[test]
fn test_list_view_navigation() {
    let store = incident_store();
    let mut view = ListView::new(5);
    let page = view.render(&store);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 3);

    view.next_page(&page);
    let page = view.render(&store);
    assert_eq!(page.current_page, 2);

    view.set_filter(FilterSpec::new().with_match("severity", "Critical"));
    let page = view.render(&store);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_items, 3);

    view.previous_page(&page);
    assert_eq!(view.page(), 1);
}

#[test]
fn test_empty_store_renders_empty_page() {
    let store = RecordStore::new();
    let page = ListView::new(8).render::<trafficwise_entity::incident::Incident>(&store);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.current_page, 1);
}
