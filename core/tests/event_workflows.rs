// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event workflow tests against an on-disk database.

use chrono::NaiveDate;

use slate_core::{
    Config, Event, EventCategory, EventConditions, EventDraft, Pager, Planner,
};

fn test_config() -> Config {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    Config {
        state_dir: Some(dir.keep()),
        ..Default::default()
    }
}

fn draft(title: &str, day: u32, hour: u32) -> EventDraft {
    let date = NaiveDate::from_ymd_opt(2026, 9, day).unwrap();
    EventDraft {
        title: title.to_string(),
        description: None,
        location: Some("Main hall".to_string()),
        category: EventCategory::Class,
        all_day: false,
        start: date.and_hms_opt(hour, 0, 0).unwrap(),
        end: date.and_hms_opt(hour + 1, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn events_survive_reopen() {
    let config = test_config();

    let planner = Planner::new(config.clone()).await.unwrap();
    let created = planner.new_event(&draft("Ballet basics", 1, 9)).await.unwrap();
    let uid = created.uid().to_string();
    planner.close().await.unwrap();

    let planner = Planner::new(config).await.unwrap();
    let fetched = planner.get_event(&uid).await.unwrap();
    assert_eq!(fetched.title(), "Ballet basics");
    assert_eq!(fetched.location(), Some("Main hall"));
    planner.close().await.unwrap();
}

#[tokio::test]
async fn update_survives_reopen() {
    let config = test_config();

    let planner = Planner::new(config.clone()).await.unwrap();
    let created = planner.new_event(&draft("Rehearsal", 2, 14)).await.unwrap();
    let uid = created.uid().to_string();

    let mut patched = draft("Dress rehearsal", 3, 16);
    patched.category = EventCategory::Competition;
    planner.update_event(&uid, &patched).await.unwrap();
    planner.close().await.unwrap();

    let planner = Planner::new(config).await.unwrap();
    let fetched = planner.get_event(&uid).await.unwrap();
    assert_eq!(fetched.title(), "Dress rehearsal");
    assert_eq!(fetched.category(), EventCategory::Competition);
    assert_eq!(fetched.start(), Some(patched.start));
    planner.close().await.unwrap();
}

#[tokio::test]
async fn listing_is_ordered_and_paged() {
    let planner = Planner::new(test_config()).await.unwrap();

    planner.new_event(&draft("Third", 7, 9)).await.unwrap();
    planner.new_event(&draft("First", 3, 9)).await.unwrap();
    planner.new_event(&draft("Second", 5, 9)).await.unwrap();

    let conds = EventConditions::default();
    let events = planner.list_events(&conds, &Pager::from((2, 0))).await.unwrap();
    let titles: Vec<_> = events.iter().map(|e| e.title().to_string()).collect();
    assert_eq!(titles, ["First", "Second"]);

    let rest = planner.list_events(&conds, &Pager::from((2, 2))).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].title(), "Third");

    assert_eq!(planner.count_events(&conds).await.unwrap(), 3);
    planner.close().await.unwrap();
}
