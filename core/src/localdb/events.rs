// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};

use crate::{Event, EventCategory, EventConditions, EventDraft, Pager};

/// Stable storage format for start/end timestamps. Lexicographic order on
/// the stored strings matches chronological order, so the queries below can
/// compare them directly.
const STABLE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone)]
pub(crate) struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &EventRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (uid, title, description, location, category, all_day, start_at, end_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&event.uid)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(&event.category)
            .bind(event.all_day)
            .bind(&event.start_at)
            .bind(&event.end_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Updates an existing event. Returns false if no row has this uid.
    pub async fn update(&self, event: &EventRecord) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE events SET
    title       = ?,
    description = ?,
    location    = ?,
    category    = ?,
    all_day     = ?,
    start_at    = ?,
    end_at      = ?
WHERE uid = ?;
";

        let result = sqlx::query(SQL)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(&event.category)
            .bind(event.all_day)
            .bind(&event.start_at)
            .bind(&event.end_at)
            .bind(&event.uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, uid: &str) -> Result<Option<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT uid, title, description, location, category, all_day, start_at, end_at
FROM events
WHERE uid = ?;
";

        sqlx::query_as(SQL)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(
        &self,
        conds: &EventConditions,
        pager: &Pager,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let mut sql = "\
SELECT uid, title, description, location, category, all_day, start_at, end_at
FROM events
"
        .to_string();
        sql += &Self::build_where(conds);
        sql += "ORDER BY start_at ASC LIMIT ? OFFSET ?;";

        let mut executable = sqlx::query_as(&sql);
        executable = Self::bind_conditions(conds, executable);

        executable
            .bind(pager.limit)
            .bind(pager.offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, conds: &EventConditions) -> Result<i64, sqlx::Error> {
        let mut sql = "SELECT COUNT(*) FROM events".to_string();
        sql += &Self::build_where(conds);
        sql += ";";

        let mut executable = sqlx::query_as(&sql);
        executable = Self::bind_conditions(conds, executable);

        let row: (i64,) = executable.fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    /// Deletes an event. Returns false if no row has this uid.
    pub async fn delete(&self, uid: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM events WHERE uid = ?;";

        let result = sqlx::query(SQL).bind(uid).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    fn build_where(conds: &EventConditions) -> String {
        let mut where_clauses = Vec::new();
        if conds.ending_after.is_some() {
            where_clauses.push("end_at >= ?");
        }
        if conds.starting_before.is_some() {
            where_clauses.push("start_at <= ?");
        }
        if conds.category.is_some() {
            where_clauses.push("category = ?");
        }

        if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {} ", where_clauses.join(" AND "))
        }
    }

    fn bind_conditions<'a, O>(
        conds: &'a EventConditions,
        mut query: QueryAs<'a, Sqlite, O, SqliteArguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, SqliteArguments<'a>> {
        if let Some(ref ending_after) = conds.ending_after {
            query = query.bind(format_stable(ending_after));
        }
        if let Some(ref starting_before) = conds.starting_before {
            query = query.bind(format_stable(starting_before));
        }
        if let Some(category) = conds.category {
            query = query.bind(category.to_string());
        }
        query
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct EventRecord {
    uid: String,
    title: String,
    description: String,
    location: String,
    category: String,
    all_day: bool,
    start_at: String,
    end_at: String,
}

impl EventRecord {
    pub fn from_draft(uid: &str, draft: &EventDraft) -> Self {
        Self {
            uid: uid.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone().unwrap_or_default(),
            location: draft.location.clone().unwrap_or_default(),
            category: draft.category.to_string(),
            all_day: draft.all_day,
            start_at: format_stable(&draft.start),
            end_at: format_stable(&draft.end),
        }
    }
}

impl Event for EventRecord {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }

    fn location(&self) -> Option<&str> {
        (!self.location.is_empty()).then_some(self.location.as_str())
    }

    fn category(&self) -> EventCategory {
        self.category.parse().unwrap_or_default()
    }

    fn all_day(&self) -> bool {
        self.all_day
    }

    fn start(&self) -> Option<NaiveDateTime> {
        parse_stable(&self.start_at)
    }

    fn end(&self) -> Option<NaiveDateTime> {
        parse_stable(&self.end_at)
    }
}

fn format_stable(dt: &NaiveDateTime) -> String {
    dt.format(STABLE_FORMAT).to_string()
}

fn parse_stable(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, STABLE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::localdb::LocalDb;

    async fn setup_test_db() -> LocalDb {
        LocalDb::open(&None)
            .await
            .expect("Failed to create test database")
    }

    fn test_draft(title: &str) -> EventDraft {
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        EventDraft {
            title: title.to_string(),
            description: None,
            location: Some("Main hall".to_string()),
            category: EventCategory::Class,
            all_day: false,
            start: date.and_hms_opt(9, 0, 0).unwrap(),
            end: date.and_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn events_insert_then_get() {
        let db = setup_test_db().await;
        let record = EventRecord::from_draft("event-1", &test_draft("Beginner class"));

        db.events.insert(&record).await.expect("Failed to insert");

        let retrieved = db
            .events
            .get("event-1")
            .await
            .expect("Failed to get event")
            .expect("Event not found");
        assert_eq!(retrieved.uid(), "event-1");
        assert_eq!(retrieved.title(), "Beginner class");
        assert_eq!(retrieved.location(), Some("Main hall"));
        assert_eq!(retrieved.description(), None);
        assert_eq!(retrieved.category(), EventCategory::Class);
    }

    #[tokio::test]
    async fn events_get_returns_none_for_missing_uid() {
        let db = setup_test_db().await;

        let retrieved = db
            .events
            .get("nonexistent")
            .await
            .expect("Failed to get event");
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn events_update_existing() {
        let db = setup_test_db().await;
        let record = EventRecord::from_draft("event-1", &test_draft("Original"));
        db.events.insert(&record).await.expect("Failed to insert");

        let updated = EventRecord::from_draft("event-1", &test_draft("Updated"));
        let found = db.events.update(&updated).await.expect("Failed to update");
        assert!(found);

        let retrieved = db
            .events
            .get("event-1")
            .await
            .expect("Failed to get event")
            .expect("Event not found");
        assert_eq!(retrieved.title(), "Updated");
    }

    #[tokio::test]
    async fn events_update_missing_returns_false() {
        let db = setup_test_db().await;
        let record = EventRecord::from_draft("missing", &test_draft("Anything"));

        let found = db.events.update(&record).await.expect("Failed to update");
        assert!(!found);
    }

    #[tokio::test]
    async fn events_delete() {
        let db = setup_test_db().await;
        let record = EventRecord::from_draft("event-1", &test_draft("Short lived"));
        db.events.insert(&record).await.expect("Failed to insert");

        assert!(db.events.delete("event-1").await.expect("Failed to delete"));
        assert!(!db.events.delete("event-1").await.expect("Failed to delete"));
        assert!(
            db.events
                .get("event-1")
                .await
                .expect("Failed to get event")
                .is_none()
        );
    }

    #[tokio::test]
    async fn events_list_orders_and_filters() {
        let db = setup_test_db().await;
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();

        let mut early = test_draft("Early");
        early.start = date.and_hms_opt(8, 0, 0).unwrap();
        early.end = date.and_hms_opt(9, 0, 0).unwrap();

        let mut late = test_draft("Late");
        late.start = date.and_hms_opt(18, 0, 0).unwrap();
        late.end = date.and_hms_opt(19, 0, 0).unwrap();
        late.category = EventCategory::Meeting;

        for (uid, draft) in [("a", &late), ("b", &early)] {
            let record = EventRecord::from_draft(uid, draft);
            db.events.insert(&record).await.expect("Failed to insert");
        }

        let pager = (10, 0).into();
        let all = db
            .events
            .list(&EventConditions::default(), &pager)
            .await
            .expect("Failed to list");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title(), "Early");
        assert_eq!(all[1].title(), "Late");

        let conds = EventConditions {
            ending_after: Some(date.and_hms_opt(12, 0, 0).unwrap()),
            ..Default::default()
        };
        let upcoming = db.events.list(&conds, &pager).await.expect("Failed to list");
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title(), "Late");

        let conds = EventConditions {
            category: Some(EventCategory::Meeting),
            ..Default::default()
        };
        assert_eq!(db.events.count(&conds).await.expect("Failed to count"), 1);
    }

    #[tokio::test]
    async fn events_start_end_round_trip_exactly() {
        let db = setup_test_db().await;
        let draft = test_draft("Round trip");
        let record = EventRecord::from_draft("event-1", &draft);
        db.events.insert(&record).await.expect("Failed to insert");

        let retrieved = db
            .events
            .get("event-1")
            .await
            .expect("Failed to get event")
            .expect("Event not found");
        assert_eq!(retrieved.start(), Some(draft.start));
        assert_eq!(retrieved.end(), Some(draft.end));
    }
}
