// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Local, NaiveDate};
use tokio::fs;
use uuid::Uuid;

use crate::localdb::{EventRecord, LocalDb};
use crate::{Config, Event, EventConditions, EventDraft, Pager, Schedule};

/// Slate planner application core.
#[derive(Debug, Clone)]
pub struct Planner {
    config: Config,
    db: LocalDb,
}

impl Planner {
    /// Creates a new planner instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(&config.state_dir)
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self { config, db })
    }

    /// Create a default schedule for fresh event drafts. Starts on `date`
    /// (today when `None`) at the configured start slot.
    pub fn default_schedule(&self, date: Option<NaiveDate>) -> Schedule {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        Schedule::with_defaults(
            date,
            self.config.default_start(),
            self.config.default_duration_slots(),
        )
    }

    /// Add a new event from the given draft.
    pub async fn new_event(
        &self,
        draft: &EventDraft,
    ) -> Result<impl Event + 'static, Box<dyn Error>> {
        let uid = Uuid::new_v4().to_string();
        let record = EventRecord::from_draft(&uid, draft);
        self.db
            .events
            .insert(&record)
            .await
            .map_err(|e| format!("Failed to insert event: {e}"))?;
        Ok(record)
    }

    /// Replace the stored event with the given uid by the draft.
    pub async fn update_event(
        &self,
        uid: &str,
        draft: &EventDraft,
    ) -> Result<impl Event + 'static, Box<dyn Error>> {
        let record = EventRecord::from_draft(uid, draft);
        let found = self
            .db
            .events
            .update(&record)
            .await
            .map_err(|e| format!("Failed to update event: {e}"))?;

        if !found {
            return Err("Event not found".into());
        }
        Ok(record)
    }

    /// Get an event by its uid.
    pub async fn get_event(&self, uid: &str) -> Result<impl Event + 'static, Box<dyn Error>> {
        match self.db.events.get(uid).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => Err("Event not found".into()),
            Err(e) => Err(e.into()),
        }
    }

    /// List events matching the given conditions, ordered by start time.
    pub async fn list_events(
        &self,
        conds: &EventConditions,
        pager: &Pager,
    ) -> Result<Vec<impl Event + 'static>, Box<dyn Error>> {
        let events = self.db.events.list(conds, pager).await?;
        Ok(events)
    }

    /// Counts the number of events matching the given conditions.
    pub async fn count_events(&self, conds: &EventConditions) -> Result<i64, sqlx::Error> {
        self.db.events.count(conds).await
    }

    /// Delete an event by its uid.
    pub async fn delete_event(&self, uid: &str) -> Result<(), Box<dyn Error>> {
        let found = self
            .db
            .events
            .delete(uid)
            .await
            .map_err(|e| format!("Failed to delete event: {e}"))?;

        if !found {
            return Err("Event not found".into());
        }
        Ok(())
    }

    /// Close the planner instance, saving any changes to the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
