// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, ops::Deref, rc::Rc};

use chrono::Local;
use slate_core::{Event, EventCategory, EventDraft, Schedule};

use crate::tui::dispatcher::{Action, Dispatcher};

pub trait EventStoreLike {
    type Output<'a>: Deref<Target = EventStore>
    where
        Self: 'a;

    fn event<'a>(&'a self) -> Self::Output<'a>;
}

/// The editor state behind the event form. Date and time updates are routed
/// through the [`Schedule`] so the end keeps following the start until the
/// user touches it.
#[derive(Debug)]
pub struct EventStore {
    pub data: EventData,
}

impl EventStore {
    pub fn new_by_schedule(schedule: Schedule) -> Self {
        Self {
            data: EventData {
                title: String::new(),
                description: String::new(),
                location: String::new(),
                category: EventCategory::default(),
                all_day: false,
                schedule,
            },
        }
    }

    pub fn new_by_event(event: &impl Event) -> Self {
        let schedule = match (event.start(), event.end()) {
            (Some(start), Some(end)) => Schedule::from_times(start, end),
            _ => Schedule::new(Local::now().date_naive()),
        };

        Self {
            data: EventData {
                title: event.title().to_string(),
                description: event.description().unwrap_or_default().to_string(),
                location: event.location().unwrap_or_default().to_string(),
                category: event.category(),
                all_day: event.all_day(),
                schedule,
            },
        }
    }

    /// Builds the draft handed to the planner. Rejects an empty title and an
    /// end before the start, leaving the editor state untouched for another
    /// round of editing.
    pub fn submit_draft(&self) -> Result<EventDraft, Box<dyn Error>> {
        if self.data.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }

        let (start, end) = if self.data.all_day {
            // all-day events span whole days, slot times are not shown
            let start = self.data.schedule.start_date().and_time(chrono::NaiveTime::MIN);
            let end = self.data.schedule.end_date().and_time(chrono::NaiveTime::MIN);
            (start, end)
        } else {
            (self.data.schedule.start(), self.data.schedule.end())
        };

        if end < start {
            return Err("End must not precede start".into());
        }

        let description = self.data.description.trim();
        let location = self.data.location.trim();
        Ok(EventDraft {
            title: self.data.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            location: (!location.is_empty()).then(|| location.to_string()),
            category: self.data.category,
            all_day: self.data.all_day,
            start,
            end,
        })
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| match action {
            Action::UpdateEventTitle(v) => {
                that.borrow_mut().data.title = v.clone();
            }
            Action::UpdateEventDescription(v) => {
                that.borrow_mut().data.description = v.clone();
            }
            Action::UpdateEventLocation(v) => {
                that.borrow_mut().data.location = v.clone();
            }
            Action::UpdateEventCategory(v) => {
                that.borrow_mut().data.category = *v;
            }
            Action::UpdateEventAllDay(v) => {
                that.borrow_mut().data.all_day = *v;
            }
            Action::UpdateEventStartDate(v) => {
                that.borrow_mut().data.schedule.set_start_date(*v);
            }
            Action::UpdateEventStartTime(v) => {
                that.borrow_mut().data.schedule.set_start_time(*v);
            }
            Action::UpdateEventEndDate(v) => {
                that.borrow_mut().data.schedule.set_end_date(*v);
            }
            Action::UpdateEventEndTime(v) => {
                that.borrow_mut().data.schedule.set_end_time(*v);
            }
            Action::SubmitChanges => {}
        }));
        dispatcher.register(callback);
    }
}

impl EventStoreLike for EventStore {
    type Output<'a> = &'a EventStore;

    fn event(&self) -> &EventStore {
        self
    }
}

#[derive(Debug)]
pub struct EventData {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: EventCategory,
    pub all_day: bool,
    pub schedule: Schedule,
}
