// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use slate_core::{EventCategory, TimeSlot};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: &Action) {
        for sub in &self.subscribers {
            (sub.borrow_mut())(action);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    UpdateEventTitle(String),
    UpdateEventDescription(String),
    UpdateEventLocation(String),
    UpdateEventCategory(EventCategory),
    UpdateEventAllDay(bool),
    UpdateEventStartDate(NaiveDate),
    UpdateEventStartTime(TimeSlot),
    UpdateEventEndDate(NaiveDate),
    UpdateEventEndTime(TimeSlot),
    SubmitChanges,
}
