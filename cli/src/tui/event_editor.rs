// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;
use slate_core::{EventCategory, TimeSlot};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{
    Access, Checkbox, DateField, Form, Input, RadioGroup, SlotField,
};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventStoreLike;

pub struct EventEditor<S: EventStoreLike>(SinglePage<S, EventForm<S>>);

impl<S: EventStoreLike + 'static> EventEditor<S> {
    pub fn new(title: impl ToString) -> Self {
        Self(SinglePage::new(title.to_string(), EventForm::new()))
    }
}

impl<S: EventStoreLike> Component<S> for EventEditor<S> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, key)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        self.0.deactivate(dispatcher, store);
    }
}

pub struct EventForm<S: EventStoreLike>(Form<S>);

impl<S: EventStoreLike + 'static> EventForm<S> {
    pub fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_title()),
            Box::new(new_all_day()),
            Box::new(new_start_date()),
            Box::new(new_start_time()),
            Box::new(new_end_date()),
            Box::new(new_end_time()),
            Box::new(new_category()),
            Box::new(new_location()),
            Box::new(new_description()),
        ]))
    }
}

impl<S: EventStoreLike> Component<S> for EventForm<S> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, key)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        self.0.deactivate(dispatcher, store);
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn<S: EventStoreLike>() -> Input<S, $acc> {
            Input::new($title.to_string())
        }

        struct $acc;

        impl<S: EventStoreLike> Access<S, String> for $acc {
            fn get(store: &Rc<RefCell<S>>) -> String {
                store.borrow().event().data.$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(&Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_title, "Title", TitleAccess, title, UpdateEventTitle);
new_input!(
    new_location,
    "Location",
    LocationAccess,
    location,
    UpdateEventLocation
);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    UpdateEventDescription
);

fn new_all_day<S: EventStoreLike>() -> Checkbox<S, AllDayAccess> {
    Checkbox::new("All day".to_string())
}

struct AllDayAccess;

impl<S: EventStoreLike> Access<S, bool> for AllDayAccess {
    fn get(store: &Rc<RefCell<S>>) -> bool {
        store.borrow().event().data.all_day
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(&Action::UpdateEventAllDay(value));
        true
    }
}

fn new_category<S: EventStoreLike>() -> RadioGroup<S, EventCategory, CategoryAccess> {
    let values = EventCategory::ALL.to_vec();
    let options = values.iter().map(ToString::to_string).collect();
    RadioGroup::new("Category".to_string(), values, options)
}

struct CategoryAccess;

impl<S: EventStoreLike> Access<S, EventCategory> for CategoryAccess {
    fn get(store: &Rc<RefCell<S>>) -> EventCategory {
        store.borrow().event().data.category
    }

    fn set(dispatcher: &mut Dispatcher, value: EventCategory) -> bool {
        dispatcher.dispatch(&Action::UpdateEventCategory(value));
        true
    }
}

macro_rules! new_date_field {
    ($fn: ident, $title:expr, $acc: ident, $getter: ident, $action: ident) => {
        fn $fn<S: EventStoreLike>() -> DateField<S, $acc> {
            DateField::new($title.to_string())
        }

        struct $acc;

        impl<S: EventStoreLike> Access<S, NaiveDate> for $acc {
            fn get(store: &Rc<RefCell<S>>) -> NaiveDate {
                store.borrow().event().data.schedule.$getter()
            }

            fn set(dispatcher: &mut Dispatcher, value: NaiveDate) -> bool {
                dispatcher.dispatch(&Action::$action(value));
                true
            }
        }
    };
}

new_date_field!(
    new_start_date,
    "Start date",
    StartDateAccess,
    start_date,
    UpdateEventStartDate
);
new_date_field!(
    new_end_date,
    "End date",
    EndDateAccess,
    end_date,
    UpdateEventEndDate
);

macro_rules! new_slot_field {
    ($fn: ident, $title:expr, $acc: ident, $getter: ident, $action: ident) => {
        fn $fn<S: EventStoreLike>() -> SlotField<S, $acc> {
            SlotField::new($title.to_string())
        }

        struct $acc;

        impl<S: EventStoreLike> Access<S, TimeSlot> for $acc {
            fn get(store: &Rc<RefCell<S>>) -> TimeSlot {
                store.borrow().event().data.schedule.$getter()
            }

            fn set(dispatcher: &mut Dispatcher, value: TimeSlot) -> bool {
                dispatcher.dispatch(&Action::$action(value));
                true
            }

            // slot times make no sense for all-day events
            fn visible(store: &Rc<RefCell<S>>) -> bool {
                !store.borrow().event().data.all_day
            }
        }
    };
}

new_slot_field!(
    new_start_time,
    "Start time",
    StartTimeAccess,
    start_time,
    UpdateEventStartTime
);
new_slot_field!(
    new_end_time,
    "End time",
    EndTimeAccess,
    end_time,
    UpdateEventEndTime
);
