// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use chrono::NaiveDate;
use ratatui::crossterm::event::{self, Event as TermEvent, KeyEventKind};
use slate_core::{Event, EventDraft, Planner};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_editor::EventEditor;
use crate::tui::event_store::EventStore;

/// Opens the editor with a fresh schedule and returns the draft, or `None`
/// if the user cancelled.
pub fn draft_event(
    planner: &Planner,
    date: Option<NaiveDate>,
) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let store = EventStore::new_by_schedule(planner.default_schedule(date));
    match run_event_editor("New Event", store)? {
        Some(store) => store.submit_draft().map(Some),
        None => Ok(None),
    }
}

/// Opens the editor prefilled from an existing event and returns the draft,
/// or `None` if the user cancelled.
pub fn patch_event(event: &impl Event) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let store = EventStore::new_by_event(event);
    match run_event_editor("Edit Event", store)? {
        Some(store) => store.submit_draft().map(Some),
        None => Ok(None),
    }
}

fn run_event_editor(
    title: &str,
    store: EventStore,
) -> Result<Option<EventStore>, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut dispatcher = Dispatcher::new();
    EventStore::register_to(store.clone(), &mut dispatcher);

    let mut editor = EventEditor::new(title);
    editor.activate(&mut dispatcher, &store);

    let mut terminal = ratatui::init();
    let submitted = loop {
        let mut area = terminal.get_frame().area();
        let draw = terminal.draw(|frame| {
            area = frame.area();
            editor.render(&store, area, frame.buffer_mut());
            if let Some(position) = editor.get_cursor_position(&store, area) {
                frame.set_cursor_position(position);
            }
        });
        if let Err(e) = draw {
            ratatui::restore();
            return Err(e.into());
        }

        let ev = match event::read() {
            Ok(ev) => ev,
            Err(e) => {
                ratatui::restore();
                return Err(e.into());
            }
        };
        if let TermEvent::Key(key) = ev
            && key.kind == KeyEventKind::Press
        {
            match editor.on_key(&mut dispatcher, &store, area, key.code) {
                Some(Message::Submit) => break true,
                Some(Message::Cancel) => break false,
                _ => {}
            }
        }
    };
    ratatui::restore();

    editor.deactivate(&mut dispatcher, &store);
    drop(dispatcher); // release the registered callback's clone of the store

    let store = Rc::try_unwrap(store)
        .map_err(|_| "event store is still referenced")?
        .into_inner();
    Ok(submitted.then_some(store))
}
