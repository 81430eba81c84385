// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::{Duration, NaiveDate};
use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use slate_core::TimeSlot;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{byte_range_of_grapheme_at, unicode_width_of_slice};

pub struct Form<S> {
    items: Vec<Box<dyn FormItem<S>>>,
    item_index: usize,
}

impl<S> Form<S> {
    pub fn new(items: Vec<Box<dyn FormItem<S>>>) -> Self {
        Self {
            items,
            item_index: 0,
        }
    }

    fn layout(&self, store: &Rc<RefCell<S>>) -> Layout {
        Layout::vertical(self.items.iter().map(|item| match item.item_state(store) {
            FormItemState::Invisible => Constraint::Max(0),
            _ => Constraint::Max(3),
        }))
        .margin(1)
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>, offset: isize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        // move to the next/previous item, skipping invisible items
        let len = self.items.len();
        let mut new_index = self.item_index;
        let mut steps = offset.unsigned_abs();

        while steps > 0 {
            if offset > 0 {
                new_index = (new_index + 1) % len;
            } else {
                new_index = (new_index + len - 1) % len;
            }

            if let Some(item) = self.items.get(new_index)
                && item_is_visible(item, store)
            {
                steps -= 1;
            } else if new_index == self.item_index {
                // no other visible item
                break;
            }
        }

        self.item_index = new_index;

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S> Component<S> for Form<S> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout(store).split(area);
        let mut is_last = true;
        for (item, area) in self.items.iter().zip(areas.iter()).rev() {
            // reverse order to draw the last visible item with the closing sider
            if item_is_visible(item, store) {
                item_render(is_last, item.as_ref(), store, *area, buf);
                item.render(store, item_inner(*area), buf);
                is_last = false;
            }
        }
    }

    fn get_cursor_position(&self, store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.items
            .iter()
            .zip(self.layout(store).split(area).iter())
            .take(self.item_index + 1)
            .last()
            .and_then(|(comp, area)| comp.get_cursor_position(store, *area))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        let areas = self.layout(store).split(area);
        if let Some((comp, subarea)) = self
            .items
            .iter_mut()
            .zip(areas.iter())
            .take(self.item_index + 1)
            .last()
            && let Some(msg) = comp.on_key(dispatcher, store, *subarea, key)
        {
            return Some(msg);
        };

        match key {
            KeyCode::Up | KeyCode::BackTab if self.item_index > 0 => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if self.item_index < self.items.len() - 1 => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(&Action::SubmitChanges);
                Some(Message::Submit)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self, store: &Rc<RefCell<S>>) -> &str;
    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState;
}

pub enum FormItemState {
    /// The component is currently active (focused).
    Active,

    /// The component is currently inactive (not focused).
    Inactive,

    /// The component is hidden and skipped by navigation.
    Invisible,
}

/// Typed access of a form item to a field of the store. Reads go straight
/// to the store, writes go through the dispatcher.
pub trait Access<S, T: ToOwned> {
    fn get(store: &Rc<RefCell<S>>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T) -> bool;

    /// Whether the item is visible. By default, all items are visible.
    fn visible(_store: &Rc<RefCell<S>>) -> bool {
        true
    }
}

fn access_state<S, T: ToOwned, A: Access<S, T>>(
    active: bool,
    store: &Rc<RefCell<S>>,
) -> FormItemState {
    if !A::visible(store) {
        FormItemState::Invisible
    } else if active {
        FormItemState::Active
    } else {
        FormItemState::Inactive
    }
}

#[derive(Debug)]
pub struct Input<S, A: Access<S, String>> {
    title: String,
    active: bool,
    character_index: usize,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            character_index: 0,
            _phantom_a: std::marker::PhantomData,
            _phantom_s: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let width = unicode_width_of_slice(v.as_str(), self.character_index);
        let x = area.x + (width as u16) + 2; // sider 1 + padding 1
        let y = area.y + 1; // title line: 1
        Some((x, y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active || !matches!(key, Left | Right | Backspace | Char(_)) {
            return None;
        }

        match key {
            Left if self.character_index > 0 => self.character_index -= 1,
            Right if self.character_index < A::get(store).chars().count() => {
                self.character_index += 1
            }
            Backspace if self.character_index > 0 => {
                let mut v = A::get(store);
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    if A::set(dispatcher, v) {
                        self.character_index -= 1;
                    }
                }
            }
            Char(c) => {
                let mut v = A::get(store);
                let byte_index = v
                    .char_indices()
                    .nth(self.character_index)
                    .map(|(i, _)| i)
                    .unwrap_or(v.len());
                v.insert(byte_index, c);
                if A::set(dispatcher, v) {
                    self.character_index += 1;
                }
            }
            _ => {}
        };

        // Always update the cursor position for simplicity
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &Rc<RefCell<S>>) {
        self.active = true;
        self.character_index = A::get(store).chars().count();
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = false;
        self.character_index = 0;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self, _store: &Rc<RefCell<S>>) -> &str {
        &self.title
    }

    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState {
        access_state::<S, String, A>(self.active, store)
    }
}

#[derive(Debug)]
pub struct RadioGroup<S, T: Eq + Clone, A: Access<S, T>> {
    title: String,
    values: Vec<T>,
    options: Vec<String>,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, T: Eq + Clone, A: Access<S, T>> RadioGroup<S, T, A> {
    pub fn new(title: impl ToString, values: Vec<T>, options: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            values,
            options,
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_a: std::marker::PhantomData,
        }
    }

    fn selected(&self, store: &Rc<RefCell<S>>) -> usize {
        let v = A::get(store);
        self.values.iter().position(|s| s == &v).unwrap_or(0)
    }

    fn layout(&self) -> Layout {
        let constraints = self
            .options
            .iter()
            // 6 = sider (1) + marker [ ] (3) + space (1) + gap (1)
            .map(|s| Constraint::Min(6 + s.width() as u16));

        Layout::horizontal(constraints)
    }
}

impl<S, T: Eq + Clone, A: Access<S, T>> Component<S> for RadioGroup<S, T, A> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        for (i, (value, area)) in self.options.iter().zip(areas.iter()).enumerate() {
            let icon = if self.selected(store) == i { 'x' } else { ' ' };
            let label = format!("[{icon}] {value}");
            Paragraph::new(label).render(*area, buf);
        }
    }

    fn get_cursor_position(&self, store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.layout()
            .split(item_inner(area))
            .get(self.selected(store))
            .map(|area| (area.x + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        match key {
            KeyCode::Left | KeyCode::Right => {
                let offset = match key {
                    KeyCode::Left => self.values.len() - 1,
                    _ => 1,
                };
                let index = (self.selected(store) + offset) % self.values.len();
                match self.values.get(index) {
                    Some(a) => {
                        A::set(dispatcher, a.to_owned());
                        Some(Message::CursorUpdated)
                    }
                    None => Some(Message::Handled),
                }
            }
            _ => None,
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = false;
    }
}

impl<S, T: Eq + Clone, A: Access<S, T>> FormItem<S> for RadioGroup<S, T, A> {
    fn item_title(&self, _store: &Rc<RefCell<S>>) -> &str {
        &self.title
    }

    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState {
        access_state::<S, T, A>(self.active, store)
    }
}

#[derive(Debug)]
pub struct Checkbox<S, A: Access<S, bool>> {
    title: String,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, A: Access<S, bool>> Checkbox<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_a: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, bool>> Component<S> for Checkbox<S, A> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let icon = if A::get(store) { 'x' } else { ' ' };
        Paragraph::new(format!("[{icon}]")).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.active.then(|| {
            let inner = item_inner(area);
            (inner.x + 1, inner.y)
        })
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        match key {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                A::set(dispatcher, !A::get(store));
                Some(Message::CursorUpdated)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = false;
    }
}

impl<S, A: Access<S, bool>> FormItem<S> for Checkbox<S, A> {
    fn item_title(&self, _store: &Rc<RefCell<S>>) -> &str {
        &self.title
    }

    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState {
        access_state::<S, bool, A>(self.active, store)
    }
}

/// A date stepper. Left/Right move the date one day at a time, so the
/// store only ever sees valid dates.
#[derive(Debug)]
pub struct DateField<S, A: Access<S, NaiveDate>> {
    title: String,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, A: Access<S, NaiveDate>> DateField<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_a: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, NaiveDate>> Component<S> for DateField<S, A> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        let label = if self.active {
            format!("< {} >", v.format("%Y-%m-%d (%a)"))
        } else {
            format!("  {}  ", v.format("%Y-%m-%d (%a)"))
        };
        Paragraph::new(label).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.active.then(|| {
            let inner = item_inner(area);
            (inner.x, inner.y)
        })
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let offset = match key {
            KeyCode::Left => Duration::days(-1),
            KeyCode::Right => Duration::days(1),
            _ => return None,
        };
        A::set(dispatcher, A::get(store) + offset);
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = false;
    }
}

impl<S, A: Access<S, NaiveDate>> FormItem<S> for DateField<S, A> {
    fn item_title(&self, _store: &Rc<RefCell<S>>) -> &str {
        &self.title
    }

    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState {
        access_state::<S, NaiveDate, A>(self.active, store)
    }
}

/// A time stepper over the half-hour grid. Left/Right move one slot,
/// saturating at the edges of the day.
#[derive(Debug)]
pub struct SlotField<S, A: Access<S, TimeSlot>> {
    title: String,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, A: Access<S, TimeSlot>> SlotField<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_a: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, TimeSlot>> Component<S> for SlotField<S, A> {
    fn render(&self, store: &Rc<RefCell<S>>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        let label = if self.active {
            format!("< {v} >")
        } else {
            format!("  {v}  ")
        };
        Paragraph::new(label).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &Rc<RefCell<S>>, area: Rect) -> Option<(u16, u16)> {
        self.active.then(|| {
            let inner = item_inner(area);
            (inner.x, inner.y)
        })
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<S>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let next = match key {
            KeyCode::Left => v.saturating_sub(1),
            KeyCode::Right => v.saturating_add(1),
            _ => return None,
        };
        if next != v {
            A::set(dispatcher, next);
        }
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &Rc<RefCell<S>>) {
        self.active = false;
    }
}

impl<S, A: Access<S, TimeSlot>> FormItem<S> for SlotField<S, A> {
    fn item_title(&self, _store: &Rc<RefCell<S>>) -> &str {
        &self.title
    }

    fn item_state(&self, store: &Rc<RefCell<S>>) -> FormItemState {
        access_state::<S, TimeSlot, A>(self.active, store)
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";

const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(
    is_last: bool,
    item: &dyn FormItem<S>,
    store: &Rc<RefCell<S>>,
    area: Rect,
    buf: &mut Buffer,
) {
    let color = match item.item_state(store) {
        FormItemState::Active => Color::Blue,
        FormItemState::Inactive => Color::Gray,
        FormItemState::Invisible => return,
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title(store))
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        let symbol = match item.item_state(store) {
            FormItemState::Active => S_STEP_ACTIVE,
            _ => S_STEP_INACTIVE,
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn item_is_visible<S>(item: &Box<dyn FormItem<S>>, store: &Rc<RefCell<S>>) -> bool {
    !matches!(item.item_state(store), FormItemState::Invisible)
}
