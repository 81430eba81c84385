// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

mod config;
mod event;
mod localdb;
mod planner;
mod schedule;
mod timeslot;
mod types;

pub use crate::config::{APP_NAME, Config};
pub use crate::event::{Event, EventCategory, EventConditions, EventDraft};
pub use crate::planner::Planner;
pub use crate::schedule::Schedule;
pub use crate::timeslot::TimeSlot;
pub use crate::types::Pager;
