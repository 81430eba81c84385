// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::de;

/// One of the 48 fixed half-hour slots of a day, 00:00 through 23:30.
///
/// All event times are quantized to this grid; there is no finer-grained
/// time anywhere in the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// The first slot of the day, 00:00.
    pub const FIRST: TimeSlot = TimeSlot(0);

    /// The last slot of the day, 23:30.
    pub const LAST: TimeSlot = TimeSlot(47);

    /// Number of slots in a day.
    pub const PER_DAY: u8 = 48;

    /// Number of slots covered by one hour.
    pub const PER_HOUR: u8 = 2;

    /// Creates a slot from its index (0 through 47).
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < Self::PER_DAY {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Creates a slot from a time of day, flooring to the enclosing slot.
    pub fn from_time(time: NaiveTime) -> Self {
        let index = time.hour() * 2 + u32::from(time.minute() >= 30);
        Self(index as u8)
    }

    /// The index of this slot, 0 through 47.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// The hour component, 0 through 23.
    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 2)
    }

    /// The minute component, either 0 or 30.
    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 2) * 30
    }

    /// Converts to a time of day at the start of the slot.
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
            .unwrap_or(NaiveTime::MIN) // index is always in range
    }

    /// Moves forward by the given number of slots, stopping at 23:30
    /// instead of wrapping past midnight.
    pub fn saturating_add(self, slots: u8) -> Self {
        Self(self.0.saturating_add(slots).min(Self::LAST.0))
    }

    /// Moves backward by the given number of slots, stopping at 00:00.
    pub fn saturating_sub(self, slots: u8) -> Self {
        Self(self.0.saturating_sub(slots))
    }

    /// The slot exactly one hour later, saturating at 23:30.
    pub fn plus_one_hour(self) -> Self {
        self.saturating_add(Self::PER_HOUR)
    }

    /// Iterates over all 48 slots in order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..Self::PER_DAY).map(TimeSlot)
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ERR: &str = "expected a half-hour time like \"09:00\" or \"09:30\"";

        let (h, m) = s.split_once(':').ok_or(ERR)?;
        let hour: u8 = h.parse().map_err(|_| ERR)?;
        let minute: u8 = m.parse().map_err(|_| ERR)?;
        if hour > 23 || (minute != 0 && minute != 30) {
            return Err(ERR);
        }
        Ok(Self(hour * 2 + u8::from(minute == 30)))
    }
}

impl<'de> serde::Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SlotVisitor;

        impl de::Visitor<'_> for SlotVisitor {
            type Value = TimeSlot;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a half-hour time like "09:00" or "21:30""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(SlotVisitor)
    }
}
