use std::fmt;
use std::time::Duration;

use chrono::prelude::*;

use crate::annex_c;
use crate::running_status::When;

/// Decoded programme metadata of one `.eit` record.
///
/// `Default` is the empty record handed out for missing, unreadable or
/// truncated input.
#[derive(Clone, Default, PartialEq)]
pub struct EventRecord {
    pub(crate) event_id: u16,
    pub(crate) when: Option<When>,
    pub(crate) start_date: (i32, i32, i32),
    pub(crate) start_time: (u8, u8, u8),
    pub(crate) duration: (u8, u8, u8),
    pub(crate) name: String,
    pub(crate) short_description: String,
    pub(crate) description: String,
}

impl EventRecord {
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        *self == EventRecord::default()
    }

    #[inline(always)]
    pub fn event_id(&self) -> u16 {
        self.event_id
    }

    #[inline(always)]
    pub fn when(&self) -> Option<When> {
        self.when
    }

    /// (y, m, d) exactly as the MJD conversion yields it
    #[inline(always)]
    pub fn start_date(&self) -> (i32, i32, i32) {
        self.start_date
    }

    /// (hh, mm, ss)
    #[inline(always)]
    pub fn start_time(&self) -> (u8, u8, u8) {
        self.start_time
    }

    /// Start at minute precision; `None` when date, hour or minute is not
    /// a valid calendar value
    pub fn start(&self) -> Option<DateTime<Utc>> {
        if self.is_empty() {
            return None;
        }

        let (hh, mm, _) = self.start_time;
        annex_c::to_date_time(self.start_date, (hh, mm))
    }

    /// (hh, mm, ss)
    #[inline(always)]
    pub fn duration(&self) -> (u8, u8, u8) {
        self.duration
    }

    #[inline(always)]
    pub fn duration_secs(&self) -> u32 {
        annex_c::duration_secs(self.duration)
    }

    #[inline(always)]
    pub fn length(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs()))
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// extended text, or the short text when the record has none
    #[inline(always)]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":event-record (:id {}", self.event_id)?;

        match self.when {
            Some(when) => write!(f, " :when {}", when)?,
            None => write!(f, " :when ~")?,
        }

        match self.start() {
            Some(start) => write!(f, " :start {}", start)?,
            None => write!(f, " :start ~")?,
        }

        write!(
            f,
            r#" :duration {}s :name {:?} :short {:?} :description {:?})"#,
            self.duration_secs(),
            self.name,
            self.short_description,
            self.description
        )
    }
}
