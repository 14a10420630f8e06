//! Daypart and day-of-week resolution with persisted overrides.
//!
//! # Responsibility
//! - Map (wall-clock time, stored overrides, startup query parameters) to the
//!   display mode and effective day used for content selection.
//! - Persist operator overrides through the injected key/value store.
//!
//! # Invariants
//! - Per axis, a stored override always wins over the query parameter.
//! - Query parameters are captured once at construction.
//! - Unrecognized stored/query values are treated as absent, never errors.
//! - `poll()` re-resolves at most once per refresh interval; setters
//!   re-resolve immediately.
//! - Every scheduled or manual resolution re-reads stored overrides, so a
//!   value written by another process applies on the next tick.

use crate::model::daypart::{DayOfWeek, Daypart, OverrideSelection};
use crate::resolver::clock::Clock;
use crate::resolver::query::{QueryParams, DAYPART_PARAM, DAY_PARAM};
use crate::store::{KeyValueStore, DAYPART_OVERRIDE_KEY, DAY_OVERRIDE_KEY};
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use log::{debug, info};
use serde::Serialize;

/// Default hour (exclusive) at which breakfast ends.
pub const DEFAULT_BREAKFAST_END_HOUR: u32 = 11;
/// Default re-evaluation interval in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 60;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Stored,
    Query,
    Clock,
}

/// Display state consumed by presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub is_breakfast: bool,
    pub resolved_day: DayOfWeek,
    pub daypart_source: ResolutionSource,
    pub day_source: ResolutionSource,
}

/// Raw inputs of one resolution, already normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionInputs {
    pub stored_daypart: Option<Daypart>,
    pub stored_day: Option<DayOfWeek>,
    pub query_daypart: Option<Daypart>,
    pub query_day: Option<DayOfWeek>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Hours strictly below this value are breakfast when no override applies.
    pub breakfast_end_hour: u32,
    pub refresh_interval: TimeDelta,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            breakfast_end_hour: DEFAULT_BREAKFAST_END_HOUR,
            refresh_interval: TimeDelta::seconds(i64::from(DEFAULT_REFRESH_INTERVAL_SECS)),
        }
    }
}

/// Resolves display state for one instant.
///
/// Pure function; the resolver wraps it with persistence and scheduling.
pub fn resolve(
    now: NaiveDateTime,
    inputs: &ResolutionInputs,
    breakfast_end_hour: u32,
) -> DisplayState {
    let (is_breakfast, daypart_source) = match pick(inputs.stored_daypart, inputs.query_daypart) {
        Some((daypart, source)) => (daypart == Daypart::Breakfast, source),
        None => (now.hour() < breakfast_end_hour, ResolutionSource::Clock),
    };

    let (resolved_day, day_source) = match pick(inputs.stored_day, inputs.query_day) {
        Some((day, source)) => (day, source),
        None => (
            DayOfWeek::from_sunday_index(now.weekday().num_days_from_sunday()),
            ResolutionSource::Clock,
        ),
    };

    DisplayState {
        is_breakfast,
        resolved_day,
        daypart_source,
        day_source,
    }
}

fn pick<T>(stored: Option<T>, query: Option<T>) -> Option<(T, ResolutionSource)> {
    stored
        .map(|value| (value, ResolutionSource::Stored))
        .or_else(|| query.map(|value| (value, ResolutionSource::Query)))
}

/// Stateful resolver owned by one display host.
pub struct DaypartResolver<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    settings: ResolverSettings,
    query_daypart: Option<Daypart>,
    query_day: Option<DayOfWeek>,
    daypart_override: OverrideSelection<Daypart>,
    day_override: OverrideSelection<DayOfWeek>,
    state: DisplayState,
    resolved_at: NaiveDateTime,
}

impl<S: KeyValueStore, C: Clock> DaypartResolver<S, C> {
    /// Creates a resolver and performs the initial resolution.
    pub fn new(store: S, clock: C, query: &QueryParams, settings: ResolverSettings) -> Self {
        let (daypart_override, day_override) = read_overrides(&store);
        let query_daypart = query.get(DAYPART_PARAM).and_then(Daypart::parse);
        let query_day = query.get(DAY_PARAM).and_then(DayOfWeek::parse);

        let now = clock.now();
        let inputs = ResolutionInputs {
            stored_daypart: daypart_override.as_option(),
            stored_day: day_override.as_option(),
            query_daypart,
            query_day,
        };
        let state = resolve(now, &inputs, settings.breakfast_end_hour);
        debug!(
            "event=daypart_resolve module=resolver status=ok trigger=init is_breakfast={} day={}",
            state.is_breakfast, state.resolved_day
        );

        Self {
            store,
            clock,
            settings,
            query_daypart,
            query_day,
            daypart_override,
            day_override,
            state,
            resolved_at: now,
        }
    }

    /// Last resolved state.
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Persisted daypart override (`Auto` when none is stored).
    pub fn daypart_override(&self) -> OverrideSelection<Daypart> {
        self.daypart_override
    }

    /// Persisted day override (`Auto` when none is stored).
    pub fn day_override(&self) -> OverrideSelection<DayOfWeek> {
        self.day_override
    }

    /// Effective daypart override after query fallback, as shown by toggles.
    pub fn effective_daypart_override(&self) -> Option<Daypart> {
        self.daypart_override.as_option().or(self.query_daypart)
    }

    /// Effective day override after query fallback, as shown by toggles.
    pub fn effective_day_override(&self) -> Option<DayOfWeek> {
        self.day_override.as_option().or(self.query_day)
    }

    /// Re-resolves when the refresh interval has elapsed.
    ///
    /// Returns the fresh state when a resolution ran, `None` otherwise. A
    /// clock that moved backwards counts as due.
    pub fn poll(&mut self) -> Option<DisplayState> {
        let now = self.clock.now();
        let elapsed = now - self.resolved_at;
        if elapsed >= self.settings.refresh_interval || elapsed < TimeDelta::zero() {
            self.sync_overrides();
            Some(self.resolve_at(now, "tick"))
        } else {
            None
        }
    }

    /// Re-reads stored overrides and re-resolves unconditionally.
    pub fn refresh(&mut self) -> DisplayState {
        self.sync_overrides();
        let now = self.clock.now();
        self.resolve_at(now, "manual")
    }

    /// Persists a daypart override and re-resolves.
    ///
    /// The store is reloaded first so the other axis is never written back stale.
    pub fn set_daypart_override(&mut self, selection: OverrideSelection<Daypart>) -> DisplayState {
        self.store.reload();
        match selection {
            OverrideSelection::Fixed(daypart) => {
                self.store.set(DAYPART_OVERRIDE_KEY, daypart.as_str())
            }
            OverrideSelection::Auto => self.store.remove(DAYPART_OVERRIDE_KEY),
        }
        (self.daypart_override, self.day_override) = read_overrides(&self.store);
        info!(
            "event=override_set module=resolver status=ok axis=daypart value={}",
            selection.as_option().map_or("auto", Daypart::as_str)
        );
        let now = self.clock.now();
        self.resolve_at(now, "override")
    }

    /// Persists a day-of-week override and re-resolves.
    pub fn set_day_override(&mut self, selection: OverrideSelection<DayOfWeek>) -> DisplayState {
        self.store.reload();
        match selection {
            OverrideSelection::Fixed(day) => self.store.set(DAY_OVERRIDE_KEY, day.as_str()),
            OverrideSelection::Auto => self.store.remove(DAY_OVERRIDE_KEY),
        }
        (self.daypart_override, self.day_override) = read_overrides(&self.store);
        info!(
            "event=override_set module=resolver status=ok axis=day value={}",
            selection.as_option().map_or("auto", DayOfWeek::as_str)
        );
        let now = self.clock.now();
        self.resolve_at(now, "override")
    }

    /// Releases the injected store and clock.
    pub fn into_parts(self) -> (S, C) {
        (self.store, self.clock)
    }

    fn sync_overrides(&mut self) {
        self.store.reload();
        let (daypart_override, day_override) = read_overrides(&self.store);
        if daypart_override != self.daypart_override || day_override != self.day_override {
            info!(
                "event=override_sync module=resolver status=ok daypart={} day={}",
                daypart_override.as_option().map_or("auto", Daypart::as_str),
                day_override.as_option().map_or("auto", DayOfWeek::as_str)
            );
        }
        self.daypart_override = daypart_override;
        self.day_override = day_override;
    }

    fn resolve_at(&mut self, now: NaiveDateTime, trigger: &str) -> DisplayState {
        let inputs = ResolutionInputs {
            stored_daypart: self.daypart_override.as_option(),
            stored_day: self.day_override.as_option(),
            query_daypart: self.query_daypart,
            query_day: self.query_day,
        };
        let next = resolve(now, &inputs, self.settings.breakfast_end_hour);
        if next != self.state {
            info!(
                "event=daypart_change module=resolver status=ok trigger={} is_breakfast={} day={}",
                trigger, next.is_breakfast, next.resolved_day
            );
        }
        self.state = next;
        self.resolved_at = now;
        next
    }
}

fn read_overrides<S: KeyValueStore>(
    store: &S,
) -> (OverrideSelection<Daypart>, OverrideSelection<DayOfWeek>) {
    let daypart = store
        .get(DAYPART_OVERRIDE_KEY)
        .and_then(|value| Daypart::parse(&value));
    let day = store
        .get(DAY_OVERRIDE_KEY)
        .and_then(|value| DayOfWeek::parse(&value));
    (daypart.into(), day.into())
}
