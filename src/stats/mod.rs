// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Accumulation of run results into a printable summary.

mod counts;
mod summary;

use std::{
    io,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use itertools::Itertools as _;
use smart_default::SmartDefault;

use crate::out::{Coloring, Styles, WriteStrExt as _};

pub use self::{
    counts::{Status, SubCounts},
    summary::Summary,
};

/// One second in nanoseconds.
const ONE_SECOND: u128 = 1_000_000_000;

/// One minute in nanoseconds.
const ONE_MINUTE: u128 = 60 * ONE_SECOND;

/// Rendering preferences of a [`RunStats`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Rendering {
    /// [`Coloring`] policy for console output.
    pub coloring: Coloring,

    /// Decimal mark separating seconds from milliseconds in the duration
    /// line.
    #[default('.')]
    pub decimal_mark: char,
}

/// Mutable counters of a [`RunStats`].
#[derive(Clone, Copy, Debug, Default)]
struct State {
    /// Tally of finished [`Scenario`] outcomes.
    ///
    /// [`Scenario`]: gherkin::Scenario
    scenarios: SubCounts,

    /// Tally of finished [`Step`] outcomes.
    ///
    /// [`Step`]: gherkin::Step
    steps: SubCounts,

    /// Total elapsed time over all [`Step`]s and hooks.
    ///
    /// [`Step`]: gherkin::Step
    duration: Duration,
}

/// Collector of per-[`Status`] counts and elapsed time for a single run.
///
/// All the `record_*` methods take `&self` and are safe to call from
/// concurrently running execution workers. Rendering methods are read-only
/// and may race harmlessly with concurrent mutation, but observe a
/// consistent snapshot only once all workers have finished.
#[derive(Debug)]
pub struct RunStats {
    /// Counters, shared between execution workers.
    state: Mutex<State>,

    /// Rendering preferences, fixed at construction.
    rendering: Rendering,

    /// [`Styles`] for console output.
    styles: Styles,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new(Rendering::default())
    }
}

impl RunStats {
    /// Creates a new [`RunStats`] with the given [`Rendering`] preferences.
    #[must_use]
    pub fn new(rendering: Rendering) -> Self {
        let mut styles = Styles::new();
        styles.apply_coloring(rendering.coloring);
        Self {
            state: Mutex::new(State::default()),
            rendering,
            styles,
        }
    }

    /// Counts one finished [`Step`] outcome and accumulates its duration
    /// (absent duration counts as zero).
    ///
    /// [`Step`]: gherkin::Step
    pub fn record_step(&self, status: Status, duration: Option<Duration>) {
        let mut state = self.state();
        state.steps.record(status);
        state.duration += duration.unwrap_or_default();
    }

    /// Counts one finished [`Scenario`] outcome.
    ///
    /// [`Scenario`]: gherkin::Scenario
    pub fn record_scenario(&self, status: Status) {
        self.state().scenarios.record(status);
    }

    /// Accumulates the duration of an executed hook (absent duration counts
    /// as zero).
    pub fn record_hook(&self, duration: Option<Duration>) {
        self.state().duration += duration.unwrap_or_default();
    }

    /// Returns a snapshot of the [`Scenario`] outcome tally.
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    pub fn scenarios(&self) -> SubCounts {
        self.state().scenarios
    }

    /// Returns a snapshot of the [`Step`] outcome tally.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub fn steps(&self) -> SubCounts {
        self.state().steps
    }

    /// Returns the total elapsed time accumulated so far.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.state().duration
    }

    /// Writes the console summary into the given `out`put, colored
    /// according to the constructed [`Rendering`].
    ///
    /// # Errors
    ///
    /// If writing into the given `out`put fails.
    pub fn write_summary(
        &self,
        out: &mut (impl io::Write + ?Sized),
    ) -> io::Result<()> {
        let state = *self.state();
        if state.steps.total() == 0 {
            out.write_line("0 Scenarios")?;
            out.write_line("0 Steps")?;
        } else {
            out.write_line(counts_line(
                &self.styles,
                "Scenarios",
                state.scenarios,
            ))?;
            out.write_line(counts_line(&self.styles, "Steps", state.steps))?;
        }
        out.write_line(duration_line(
            state.duration,
            self.rendering.decimal_mark,
        ))
    }

    /// Returns a plain [`Summary`] of the current state.
    ///
    /// The text matches [`RunStats::write_summary()`] rendered without
    /// colors, except that a run with no executed [`Step`]s yields the
    /// fixed [`Summary::empty()`] value.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub fn summary(&self) -> Summary {
        let state = *self.state();
        if state.steps.total() == 0 {
            return Summary::empty();
        }
        let plain = Styles::monochrome();
        Summary {
            scenarios: counts_line(&plain, "Scenarios", state.scenarios),
            steps: counts_line(&plain, "Steps", state.steps),
            duration: duration_line(
                state.duration,
                self.rendering.decimal_mark,
            ),
        }
    }

    /// Locks the inner [`State`], recovering it if some worker has
    /// panicked while counting.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Formats a `"<n> Scenarios (<breakdown>)"` line.
fn counts_line(styles: &Styles, noun: &str, counts: SubCounts) -> String {
    format!("{} {noun} ({})", counts.total(), breakdown(styles, counts))
}

/// Lists the non-zero categories of the given [`SubCounts`], in the fixed
/// order: failed, skipped, pending, undefined, passed.
fn breakdown(styles: &Styles, counts: SubCounts) -> String {
    [
        (counts.failed, Status::Failed),
        (counts.skipped, Status::Skipped),
        (counts.pending, Status::Pending),
        (counts.undefined, Status::Undefined),
        (counts.passed, Status::Passed),
    ]
    .into_iter()
    .filter(|(count, _)| *count != 0)
    .map(|(count, status)| {
        styles.status(status, format!("{count} {status}")).into_owned()
    })
    .join(", ")
}

/// Formats the given total elapsed time as `"<minutes>m<seconds>.<millis>s"`.
///
/// Seconds are rounded to whole milliseconds.
fn duration_line(total: Duration, decimal_mark: char) -> String {
    let nanos = total.as_nanos();
    let minutes = nanos / ONE_MINUTE;
    let millis = (nanos % ONE_MINUTE + 500_000) / 1_000_000;
    format!(
        "{minutes}m{}{decimal_mark}{:03}s",
        millis / 1000,
        millis % 1000,
    )
}
