// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome classification and per-[`Status`] tallies.

use derive_more::Display;

/// Outcome of a finished [`Scenario`] or [`Step`].
///
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// Execution finished successfully.
    #[display("passed")]
    Passed,

    /// Execution finished with an error.
    #[display("failed")]
    Failed,

    /// Execution was omitted.
    #[display("skipped")]
    Skipped,

    /// Implementation exists, but signalled itself as unfinished.
    #[display("pending")]
    Pending,

    /// No implementation was found.
    #[display("undefined")]
    Undefined,

    /// Outcome name unknown to this crate.
    ///
    /// Never counted by a [`SubCounts`], so runners with extended outcome
    /// vocabularies keep working against this crate.
    #[display("unrecognized")]
    Unrecognized,
}

impl Status {
    /// Classifies the given raw outcome name.
    ///
    /// This is a total function: names outside the five known categories
    /// are mapped to [`Status::Unrecognized`] instead of erroring.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        match raw {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            "pending" => Self::Pending,
            "undefined" => Self::Undefined,
            _ => Self::Unrecognized,
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Self::classify(raw)
    }
}

/// Per-[`Status`] tally of finished [`Scenario`]s or [`Step`]s.
///
/// Counters are only ever incremented, one classified outcome at a time.
///
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SubCounts {
    /// Number of [`Passed`] outcomes.
    ///
    /// [`Passed`]: Status::Passed
    pub passed: usize,

    /// Number of [`Failed`] outcomes.
    ///
    /// [`Failed`]: Status::Failed
    pub failed: usize,

    /// Number of [`Skipped`] outcomes.
    ///
    /// [`Skipped`]: Status::Skipped
    pub skipped: usize,

    /// Number of [`Pending`] outcomes.
    ///
    /// [`Pending`]: Status::Pending
    pub pending: usize,

    /// Number of [`Undefined`] outcomes.
    ///
    /// [`Undefined`]: Status::Undefined
    pub undefined: usize,
}

impl SubCounts {
    /// Creates a new [`SubCounts`] with all counters set to zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            skipped: 0,
            pending: 0,
            undefined: 0,
        }
    }

    /// Returns the total number of counted outcomes over all five
    /// categories.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.pending
            + self.undefined
    }

    /// Counts one classified outcome.
    ///
    /// [`Status::Unrecognized`] outcomes are dropped silently.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Pending => self.pending += 1,
            Status::Undefined => self.undefined += 1,
            Status::Unrecognized => {}
        }
    }
}
