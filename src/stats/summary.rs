// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain value form of a run summary.

use derive_more::Display;

/// Rendered summary of a single run, suitable for embedding into reports
/// or passing across process boundaries.
///
/// Created once from a [`RunStats`] snapshot and never mutated afterwards.
/// Always monochrome.
///
/// [`RunStats`]: crate::stats::RunStats
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{scenarios}\n{steps}\n{duration}")]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Summary {
    /// Scenario counts line.
    pub scenarios: String,

    /// Step counts line.
    pub steps: String,

    /// Total elapsed time line.
    pub duration: String,
}

impl Summary {
    /// [`Summary`] of a run that executed no [`Step`]s.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scenarios: "0 Scenarios".into(),
            steps: "0 Steps".into(),
            duration: "0m0.000s".into(),
        }
    }
}
