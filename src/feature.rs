// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`gherkin::Feature`] extension.

use sealed::sealed;

/// Helper methods to operate on [`gherkin::Feature`]s.
#[sealed]
pub trait Ext: Sized {
    /// Retains only the [`Scenario`]s satisfying the given `keep` predicate,
    /// both at the [`Feature`]'s top level and inside its [`Rule`]s.
    ///
    /// [`Rule`]s left without [`Scenario`]s are dropped.
    ///
    /// [`Feature`]: gherkin::Feature
    /// [`Rule`]: gherkin::Rule
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    fn retain_scenarios<F: FnMut(&gherkin::Scenario) -> bool>(
        self,
        keep: F,
    ) -> Self;

    /// Counts all the [`Feature`]'s [`Scenario`]s, including [`Rule`]s
    /// inside.
    ///
    /// [`Feature`]: gherkin::Feature
    /// [`Rule`]: gherkin::Rule
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    fn count_scenarios(&self) -> usize;
}

#[sealed]
impl Ext for gherkin::Feature {
    fn retain_scenarios<F: FnMut(&gherkin::Scenario) -> bool>(
        mut self,
        mut keep: F,
    ) -> Self {
        for r in &mut self.rules {
            r.scenarios.retain(|sc| keep(sc));
        }
        self.rules.retain(|r| !r.scenarios.is_empty());
        self.scenarios.retain(|sc| keep(sc));
        self
    }

    fn count_scenarios(&self) -> usize {
        self.scenarios.len()
            + self.rules.iter().map(|r| r.scenarios.len()).sum::<usize>()
    }
}
