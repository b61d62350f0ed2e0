// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Filtering of [`Scenario`]s to execute.
//!
//! [`Scenario`]: gherkin::Scenario

use std::{collections::BTreeSet, fmt};

use derive_more::{Display, Error};
use gherkin::tagexpr::TagOperation;
use itertools::Itertools as _;
use regex::Regex;

/// Single criterion restricting which [`Scenario`]s are selected for
/// execution.
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Debug)]
pub enum Filter {
    /// Retains [`Scenario`]s whose declared line is among the given ones.
    ///
    /// Scoped to the single feature document it was given for.
    ///
    /// [`Scenario`]: gherkin::Scenario
    Lines(BTreeSet<usize>),

    /// Retains [`Scenario`]s matching a [tag expression][1].
    ///
    /// Tags of the [`Feature`] and the [`Scenario`] are merged together on
    /// evaluation.
    ///
    /// [`Feature`]: gherkin::Feature
    /// [`Scenario`]: gherkin::Scenario
    /// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
    Tag {
        /// Parsed [tag expression][1].
        ///
        /// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
        op: TagOperation,

        /// Original textual form, kept for diagnostics.
        raw: String,
    },

    /// Retains [`Scenario`]s whose name matches a [`Regex`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    Name(Regex),
}

impl Filter {
    /// Creates a [`Filter::Tag`] from the textual form of a
    /// [tag expression][1].
    ///
    /// # Errors
    ///
    /// If the given `raw` expression cannot be parsed as a
    /// [`TagOperation`].
    ///
    /// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
    pub fn tag(raw: impl Into<String>) -> Result<Self, InvalidTagExpression> {
        let raw = raw.into();
        match raw.parse::<TagOperation>() {
            Ok(op) => Ok(Self::Tag { op, raw }),
            Err(e) => Err(InvalidTagExpression {
                message: e.to_string(),
                expression: raw,
            }),
        }
    }

    /// Checks whether the given `scenario` of the given `feature` satisfies
    /// this criterion.
    #[must_use]
    pub fn matches(
        &self,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
    ) -> bool {
        match self {
            Self::Lines(lines) => lines.contains(&scenario.position.line),
            Self::Tag { op, .. } => {
                eval_tags(op, feature.tags.iter().chain(&scenario.tags))
            }
            Self::Name(re) => re.is_match(&scenario.name),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines(lines) => {
                write!(f, "[{}]", lines.iter().join(", "))
            }
            Self::Tag { raw, .. } => f.write_str(raw),
            Self::Name(re) => f.write_str(re.as_str()),
        }
    }
}

/// Error of parsing a [tag expression][1] [`Filter`].
///
/// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
#[derive(Clone, Debug, Display, Error)]
#[display("Invalid tag expression `{expression}`: {message}")]
pub struct InvalidTagExpression {
    /// The expression failed to be parsed.
    #[error(not(source))]
    pub expression: String,

    /// Parser message describing the failure.
    pub message: String,
}

/// Set of [`Filter`]s applied when selecting [`Scenario`]s to execute.
///
/// A [`Scenario`] is retained iff its declared line is contained in every
/// [`Filter::Lines`] and, when any tag or name [`Filter`]s are present, at
/// least one of them matches.
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Debug, Default)]
pub struct FilterSet(Vec<Filter>);

impl FilterSet {
    /// Creates an empty [`FilterSet`], retaining every [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given [`Filter`] to this set.
    pub fn push(&mut self, filter: Filter) {
        self.0.push(filter);
    }

    /// Returns this [`FilterSet`] with the given [`Filter`] added.
    #[must_use]
    pub fn with(mut self, filter: Filter) -> Self {
        self.push(filter);
        self
    }

    /// Indicates whether this set contains no [`Filter`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this [`FilterSet`] extended with a line restriction for the
    /// single feature document it's applied to.
    #[must_use]
    pub(crate) fn with_lines(&self, lines: &BTreeSet<usize>) -> Self {
        self.clone().with(Filter::Lines(lines.clone()))
    }

    /// Checks whether the given `scenario` of the given `feature` survives
    /// this set.
    #[must_use]
    pub fn retains(
        &self,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
    ) -> bool {
        let (lines, matchers): (Vec<_>, Vec<_>) = self
            .0
            .iter()
            .partition(|f| matches!(f, Filter::Lines(_)));

        lines.iter().all(|f| f.matches(feature, scenario))
            && (matchers.is_empty()
                || matchers.iter().any(|f| f.matches(feature, scenario)))
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}

impl Extend<Filter> for FilterSet {
    fn extend<T: IntoIterator<Item = Filter>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<T: IntoIterator<Item = Filter>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Evaluates the given [`TagOperation`] against the given `tags`.
fn eval_tags<S, I>(op: &TagOperation, tags: I) -> bool
where
    S: AsRef<str>,
    I: IntoIterator<Item = S> + Clone,
{
    match op {
        TagOperation::And(l, r) => {
            eval_tags(l, tags.clone()) && eval_tags(r, tags)
        }
        TagOperation::Or(l, r) => {
            eval_tags(l, tags.clone()) || eval_tags(r, tags)
        }
        TagOperation::Not(t) => !eval_tags(t, tags),
        TagOperation::Tag(t) => tags.into_iter().any(|tag| tag.as_ref() == t),
    }
}
