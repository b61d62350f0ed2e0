// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Textual selectors of feature documents.

use std::collections::BTreeSet;

use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix marking a selector as a reference to a rerun manifest.
pub const RERUN_MARKER: &str = "@";

/// Parsed form of a single raw selector string.
///
/// Parsing is total: any string represents some [`Selector`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selector {
    /// Path pointing at feature documents, optionally restricted to
    /// certain lines.
    Feature(FeaturePath),

    /// Path pointing at a rerun manifest listing further selectors.
    Rerun(String),
}

impl Selector {
    /// Parses the given raw `selector` string.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        selector.strip_prefix(RERUN_MARKER).map_or_else(
            || Self::Feature(FeaturePath::parse(selector)),
            |manifest| Self::Rerun(manifest.to_owned()),
        )
    }
}

impl From<&str> for Selector {
    fn from(selector: &str) -> Self {
        Self::parse(selector)
    }
}

/// Path to feature documents plus an optional set of line numbers
/// restricting the selected [`Scenario`]s within them.
///
/// An empty set of lines selects all the [`Scenario`]s of the document.
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeaturePath {
    /// Path to a feature file or a directory of them.
    pub path: String,

    /// Declaration lines of the selected [`Scenario`]s.
    ///
    /// [`Scenario`]: gherkin::Scenario
    pub lines: BTreeSet<usize>,
}

impl FeaturePath {
    /// Splits a trailing `:<line>[,<line>]*` suffix off the given `path`.
    ///
    /// The suffix is recognized after the last `:` only if it consists
    /// solely of digits and commas; anything else (including numbers not
    /// fitting into [`usize`]) is considered part of the path itself, as
    /// file names may legitimately contain colons.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        /// [`Regex`] matching a line numbers suffix after the last `:`.
        static LINES_SUFFIX: &Lazy<Regex> =
            regex!(r"^(?P<path>.*):(?P<lines>\d+(?:,\d+)*)$");

        if let Some(caps) = LINES_SUFFIX.captures(path) {
            // PANIC: Unwrapping is OK here as `LINES_SUFFIX` contains both
            //        capture groups.
            #[allow(clippy::unwrap_used)]
            let (p, lines) =
                (caps.name("path").unwrap(), caps.name("lines").unwrap());
            let parsed = lines
                .as_str()
                .split(',')
                .map(str::parse)
                .collect::<Result<BTreeSet<usize>, _>>();
            if let Ok(lines) = parsed {
                return Self {
                    path: p.as_str().to_owned(),
                    lines,
                };
            }
        }
        Self {
            path: path.to_owned(),
            lines: BTreeSet::new(),
        }
    }
}

impl From<&str> for FeaturePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_has_no_lines() {
        assert_eq!(
            FeaturePath::parse("path/foo.feature"),
            FeaturePath {
                path: "path/foo.feature".into(),
                lines: BTreeSet::new(),
            },
        );
    }

    #[test]
    fn trailing_suffix_becomes_lines() {
        assert_eq!(
            FeaturePath::parse("path/foo.feature:2,12,2"),
            FeaturePath {
                path: "path/foo.feature".into(),
                lines: [2, 12].into(),
            },
        );
    }

    #[test]
    fn only_last_colon_is_split() {
        assert_eq!(
            FeaturePath::parse("c:features:3"),
            FeaturePath {
                path: "c:features".into(),
                lines: [3].into(),
            },
        );
    }

    #[test]
    fn malformed_suffix_is_part_of_the_path() {
        for path in
            ["foo.feature:2x", "foo.feature:", "foo.feature:2,", "foo:bar"]
        {
            assert_eq!(
                FeaturePath::parse(path),
                FeaturePath {
                    path: path.into(),
                    lines: BTreeSet::new(),
                },
                "`{path}` should have parsed as a plain path",
            );
        }
    }

    #[test]
    fn overflowing_line_number_is_part_of_the_path() {
        let path = "foo.feature:99999999999999999999999999";
        assert_eq!(
            FeaturePath::parse(path),
            FeaturePath {
                path: path.into(),
                lines: BTreeSet::new(),
            },
        );
    }

    #[test]
    fn rerun_marker_takes_precedence() {
        assert_eq!(
            Selector::parse("@path/rerun.txt"),
            Selector::Rerun("path/rerun.txt".into()),
        );
        assert_eq!(
            Selector::parse("path/foo.feature:2"),
            Selector::Feature(FeaturePath::parse("path/foo.feature:2")),
        );
    }
}
