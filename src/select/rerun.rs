// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expansion of rerun manifests.
//!
//! A rerun manifest is a resource listing whitespace-separated selectors of
//! previously executed [`Scenario`]s, written out by a runner to re-execute
//! just the recorded subset.
//!
//! [`Scenario`]: gherkin::Scenario

use std::io::{self, Read as _};

use derive_more::{Display, Error, From};

use crate::resource::{self, Loader, Resource as _};

use super::location::{FeaturePath, Selector};

/// Error of expanding a rerun manifest.
///
/// Manifest paths are user-authored configuration, so failing to resolve
/// one is a hard error rather than a silently skipped selector.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Failed to locate the manifest resource.
    #[display("{_0}")]
    Resource(resource::Error),

    /// Failed to read the manifest contents.
    #[display("Failed to read rerun manifest: {_0}")]
    Read(io::Error),

    /// Manifest referenced another rerun manifest.
    ///
    /// Manifests are expanded exactly once, without nested indirection.
    #[display("Rerun manifest `{path}` references another rerun manifest")]
    #[from(ignore)]
    Nested {
        /// Path of the offending manifest.
        #[error(not(source))]
        path: String,
    },
}

/// Reads the rerun manifest at the given `path` and parses its contents
/// into [`FeaturePath`]s, in listed order.
///
/// The manifest is located on the filesystem first, falling back to an
/// [`EMBEDDED_SCHEME`] resolution of the same logical path.
///
/// # Errors
///
/// If the manifest cannot be located or read, or if it references another
/// rerun manifest.
///
/// [`EMBEDDED_SCHEME`]: resource::EMBEDDED_SCHEME
pub fn expand<L: Loader + ?Sized>(
    loader: &L,
    path: &str,
) -> Result<Vec<FeaturePath>, Error> {
    let mut paths = vec![];
    for res in super::fallback_resources(loader, path, None)? {
        let mut text = String::new();
        drop(res.open()?.read_to_string(&mut text)?);

        for token in text.split_whitespace() {
            match Selector::parse(token) {
                Selector::Feature(p) => paths.push(p),
                Selector::Rerun(_) => {
                    return Err(Error::Nested {
                        path: path.to_owned(),
                    });
                }
            }
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use crate::resource::InMemory;

    use super::*;

    #[test]
    fn expands_in_listed_order() {
        let loader = InMemory::new()
            .with("path/rerun.txt", "a.feature:2 b.feature:4");

        let paths = expand(&loader, "path/rerun.txt").unwrap();
        assert_eq!(
            paths,
            [
                FeaturePath {
                    path: "a.feature".into(),
                    lines: [2].into(),
                },
                FeaturePath {
                    path: "b.feature".into(),
                    lines: [4].into(),
                },
            ],
        );
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let err = expand(&InMemory::new(), "path/rerun.txt").unwrap_err();
        assert!(matches!(err, Error::Resource(e) if e.is_not_found()));
    }

    #[test]
    fn nested_manifest_is_an_error() {
        let loader =
            InMemory::new().with("path/rerun.txt", "@path/other.txt");

        let err = expand(&loader, "path/rerun.txt").unwrap_err();
        assert!(
            matches!(err, Error::Nested { path } if path == "path/rerun.txt"),
        );
    }
}
