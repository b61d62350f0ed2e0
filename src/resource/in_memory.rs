// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory [`Loader`] implementation.

use std::{collections::BTreeMap, io};

use super::{Error, Loader, Resource};

/// [`Loader`] of documents registered in memory, keyed by their logical
/// path.
///
/// This is the natural home for feature documents embedded into a test
/// binary (via [`include_str!`] or generated at runtime): an exact path
/// enumerates as the single registered document, while any other path
/// enumerates every registered document living under it, sorted by path.
#[derive(Clone, Debug, Default)]
pub struct InMemory(BTreeMap<String, String>);

impl InMemory {
    /// Creates a new empty [`InMemory`] [`Loader`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under the given logical `path`.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        contents: impl Into<String>,
    ) {
        drop(self.0.insert(path.into(), contents.into()));
    }

    /// Returns this [`InMemory`] [`Loader`] with a document registered
    /// under the given logical `path`.
    #[must_use]
    pub fn with(
        mut self,
        path: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        self.insert(path, contents);
        self
    }
}

impl Loader for InMemory {
    fn resources(
        &self,
        path: &str,
        suffix: Option<&str>,
    ) -> Result<Vec<Box<dyn Resource + '_>>, Error> {
        if let Some((path, contents)) = self.0.get_key_value(path) {
            let res: Box<dyn Resource + '_> = Box::new(Doc { path, contents });
            return Ok(vec![res]);
        }

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let found = self
            .0
            .range(prefix.clone()..)
            .take_while(|(p, _)| p.starts_with(&prefix))
            .filter(|(p, _)| suffix.map_or(true, |s| p.ends_with(s)))
            .map(|(path, contents)| {
                let res: Box<dyn Resource + '_> = Box::new(Doc { path, contents });
                res
            })
            .collect::<Vec<_>>();

        if found.is_empty() {
            Err(Error::NotFound {
                path: path.to_owned(),
            })
        } else {
            Ok(found)
        }
    }
}

/// [`Resource`] backed by a registered in-memory document.
#[derive(Clone, Copy, Debug)]
struct Doc<'l> {
    /// Logical path of the document.
    path: &'l str,

    /// Contents of the document.
    contents: &'l str,
}

impl Resource for Doc<'_> {
    fn path(&self) -> &str {
        self.path
    }

    fn open(&self) -> io::Result<Box<dyn io::Read + '_>> {
        Ok(Box::new(self.contents.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use super::*;

    #[test]
    fn exact_path_enumerates_single_document() {
        let loader = InMemory::new().with("path/foo.feature", "Feature: foo");
        let found = loader
            .resources("path/foo.feature", Some(".feature"))
            .unwrap();
        assert_eq!(found.len(), 1);

        let mut text = String::new();
        found[0].open().unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "Feature: foo");
    }

    #[test]
    fn prefix_enumerates_sorted_and_suffix_filtered() {
        let loader = InMemory::new()
            .with("features/b.feature", "Feature: b")
            .with("features/a.feature", "Feature: a")
            .with("features/rerun.txt", "a.feature:2");

        let found =
            loader.resources("features", Some(".feature")).unwrap();
        let paths = found.iter().map(|r| r.path()).collect::<Vec<_>>();
        assert_eq!(paths, ["features/a.feature", "features/b.feature"]);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert!(InMemory::new()
            .resources("does/not/exist", None)
            .unwrap_err()
            .is_not_found());
    }
}
