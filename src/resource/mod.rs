// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Enumeration and reading of feature-bearing resources.
//!
//! [`Loader`] is the seam between selection and the place feature documents
//! actually live: the filesystem ([`Fs`]), documents embedded into the test
//! binary ([`InMemory`]), or both ([`Multi`]).

pub mod fs;
pub mod in_memory;

use std::io;

use derive_more::{Display, Error};

#[doc(inline)]
pub use self::{fs::Fs, in_memory::InMemory};

/// Scheme prefix routing a path to embedded in-memory documents instead of
/// the filesystem.
pub const EMBEDDED_SCHEME: &str = "embedded:";

/// Single enumerable resource: a logical path plus readable contents.
pub trait Resource: std::fmt::Debug {
    /// Logical path of this resource, as it should appear in diagnostics.
    fn path(&self) -> &str;

    /// Opens this resource's contents for reading.
    ///
    /// # Errors
    ///
    /// If the underlying storage fails to open.
    fn open(&self) -> io::Result<Box<dyn io::Read + '_>>;
}

/// Source of [`Resource`]s to load feature documents from.
pub trait Loader {
    /// Enumerates the [`Resource`]s living at the given `path`: the
    /// resource itself if `path` points at a single document, or all the
    /// contained documents matching the given `suffix` if it points at a
    /// collection of them.
    ///
    /// Passing [`None`] as a `suffix` enumerates without filtering.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the given `path` doesn't point at anything
    /// this [`Loader`] knows about, or [`Error::Io`] if enumeration itself
    /// fails.
    fn resources(
        &self,
        path: &str,
        suffix: Option<&str>,
    ) -> Result<Vec<Box<dyn Resource + '_>>, Error>;
}

/// Error of enumerating [`Resource`]s.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Path is neither a file, a directory, nor an embedded entry.
    ///
    /// Distinguished, so callers may fall back to another resolution of
    /// the same logical path.
    #[display("Not a file or directory: {path}")]
    NotFound {
        /// The path failed to be resolved.
        #[error(not(source))]
        path: String,
    },

    /// Enumeration failed in the underlying storage.
    #[display("Failed to enumerate resources at `{path}`: {source}")]
    Io {
        /// The path enumeration failed at.
        path: String,

        /// Original cause of the failure.
        source: io::Error,
    },
}

impl Error {
    /// Indicates whether this [`Error`] is a [`Error::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// [`Loader`] routing `embedded:`-prefixed paths to an [`InMemory`]
/// registry and every other path to the [`Fs`].
#[derive(Clone, Debug, Default)]
pub struct Multi {
    /// Loader of filesystem paths.
    pub fs: Fs,

    /// Registry of embedded documents.
    pub embedded: InMemory,
}

impl Multi {
    /// Creates a new [`Multi`] [`Loader`] on top of the given registry of
    /// embedded documents.
    #[must_use]
    pub fn new(embedded: InMemory) -> Self {
        Self { fs: Fs, embedded }
    }
}

impl Loader for Multi {
    fn resources(
        &self,
        path: &str,
        suffix: Option<&str>,
    ) -> Result<Vec<Box<dyn Resource + '_>>, Error> {
        path.strip_prefix(EMBEDDED_SCHEME).map_or_else(
            || self.fs.resources(path, suffix),
            |rest| self.embedded.resources(rest, suffix),
        )
    }
}
