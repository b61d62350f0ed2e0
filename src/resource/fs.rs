// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Filesystem-backed [`Loader`] implementation.

use std::{fs, io, path::Path};

use globwalk::GlobWalkerBuilder;

use super::{Error, Loader, Resource};

/// Default filesystem [`Loader`].
///
/// A file path enumerates as the single file itself, a directory path as
/// all the contained files matching the requested suffix
/// (case-insensitively), walked recursively and sorted by path, so
/// enumeration order doesn't depend on the underlying filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fs;

impl Loader for Fs {
    fn resources(
        &self,
        path: &str,
        suffix: Option<&str>,
    ) -> Result<Vec<Box<dyn Resource + '_>>, Error> {
        let dir = Path::new(path);
        if dir.is_file() {
            return Ok(vec![Box::new(File {
                path: path.to_owned(),
            })]);
        }
        if !dir.is_dir() {
            return Err(Error::NotFound {
                path: path.to_owned(),
            });
        }

        let pattern =
            suffix.map_or_else(|| "*".to_owned(), |s| format!("*{s}"));
        let walker = GlobWalkerBuilder::new(dir, pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Io {
                path: path.to_owned(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    e.to_string(),
                ),
            })?;

        let mut paths = walker
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().display().to_string())
            .collect::<Vec<_>>();
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| {
                let res: Box<dyn Resource> = Box::new(File { path });
                res
            })
            .collect())
    }
}

/// [`Resource`] backed by a filesystem file.
#[derive(Clone, Debug)]
struct File {
    /// Path of the file.
    path: String,
}

impl Resource for File {
    fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> io::Result<Box<dyn io::Read + '_>> {
        Ok(Box::new(fs::File::open(&self.path)?))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_path_is_not_found() {
        assert!(Fs
            .resources("does/not/exist", Some(".feature"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn file_enumerates_as_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("foo.feature");
        fs::write(&file, "Feature: foo\n").unwrap();

        let path = file.display().to_string();
        let found = Fs.resources(&path, Some(".feature")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), path);
    }

    #[test]
    fn directory_enumerates_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.feature"), "Feature: b\n").unwrap();
        fs::write(dir.path().join("a.FEATURE"), "Feature: a\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a feature").unwrap();

        let found = Fs
            .resources(&dir.path().display().to_string(), Some(".feature"))
            .unwrap();
        let names = found
            .iter()
            .map(|r| {
                Path::new(r.path())
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect::<Vec<_>>();
        assert_eq!(names, ["a.FEATURE", "b.feature"]);
    }

    #[test]
    fn no_suffix_enumerates_everything() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rerun.txt"), "a.feature:2").unwrap();

        let found = Fs
            .resources(&dir.path().display().to_string(), None)
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
