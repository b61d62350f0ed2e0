// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io, str, str::FromStr};

use console::Style;
use derive_more::{Deref, DerefMut, Display, From, Into};

use crate::stats::Status;

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output
    /// should be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering [`Passed`] events.
    ///
    /// [`Passed`]: Status::Passed
    pub ok: Style,

    /// [`Style`] for rendering [`Skipped`] events.
    ///
    /// [`Skipped`]: Status::Skipped
    pub skipped: Style,

    /// [`Style`] for rendering errors and [`Failed`] events.
    ///
    /// [`Failed`]: Status::Failed
    pub err: Style,

    /// [`Style`] for rendering [`Pending`] and [`Undefined`] events.
    ///
    /// [`Pending`]: Status::Pending
    /// [`Undefined`]: Status::Undefined
    pub pending: Style,

    /// Indicates whether the output should be colored.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ok: Style::new().green(),
            skipped: Style::new().cyan(),
            err: Style::new().red(),
            pending: Style::new().yellow(),
            is_present: console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new monochrome [`Styles`], never coloring anything.
    #[must_use]
    pub fn monochrome() -> Self {
        let mut styles = Self::default();
        styles.apply_coloring(Coloring::Never);
        styles
    }

    /// Applies the given [`Coloring`] policy to these [`Styles`].
    ///
    /// [`Coloring::Always`] forces styling even when no terminal is
    /// attached to the output.
    pub fn apply_coloring(&mut self, color: Coloring) {
        self.is_present = match color {
            Coloring::Always => true,
            Coloring::Never => false,
            Coloring::Auto => console::colors_enabled(),
        };
        if matches!(color, Coloring::Always) {
            for style in
                [&mut self.ok, &mut self.skipped, &mut self.err, &mut self.pending]
            {
                *style = style.clone().force_styling(true);
            }
        }
    }

    /// Colors the given `input` with the [`Style`] of the given [`Status`],
    /// or leaves it "as is" if this [`Styles`] is monochrome.
    ///
    /// [`Unrecognized`] [`Status`]es have no [`Style`] and are always left
    /// uncolored.
    ///
    /// [`Unrecognized`]: Status::Unrecognized
    #[must_use]
    pub fn status<'a>(
        &self,
        status: Status,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if !self.is_present {
            return input.into();
        }
        let style = match status {
            Status::Passed => &self.ok,
            Status::Failed => &self.err,
            Status::Skipped => &self.skipped,
            Status::Pending | Status::Undefined => &self.pending,
            Status::Unrecognized => return input.into(),
        };
        style.apply_to(input.into()).to_string().into()
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

/// [`String`] wrapper implementing [`io::Write`].
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    DerefMut,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct WritableString(pub String);

impl io::Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.push_str(
            str::from_utf8(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
