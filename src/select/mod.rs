// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of textual selectors into [`Feature`]s to execute.
//!
//! [`Feature`]: gherkin::Feature

pub mod location;
pub mod rerun;

use std::io::{self, Read as _};

use derive_more::{Display, Error, From};
use gherkin::GherkinEnv;
use itertools::Itertools as _;

use crate::{
    feature::Ext as _,
    filter::FilterSet,
    out::WriteStrExt as _,
    resource::{self, Loader, Resource, EMBEDDED_SCHEME},
};

pub use self::location::{FeaturePath, Selector, RERUN_MARKER};

/// File extension of feature documents.
pub const FEATURE_EXTENSION: &str = ".feature";

/// Error of loading [`Feature`]s.
///
/// [`Feature`]: gherkin::Feature
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Failed to enumerate feature resources.
    #[display("{_0}")]
    Resource(resource::Error),

    /// Failed to read a feature resource or to write a diagnostic.
    #[display("{_0}")]
    Io(io::Error),

    /// Failed to parse a feature document.
    #[display("Failed to parse feature: {_0}")]
    Parse(gherkin::ParseError),

    /// Failed to expand a rerun manifest.
    #[display("{_0}")]
    Rerun(rerun::Error),
}

/// Resolves the given `selectors` into the filtered, ordered list of
/// [`Feature`]s to execute.
///
/// Selectors are processed in the given order, and each selector's
/// resources in their enumeration order, so identical inputs always
/// produce an identically ordered result. Rerun manifests are expanded
/// in place.
///
/// [`Scenario`]s are filtered by the given `filters` merged with any
/// per-document line restrictions carried by the selectors themselves;
/// [`Feature`]s left without [`Scenario`]s are dropped.
///
/// An empty result is a valid outcome, not an error: its cause is written
/// to the given `diagnostics` sink instead.
///
/// # Errors
///
/// If a resource fails to be enumerated, read or parsed, if a rerun
/// manifest fails to expand, or if writing into the given `diagnostics`
/// sink fails.
///
/// [`Feature`]: gherkin::Feature
/// [`Scenario`]: gherkin::Scenario
pub fn load<L: Loader + ?Sized>(
    loader: &L,
    selectors: &[String],
    filters: &FilterSet,
    diagnostics: &mut dyn io::Write,
) -> Result<Vec<gherkin::Feature>, Error> {
    if selectors.is_empty() {
        diagnostics
            .write_line("Got no path to feature directory or feature file")?;
        return Ok(vec![]);
    }

    let mut features = vec![];
    let mut located_any = false;
    for selector in selectors {
        match Selector::parse(selector) {
            Selector::Feature(path) => {
                located_any |= load_path(
                    loader,
                    &path,
                    filters,
                    &mut features,
                    Fallback::No,
                )?;
            }
            Selector::Rerun(manifest) => {
                // Paths recorded in a manifest may point at documents
                // embedded into the binary, so they get the fallback
                // lookup, unlike directly given paths.
                for path in rerun::expand(loader, &manifest)? {
                    located_any |= load_path(
                        loader,
                        &path,
                        filters,
                        &mut features,
                        Fallback::Embedded,
                    )?;
                }
            }
        }
    }

    if !located_any {
        diagnostics.write_line(format!(
            "No features found at [{}]",
            selectors.iter().join(", "),
        ))?;
    } else if features.is_empty() {
        diagnostics.write_line(format!(
            "None of the features at [{}] matched the filters: [{}]",
            selectors.iter().join(", "),
            filters,
        ))?;
    }
    Ok(features)
}

/// Whether a failed filesystem lookup should be retried with an
/// [`EMBEDDED_SCHEME`] resolution of the same logical path.
#[derive(Clone, Copy, Debug)]
enum Fallback {
    /// Propagate [`NotFound`] as is.
    ///
    /// [`NotFound`]: resource::Error::NotFound
    No,

    /// Retry with the [`EMBEDDED_SCHEME`] prefix.
    Embedded,
}

/// Loads, parses and filters the [`Feature`]s at the given [`FeaturePath`]
/// into `features`.
///
/// Returns whether any resource was located at the path, before any
/// filtering.
///
/// [`Feature`]: gherkin::Feature
fn load_path<L: Loader + ?Sized>(
    loader: &L,
    path: &FeaturePath,
    filters: &FilterSet,
    features: &mut Vec<gherkin::Feature>,
    fallback: Fallback,
) -> Result<bool, Error> {
    let resources = match fallback {
        Fallback::No => {
            loader.resources(&path.path, Some(FEATURE_EXTENSION))?
        }
        Fallback::Embedded => {
            fallback_resources(loader, &path.path, Some(FEATURE_EXTENSION))?
        }
    };

    let scoped = (!path.lines.is_empty())
        .then(|| filters.with_lines(&path.lines));
    let filters = scoped.as_ref().unwrap_or(filters);

    let located = !resources.is_empty();
    for res in &resources {
        let mut text = String::new();
        drop(res.open()?.read_to_string(&mut text)?);

        let mut feature =
            gherkin::Feature::parse(&text, GherkinEnv::default())?;
        feature.path = Some(res.path().into());

        // Tag filters evaluate over the `Feature`'s own tags too, so the
        // predicate needs the pre-filtering view of it.
        let ctx = feature.clone();
        let feature =
            feature.retain_scenarios(|sc| filters.retains(&ctx, sc));
        if feature.count_scenarios() > 0 {
            features.push(feature);
        }
    }
    Ok(located)
}

/// Enumerates the resources at the given `path`, retrying [`NotFound`]
/// with an [`EMBEDDED_SCHEME`] resolution of the same logical path.
///
/// If the retry is [`NotFound`] too, the original error is returned.
///
/// [`NotFound`]: resource::Error::NotFound
fn fallback_resources<'l, L: Loader + ?Sized>(
    loader: &'l L,
    path: &str,
    suffix: Option<&str>,
) -> Result<Vec<Box<dyn Resource + 'l>>, resource::Error> {
    match loader.resources(path, suffix) {
        Err(original)
            if original.is_not_found()
                && !path.starts_with(EMBEDDED_SCHEME) =>
        {
            match loader.resources(&format!("{EMBEDDED_SCHEME}{path}"), suffix)
            {
                Err(retried) if retried.is_not_found() => Err(original),
                other => other,
            }
        }
        other => other,
    }
}
