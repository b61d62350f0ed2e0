// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts
)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_crate_dependencies
)]

pub mod feature;
pub mod filter;
pub mod out;
pub mod resource;
pub mod select;
pub mod stats;

// Not used directly, but dev-only consumers shouldn't trip
// `unused_crate_dependencies`.
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;

pub use gherkin;

#[doc(inline)]
pub use crate::{
    filter::{Filter, FilterSet},
    out::Coloring,
    resource::{Loader, Resource},
    select::{load, FeaturePath, Selector},
    stats::{Rendering, RunStats, Status, SubCounts, Summary},
};
