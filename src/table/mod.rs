//! Tabular feature input.
//!
//! A [`FeatureCollection`] is a set of uniquely-named string columns of
//! equal length. One of them may be the overflow column holding packed tag
//! blobs (see [`crate::codec`]); by default it is named
//! [`OVERFLOW_COLUMN`].

mod collection;

pub use collection::{Column, FeatureCollection, OVERFLOW_COLUMN};
