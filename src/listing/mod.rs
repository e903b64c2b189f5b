//! Listing module
//!
//! Supports: bare listings, submission duplicates, flair listings
//!
//! # Overview
//!
//! Listing endpoints answer in one of three shapes. They are decoded into
//! [`ListingResponse`] at the fetch boundary and immediately normalized into
//! a [`Page`], so pagination logic only ever sees ordered items and an
//! `after` cursor.

mod types;

pub use types::{FlairEntry, FlairListing, Listing, ListingItem, ListingResponse, Page, Thing};
