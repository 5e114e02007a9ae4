//! Client-side catalog: filtering a fetched pet list and keeping favorites.
//!
//! - [`CatalogFilter`] - conjunctive type / age / gender / name filters
//! - [`Favorites`] - a persisted set of favorite pet ids
//! - [`ApiClient`] - the HTTP client the CLI uses to fetch pets

mod client;
mod favorites;
mod filter;

pub use client::ApiClient;
pub use favorites::Favorites;
pub use filter::{AgeBucket, CatalogFilter, ParseAgeBucketError, age_in_years};
