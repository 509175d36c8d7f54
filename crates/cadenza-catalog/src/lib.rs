// SPDX-License-Identifier: GPL-3.0-or-later

//! Client-side helpers for the Cadenza catalog backend.
//!
//! This crate formats artwork URLs, maps screen-size categories to artwork
//! dimensions and wraps the read-only `/api/catalog` endpoints. Endpoints
//! that are scoped to a region read the current storefront from an injected
//! [`StorefrontProvider`].

pub mod artwork;
pub mod client;
pub mod error;
pub mod models;
pub mod storefront;

pub use artwork::{artwork_size, artwork_url, format_artwork_url, ScreenSize};
pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::{CatalogError, Result};
pub use models::{songs_from_collection, Collection, Relationships, Song, TrackRelationship};
pub use storefront::{SharedStorefront, StaticStorefront, StorefrontProvider};
