//! # Spotify Integration Module
//!
//! Client-side integration with the Spotify Web API, covering the two
//! concerns the resolver needs from the catalog service: obtaining an access
//! token and fetching track metadata.
//!
//! ## Core Modules
//!
//! [`auth`] implements the OAuth 2.0 client-credentials exchange. The
//! application never acts on behalf of a user, so no authorization flow or
//! refresh token is involved; the client id and secret are combined into a
//! Basic authorization header and exchanged for a short-lived bearer token.
//! Scheduling of renewals lives in [`crate::token`], not here.
//!
//! [`catalog`] fetches raw album, playlist and single-track metadata. It is
//! pure request-and-decode: no matching logic, no retries, no caching.
//! Responses pass through the defensive decode boundary in [`crate::types`]
//! so malformed catalog data surfaces as a wrong-shape error instead of a
//! panic deep inside the resolver.
//!
//! ## API Coverage
//!
//! - `POST /api/token` — client-credentials token exchange
//! - `GET /albums/{id}/tracks` — album track listing
//! - `GET /playlists/{id}/tracks` — playlist track listing
//! - `GET /tracks/{id}` — single track metadata
//!
//! ## Error Handling
//!
//! Transport and HTTP-status failures propagate unmodified as
//! [`crate::Error::Http`]. An exchange that yields no usable token fails
//! with [`crate::Error::CredentialExchange`], which is fatal to the renewal
//! chain.

pub mod auth;
pub mod catalog;
