//! # parasut-rs
//!
//! A Rust client library for the Parasut accounting API.
//!
//! Every resource lives under a company, so a [`Config`] carries the company id next to
//! the OAuth credentials. Resources travel in JSON:API envelopes and are exposed as
//! [`Resource`] values holding typed attribute and relationship records.
//!
//! ```no_run
//! use parasut_rs::{Client, Config, ListParameters};
//!
//! # async fn run() -> parasut_rs::error::Result<()> {
//! let config = Config::new("client-id", "client-secret", "urn:ietf:wg:oauth:2.0:oob", 123);
//! let mut client = Client::new(config)?;
//! client.authenticate_with_password("user@example.com", "password").await?;
//!
//! let accounts = client
//!     .accounts()
//!     .list(&ListParameters::builder().with_page_size(25))
//!     .await?;
//! for account in accounts.data {
//!     println!("{}: {}", account.id, account.attributes.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors and tracing
//!
//! Operations are instrumented with `tracing`. API errors capture a
//! [`SpanTrace`] when they are created, so installing `tracing_error::ErrorLayer`
//! in your subscriber gives every [`Error::Api`] the async call context it came from:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod oauth;
pub mod utils;

pub use client::Client;
pub use config::Config;
pub use endpoints::{Collection, ParasutEndpoint};
pub use entities::{
    Currency, ListParameters, ListResponse, Meta, NoRelationships, Relationship,
    RelationshipData, Resource, ResourceType,
};
pub use error::{ApiError, Error, ErrorResponse};
pub use oauth::Token;

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
