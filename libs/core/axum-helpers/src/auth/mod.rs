//! Shared-secret authentication for machine callers (schedulers, cron jobs).
//!
//! ```rust
//! use axum::http::{header, HeaderMap, HeaderValue};
//! use axum_helpers::auth::{bearer_token, TriggerToken};
//!
//! let token = TriggerToken::new("s3cret");
//! let mut headers = HeaderMap::new();
//! headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
//!
//! assert!(bearer_token(&headers).is_some_and(|t| token.verify(t)));
//! ```

mod token;

pub use token::{bearer_token, TriggerToken};
