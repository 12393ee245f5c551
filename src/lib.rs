#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! Outbound Webmention delivery for publishing backends.
//!
//! The crate covers the sending side of the protocol: extracting candidate
//! targets from rendered HTML, deciding when a content change should notify
//! them, and performing the SSRF-hardened protocol POST per target. The
//! receiving side (validating inbound webmentions) is out of scope; the
//! [`mention::Mention`] entity models the stored record it produces.

pub mod config;
pub mod error;
pub mod links;
pub mod mention;
pub mod security;
pub mod sending;

pub use config::SendingConfig;
pub use error::{OutmentionError, Result, SendError, ValidationError};
pub use mention::{Mention, MentionData, MentionEvent, SourceMetadata};
pub use sending::{
    ContentChangeEvent, ContentResource, ContentStatus, MentionDispatcher, OutboundNotification,
    SafeHttpSender,
};
