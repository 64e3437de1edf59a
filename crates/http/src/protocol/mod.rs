//! Core HTTP protocol abstractions and implementations.
//!
//! This module provides the data model the codec layer parses into and
//! serializes from: methods, versions, headers, form bodies, requests,
//! responses, parse outcomes and the error taxonomy.
//!
//! # Architecture
//!
//! The protocol module is organized into several key components:
//!
//! - **Request vocabulary**: [`Method`] and [`Version`] are strict enums,
//!   parsed by exact match against their wire tokens. Unknown tokens are
//!   rejections, never coerced near matches.
//!
//! - **Headers** ([`header`]): [`Header`] and [`HeaderMap`] keep original
//!   name case and insertion order; lookups are case-insensitive and the
//!   request path keeps the first occurrence of a duplicated name.
//!
//! - **Form bodies** ([`form`]): [`FormData`] and [`FormField`] are the
//!   common decoded shape for both supported body formats, with raw byte
//!   values and optional multipart metadata.
//!
//! - **Messages** ([`message`]): [`ParseOutcome`] and [`Rejection`] are the
//!   feed-result surface, [`BodyPlan`] carries the framing decision from
//!   the header stage to the body stage.
//!
//! - **Error Handling** ([`error`]): [`HttpError`] at the top level,
//!   [`ParseError`] with its one-variant-per-status taxonomy, and
//!   [`SendError`] for the response path.

mod method;
pub use method::Method;

mod version;
pub use version::Version;

mod header;
pub use header::Header;
pub use header::HeaderMap;

mod form;
pub use form::FormData;
pub use form::FormField;

mod request;
pub use request::Request;
pub use request::RequestHead;

mod response;
pub use response::Response;

mod message;
pub use message::BodyPlan;
pub use message::ParseOutcome;
pub use message::Rejection;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
