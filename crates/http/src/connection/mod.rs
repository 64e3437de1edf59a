//! HTTP connection handling module
//!
//! This module provides functionality for serving a single HTTP exchange
//! over an async transport. It connects the codec layer to a request
//! handler and owns the read-feed-respond loop.
//!
//! # Components
//!
//! - [`HttpConnection`]: Main connection handler that:
//!   - Reads raw chunks and feeds them to the request assembler
//!   - Dispatches complete requests to the handler
//!   - Answers rejections with their mapped status and reason
//!   - Closes the transport after the response
//!
//! # Features
//!
//! - Asynchronous I/O handling
//! - Incremental request assembly from arbitrarily sized reads
//! - Error handling with per-outcome responses
//! - One request per connection, no implicit keep-alive

mod http_connection;

pub use http_connection::HttpConnection;
