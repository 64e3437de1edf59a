//! An incremental HTTP/1.x request reader and connection state machine
//!
//! This crate turns a stream of raw bytes into fully parsed HTTP requests,
//! one stage at a time. Bytes can arrive in any slicing, from single bytes
//! to whole pipelined messages, and the parser commits consumed input only
//! when a stage completes. It focuses on a strict, predictable protocol
//! surface: every way a request can be refused maps to exactly one status
//! code.
//!
//! # Features
//!
//! - Incremental parsing driven by whatever bytes are available
//! - Typed request line parsing with strict method and version sets
//! - Header block validation with first-wins duplicate handling
//! - Content-Length framed bodies decoded into form data
//! - `application/x-www-form-urlencoded` and `multipart/form-data` support
//! - Head, header count and body size limits with 431/413 rejections
//! - Response serialization with mandatory framing headers
//! - Clean error handling with per-error status codes
//!
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use std::sync::Arc;
//! use http::StatusCode;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use drip_http::connection::HttpConnection;
//! use drip_http::handler::make_handler;
//! use drip_http::protocol::{Request, Response};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     info!(port = 8080, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(_) => {
//!                     info!("finished process, connection shutdown");
//!                 }
//!                 Err(e) => {
//!                     error!("service has error, cause {}, connection shutdown", e);
//!                 }
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Box<dyn Error + Send + Sync>> {
//!     info!("request path {}", request.path());
//!
//!     for field in request.form().iter() {
//!         info!(name = field.name(), value = %field.value_str(), "received form field");
//!     }
//!
//!     Ok(Response::new(StatusCode::OK).with_body("Hello World!\r\n"))
//! }
//! ```
//!
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: Protocol types and abstractions
//! - [`codec`]: Protocol encoding/decoding implementation
//! - [`connection`]: Thin per-connection driver
//! - [`handler`]: Request handler traits and utilities
//!
//!
//!
//! # Core Components
//!
//! ## Request Assembly
//!
//! The [`codec::RequestAssembler`] type is the push-style entry point: feed
//! it byte slices as they arrive and it answers with a
//! [`protocol::ParseOutcome`], either a request for dispatch, a rejection to
//! answer, or a signal that more bytes are needed. Terminal outcomes stick
//! until the assembler is reset, so one decision is made per request no
//! matter how the bytes were sliced.
//!
//! Underneath, [`codec::RequestDecoder`] implements `tokio_util`'s
//! `Decoder` for pull-style use over framed transports.
//!
//! ## Connection Handling
//!
//! The [`connection::HttpConnection`] type drives one exchange end-to-end:
//! it reads transport chunks, feeds the assembler, dispatches the request to
//! a handler implementing [`handler::Handler`] and writes the response
//! through the [`codec::ResponseEncoder`]. Refused requests are answered
//! with their taxonomy status and a plain text reason.
//!
//! ## Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing errors, each mapped to the
//!   status the rejection response carries
//! - [`protocol::SendError`]: Response sending errors
//!
//! # Limitations
//!
//! - HTTP/1.x request lines only (HTTP/2 and HTTP/3 are not supported)
//! - No TLS support (use a reverse proxy for HTTPS)
//! - Chunked transfer encoding is refused with a 501 response
//! - Bodies are decoded as forms; other content types are refused with 501
//! - Maximum head size: 8KB
//! - Maximum number of headers: 64
//! - Maximum body size: 1MB

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
