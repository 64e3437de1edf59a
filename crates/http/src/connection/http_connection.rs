use std::error::Error;
use std::sync::Arc;

use bytes::BytesMut;
use futures::SinkExt;
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, warn};

use crate::codec::{Limits, RequestAssembler, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, ParseOutcome, Rejection, Response};

/// Read chunk size, matching the default head size limit
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// An HTTP connection that serves one request and closes
///
/// `HttpConnection` drives the full lifecycle of a connection:
/// - Reading raw chunks from the transport
/// - Feeding them to the [`RequestAssembler`] until a terminal outcome
/// - Dispatching a complete request to the [`Handler`]
/// - Answering rejections with their taxonomy status and reason
/// - Writing the response and closing the transport
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
pub struct HttpConnection<R, W> {
    reader: R,
    framed_write: FramedWrite<W, ResponseEncoder>,
    assembler: RequestAssembler,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_limits(reader, writer, Limits::default())
    }

    pub fn with_limits(reader: R, writer: W, limits: Limits) -> Self {
        Self {
            reader,
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            assembler: RequestAssembler::with_limits(limits),
        }
    }

    /// Serves the connection to completion.
    ///
    /// A complete request is dispatched to the handler; a handler error
    /// turns into an empty 500 response. A refused request is answered with
    /// its rejection status and the reason as a plain text body. A peer
    /// that disconnects before completing a request is not answered at all.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        match self.read_outcome().await? {
            Some(ParseOutcome::Request(request)) => {
                info!(method = %request.method(), path = request.path(), "handling request");
                let response = match handler.call(request).await {
                    Ok(response) => response,
                    Err(e) => {
                        let cause: Box<dyn Error + Send + Sync> = e.into();
                        error!(cause = %cause, "handler failed");
                        Response::new(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                };
                self.framed_write.send(response).await?;
            }

            Some(ParseOutcome::Reject(rejection)) => {
                warn!(status = %rejection.status(), reason = rejection.reason(), "refusing request");
                self.framed_write.send(rejection_response(&rejection)).await?;
            }

            Some(ParseOutcome::NeedMoreData) => unreachable!("read_outcome only returns terminal outcomes"),

            None => {}
        }

        self.framed_write.close().await?;
        Ok(())
    }

    /// Reads transport chunks into the assembler until it reaches a
    /// terminal outcome, or `None` if the peer disconnects first.
    async fn read_outcome(&mut self) -> Result<Option<ParseOutcome>, HttpError> {
        let mut chunk = BytesMut::with_capacity(READ_CHUNK_SIZE);
        let mut saw_data = false;
        loop {
            chunk.clear();
            let read = self.reader.read_buf(&mut chunk).await.map_err(ParseError::io)?;
            if read == 0 {
                if saw_data {
                    debug!("connection closed before the request completed");
                }
                return Ok(None);
            }
            saw_data = true;

            match self.assembler.feed(&chunk) {
                ParseOutcome::NeedMoreData => continue,
                outcome => return Ok(Some(outcome)),
            }
        }
    }
}

fn rejection_response(rejection: &Rejection) -> Response {
    Response::new(rejection.status())
        .with_header("Content-Type", "text/plain; charset=UTF-8")
        .with_body(rejection.reason().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::make_handler;
    use crate::protocol::Request;
    use std::io;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn drive<H>(handler: H, wire: &[u8], half_close: bool) -> (Result<(), HttpError>, String)
    where
        H: Handler,
    {
        let (mut client, server) = tokio::io::duplex(4 * 1024);
        let (reader, writer) = tokio::io::split(server);
        let connection = HttpConnection::new(reader, writer);

        let client_io = async {
            client.write_all(wire).await.unwrap();
            if half_close {
                client.shutdown().await.unwrap();
            }
            let mut bytes = Vec::new();
            client.read_to_end(&mut bytes).await.unwrap();
            String::from_utf8(bytes).unwrap()
        };

        let (result, response) = tokio::join!(connection.process(Arc::new(handler)), client_io);
        (result, response)
    }

    fn echo_path_handler() -> impl Handler {
        make_handler(|request: Request| async move {
            Ok::<_, io::Error>(Response::new(StatusCode::OK).with_body(format!("path={}", request.path())))
        })
    }

    #[tokio::test]
    async fn serves_single_request() {
        let wire = b"GET /hello HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let (result, response) = drive(echo_path_handler(), wire, false).await;

        result.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Length: 11\r\n"));
        assert!(response.ends_with("path=/hello"));
    }

    #[tokio::test]
    async fn answers_rejection_with_reason_body() {
        let wire = b"FOO / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let (result, response) = drive(echo_path_handler(), wire, false).await;

        result.unwrap();
        assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert!(response.contains("Content-Type: text/plain; charset=UTF-8\r\n"));
        assert!(response.ends_with("method not allowed: FOO"));
    }

    #[tokio::test]
    async fn handler_error_becomes_500() {
        let handler = make_handler(|_request: Request| async move { Err::<Response, _>(io::Error::other("boom")) });
        let wire = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
        let (result, response) = drive(handler, wire, false).await;

        result.unwrap();
        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(response.contains("Content-Length: 0\r\n"));
    }

    #[tokio::test]
    async fn early_disconnect_is_not_answered() {
        let (result, response) = drive(echo_path_handler(), b"GET / HT", true).await;

        result.unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn body_arriving_in_pieces_is_served() {
        let (mut client, server) = tokio::io::duplex(4 * 1024);
        let (reader, writer) = tokio::io::split(server);

        let handler = make_handler(|request: Request| async move {
            let name = request.form().get("name").unwrap().value_str().into_owned();
            Ok::<_, io::Error>(Response::new(StatusCode::OK).with_body(name))
        });

        let client_io = async {
            client
                .write_all(
                    b"POST / HTTP/1.1\r\nHost: x\r\n\
                      Content-Type: application/x-www-form-urlencoded\r\nContent-Length: 9\r\n\r\n",
                )
                .await
                .unwrap();
            tokio::task::yield_now().await;
            client.write_all(b"name=").await.unwrap();
            tokio::task::yield_now().await;
            client.write_all(b"drip").await.unwrap();

            let mut bytes = Vec::new();
            client.read_to_end(&mut bytes).await.unwrap();
            String::from_utf8(bytes).unwrap()
        };

        let process = HttpConnection::new(reader, writer).process(Arc::new(handler));
        let (result, response) = tokio::join!(process, client_io);

        result.unwrap();
        assert!(response.ends_with("drip"));
    }
}
