use std::error::Error;
use std::sync::Arc;

use http::StatusCode;
use tokio::net::TcpListener;

use drip_http::connection::HttpConnection;
use drip_http::handler::make_handler;
use drip_http::protocol::{Request, Response};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 8080, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    let handler = Arc::new(make_handler(echo));
    loop {
        let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        let handler = handler.clone();

        tokio::spawn(async move {
            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::new(reader, writer);
            match connection.process(handler).await {
                Ok(_) => {
                    info!("finished process, connection shutdown");
                }
                Err(e) => {
                    error!("service has error, cause {}, connection shutdown", e);
                }
            }
        });
    }
}

async fn echo(request: Request) -> Result<Response, Box<dyn Error + Send + Sync>> {
    let mut body = format!("{} {} {}\r\n", request.method(), request.url(), request.version());
    for field in request.form().iter() {
        body.push_str(&format!("{} = {}\r\n", field.name(), field.value_str()));
    }

    Ok(Response::new(StatusCode::OK).with_header("Content-Type", "text/plain; charset=UTF-8").with_body(body))
}
