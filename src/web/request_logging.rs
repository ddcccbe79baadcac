use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{Request, Response};
use tower::{Layer, Service};
use tracing::{debug, info, warn};

use crate::metrics::generate_request_id;

/// A Tower layer that logs every HTTP request with its status and duration.
#[derive(Clone, Copy)]
pub struct RequestLoggingLayer;

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggingService { inner }
    }
}

/// A Tower service that logs HTTP requests and responses.
#[derive(Clone)]
pub struct RequestLoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let request_id = generate_request_id();
        let method = req.method().clone();
        // Query strings stay out of the logs.
        let path = req.uri().path().to_string();

        debug!(
            request_id = %request_id,
            http.method = %method,
            http.path = %path,
            "HTTP request started"
        );

        // The clone may not be ready; keep the service that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let result = inner.call(req).await;
            let duration_ms = start.elapsed().as_millis();

            match &result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() {
                        warn!(
                            request_id = %request_id,
                            http.method = %method,
                            http.path = %path,
                            http.status = status.as_u16(),
                            duration_ms = %duration_ms,
                            "HTTP request failed"
                        );
                    } else {
                        info!(
                            request_id = %request_id,
                            http.method = %method,
                            http.path = %path,
                            http.status = status.as_u16(),
                            duration_ms = %duration_ms,
                            "HTTP request completed"
                        );
                    }
                }
                Err(_) => {
                    warn!(
                        request_id = %request_id,
                        http.method = %method,
                        http.path = %path,
                        duration_ms = %duration_ms,
                        "HTTP request errored"
                    );
                }
            }

            result
        })
    }
}
