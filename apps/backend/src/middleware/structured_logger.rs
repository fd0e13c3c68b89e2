//! Emits one completion event per HTTP request.
//!
//! Levels follow the status class: 5xx at `error`, 4xx at `warn`, the rest
//! at `info`. A `101` is reported as `websocket_upgraded` instead of
//! `request_completed`; the socket's own lifetime is logged by its actor.
//!
//! Only the path is logged. Query strings can carry credentials
//! (`?token=` on the game socket) and are never recorded.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::middleware::request_trace::trace_id_of;
use crate::middleware::trace_span::game_id_from_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Upgraded,
    Ok,
    ClientError,
    ServerError,
}

impl Completion {
    fn of(status: StatusCode) -> Self {
        if status == StatusCode::SWITCHING_PROTOCOLS {
            Completion::Upgraded
        } else if status.is_server_error() {
            Completion::ServerError
        } else if status.is_client_error() {
            Completion::ClientError
        } else {
            Completion::Ok
        }
    }
}

struct RequestSummary {
    method: String,
    path: String,
    game_id: Option<String>,
    trace_id: String,
    started: Instant,
}

impl RequestSummary {
    fn of(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            game_id: game_id_from_path(req.path()).map(str::to_string),
            trace_id: trace_id_of(req),
            started: Instant::now(),
        }
    }

    fn emit(&self, status: StatusCode) {
        let duration_us = self.started.elapsed().as_micros() as u64;
        let status_code = status.as_u16();
        let game_id = self.game_id.as_deref();
        let (method, path, trace_id) = (&self.method, &self.path, &self.trace_id);

        match Completion::of(status) {
            Completion::Upgraded => {
                info!(http.method = %method, url.path = %path, game_id, duration_us, trace_id = %trace_id, message = "websocket_upgraded")
            }
            Completion::Ok => {
                info!(http.method = %method, url.path = %path, http.status_code = status_code, game_id, duration_us, trace_id = %trace_id, message = "request_completed")
            }
            Completion::ClientError => {
                warn!(http.method = %method, url.path = %path, http.status_code = status_code, game_id, duration_us, trace_id = %trace_id, message = "request_completed")
            }
            Completion::ServerError => {
                error!(http.method = %method, url.path = %path, http.status_code = status_code, game_id, duration_us, trace_id = %trace_id, message = "request_completed")
            }
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let summary = RequestSummary::of(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            summary.emit(status);
            result
        })
    }
}
