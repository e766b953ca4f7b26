//! Request deadline middleware.
//!
//! Every request is bounded by an overall deadline. On expiry the caller
//! receives the INTERNAL timeout envelope, while the in-flight work is
//! spawned off to finish on its own — an open transaction always resolves
//! (commit or rollback) independently of the caller still waiting, so the
//! store is never left in a half-applied state.

use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::{Either, LocalBoxFuture, Ready, ready, select};
use tracing::{debug, warn};

use crate::inbound::http::error::ApiError;

/// Middleware bounding each request by a wall-clock deadline.
#[derive(Clone)]
pub struct Deadline {
    limit: Duration,
}

impl Deadline {
    /// Bound requests to `limit`.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Deadline
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = DeadlineMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DeadlineMiddleware {
            service,
            limit: self.limit,
        }))
    }
}

/// Service wrapper produced by [`Deadline`].
pub struct DeadlineMiddleware<S> {
    service: S,
    limit: Duration,
}

impl<S, B> Service<ServiceRequest> for DeadlineMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let limit = self.limit;
        let (http_req, payload) = req.into_parts();
        let timeout_req = http_req.clone();
        let fut = self
            .service
            .call(ServiceRequest::from_parts(http_req, payload));

        Box::pin(async move {
            let work = Box::pin(fut);
            let expiry = Box::pin(tokio::time::sleep(limit));

            match select(work, expiry).await {
                Either::Left((result, _)) => result.map(ServiceResponse::map_into_left_body),
                Either::Right(((), abandoned)) => {
                    warn!(path = %timeout_req.path(), "request exceeded its deadline");
                    // Abandoned from the caller's perspective only: the work
                    // keeps running so its transaction can commit or roll
                    // back on its own.
                    actix_web::rt::spawn(async move {
                        match abandoned.await {
                            Ok(_) => debug!("deadline-abandoned request completed"),
                            Err(error) => {
                                debug!(error = %error, "deadline-abandoned request failed");
                            }
                        }
                    });

                    let response = ApiError::timeout().error_response();
                    Ok(ServiceResponse::new(timeout_req, response).map_into_right_body())
                }
            }
        })
    }
}
