//! Debug middleware logging the client address of every request.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{Ready, ready};
use tracing::info;

/// Logs the peer address (`ip_address`) of each incoming request.
///
/// Installed only outside production.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp;

impl<S, B> Transform<S, ServiceRequest> for ClientIp
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ClientIpMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClientIpMiddleware { service }))
    }
}

/// Service wrapper produced by [`ClientIp`].
pub struct ClientIpMiddleware<S> {
    service: S,
}

/// Peer address of the request, or `"unknown"` when the transport has none.
pub fn client_ip(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}

impl<S, B> Service<ServiceRequest> for ClientIpMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        info!(
            ip_address = %client_ip(&req),
            method = %req.method(),
            path = req.path(),
            "incoming request"
        );
        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    fn reads_peer_address() {
        let req = actix_test::TestRequest::default()
            .peer_addr("203.0.113.7:4242".parse().expect("socket addr"))
            .to_srv_request();
        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[rstest]
    fn falls_back_when_peer_is_missing() {
        let req = actix_test::TestRequest::default().to_srv_request();
        assert_eq!(client_ip(&req), "unknown");
    }

    #[actix_web::test]
    async fn passes_requests_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(ClientIp)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert!(res.status().is_success());
    }
}
