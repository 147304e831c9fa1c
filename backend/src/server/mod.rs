//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Condition;
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use groundwork::doc::{ApiDoc, DocsInfo};
use groundwork::inbound::http::health::{HealthState, live, ready};
use groundwork::inbound::http::index::index;
use groundwork::inbound::http::state::HttpState;
use groundwork::inbound::http::{configure_api, extractor_config};
use groundwork::middleware::{ClientIp, SqlQueryLog, Trace};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    docs: DocsInfo,
    debug: bool,
    max_upload_bytes: usize,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        docs,
        debug,
        max_upload_bytes,
    } = deps;

    let (json_config, query_config) = extractor_config(max_upload_bytes);
    let mut openapi = ApiDoc::openapi();
    docs.modify(&mut openapi);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(Condition::new(debug, SqlQueryLog))
        .wrap(Condition::new(debug, ClientIp))
        .wrap(Trace)
        .service(index)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(Redoc::with_url("/api/schema/redoc/", openapi.clone()))
        .service(SwaggerUi::new("/api/swagger/{_:.*}").url("/api/schema/", openapi))
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        docs: config.docs.clone(),
        debug: config.debug(),
        max_upload_bytes: config.max_upload_bytes,
    };
    if deps.debug {
        info!("debug request observers enabled (client ip, sql log)");
    }

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
