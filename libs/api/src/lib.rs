use axum::{routing::get, routing::post, Router};

use huggingface::models::Models;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;
use utoipauto::utoipauto;

pub mod codec;
pub mod enhancer;
pub mod generate;
pub mod healthz;
mod index;
pub mod not_found;
mod response;

#[derive(Clone, Debug)]
pub struct ApiState {
    huggingface: Models,
}

pub async fn serve(token: String, config_name: &str) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let config = util::load_config(config_name)?;
    let base_url = config["huggingface"]["base_url"]
        .as_str()
        .unwrap()
        .to_string();

    let huggingface = Models::with_base_url(&token, base_url)?;

    Ok(app(ApiState { huggingface }))
}

fn app(state: ApiState) -> Router {
    #[utoipauto(paths = "./libs/api/src")]
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "generate", description = "Text to image generation API")
        )
    )]
    struct ApiDoc;

    // generation
    let generate_router = Router::new()
        .route("/generate", post(generate::generate_image))
        .fallback(not_found::get_404)
        .with_state(state);

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/", get(index::get_index))
        .route("/healthz", get(healthz::get_health))
        .nest("/api", generate_router)
        .layer(CorsLayer::permissive())
        .fallback(not_found::get_404)
}
