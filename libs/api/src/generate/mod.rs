use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use huggingface::models::text_to_image::{
    GenerationParameters, TextToImage, TextToImageRequest,
};
use tracing::info;

pub mod request;

use crate::codec::{self, OutputFormat};
use crate::enhancer::enhance;
use crate::response::{ApiError, ApiResponse};
use crate::ApiState;

use self::request::GenerateImageRequest;

/// Generate an image from a text prompt
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateImageRequest,
    responses(
        (status = 200, description = "Generate an image successfully"),
        (status = 400, description = "Empty prompt or unsupported format"),
        (status = 500, description = "Upstream generation failed")
    )
)]
pub async fn generate_image(
    State(state): State<ApiState>,
    Json(body): Json<GenerateImageRequest>,
) -> ApiResponse<Response> {
    if body.prompt.trim().is_empty() {
        return Err(ApiError::ClientError(
            "prompt cannot be empty".to_string(),
        ));
    }

    let format = match body.format.as_deref() {
        Some(name) => OutputFormat::parse(name)?,
        None => OutputFormat::default(),
    };

    let inputs = if body.enhance.unwrap_or(false) {
        enhance(&body.prompt)
    } else {
        body.prompt.trim().to_string()
    };

    let mut parameters = GenerationParameters::default();
    if let Some(steps) = body.num_inference_steps {
        parameters.num_inference_steps = steps;
    }
    if let Some(guidance) = body.guidance_scale {
        parameters.guidance_scale = guidance;
    }

    info!(
        steps = parameters.num_inference_steps,
        guidance = parameters.guidance_scale,
        %format,
        "generating image"
    );

    let bytes = state
        .huggingface
        .stable_diffusion_xl_base(TextToImageRequest { inputs, parameters })
        .await?;

    let image = codec::decode(bytes.as_ref())?;
    let payload = codec::encode(&image, format)?;

    let headers = [
        (header::CONTENT_TYPE, format.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"image.{}\"", format.extension()),
        ),
    ];

    Ok((headers, payload).into_response())
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::post,
        Router,
    };
    use http_body_util::BodyExt;
    use huggingface::models::Models;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use tower::util::ServiceExt;

    use crate::{app, ApiState};

    fn upstream_png() -> Vec<u8> {
        let image = RgbImage::from_pixel(4, 4, Rgb([10, 120, 200]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    /// Fake inference endpoint returning a valid PNG for any model path.
    async fn spawn_upstream(hits: Arc<AtomicUsize>) -> String {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let router = Router::new().route(
            "/stabilityai/stable-diffusion-xl-base-1.0",
            post(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    upstream_png()
                }
            }),
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", address)
    }

    async fn test_app(hits: Arc<AtomicUsize>) -> Router {
        let base_url = spawn_upstream(hits).await;
        let huggingface =
            Models::with_base_url("test-token", base_url).unwrap();

        app(ApiState { huggingface })
    }

    fn generate_request(json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_before_upstream() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits.clone()).await;

        let response = app
            .oneshot(generate_request(r#"{"prompt": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body =
            response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"prompt cannot be empty");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected_before_upstream() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits.clone()).await;

        let response = app
            .oneshot(generate_request(
                r#"{"prompt": "a cat", "format": "gif"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body =
            response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body)
            .contains("png, jpg, jpeg, webp"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generated_image_is_transcoded_to_requested_format() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits.clone()).await;

        let response = app
            .oneshot(generate_request(
                r#"{"prompt": "a cat", "format": "jpg", "enhance": true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "image/jpeg"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"image.jpg\""
        );

        let body =
            response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            image::guess_format(&body).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_format_is_png() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits).await;

        let response = app
            .oneshot(generate_request(r#"{"prompt": "a cat"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn test_healthz_responds_ok() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test_app(hits).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
