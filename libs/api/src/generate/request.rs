use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, IntoParams)]
pub struct GenerateImageRequest {
    pub prompt: String,
    /// Sampling steps, defaults to 50
    pub num_inference_steps: Option<u32>,
    /// Guidance scale, defaults to 7.5
    pub guidance_scale: Option<f32>,
    /// Output container: png, jpg, jpeg or webp. Defaults to png
    pub format: Option<String>,
    /// Run the prompt enhancer before generation
    pub enhance: Option<bool>,
}
