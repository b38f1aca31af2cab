pub mod implementation;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Error;

static STABLE_DIFFUSION_XL_BASE: &str =
    "stabilityai/stable-diffusion-xl-base-1.0";

/// Fixed negative prompt sent with every generation request.
pub static NEGATIVE_PROMPT: &str = "low quality, bad anatomy, blurry";

pub const DEFAULT_NUM_INFERENCE_STEPS: u32 = 50;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 7.5;

pub trait TextToImage {
    fn stable_diffusion_xl_base(
        &self,
        request: TextToImageRequest,
    ) -> impl std::future::Future<Output = Result<Bytes, Error>> + Send;
}

#[derive(Debug, Serialize)]
pub struct TextToImageRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub negative_prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            num_inference_steps: DEFAULT_NUM_INFERENCE_STEPS,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

impl TextToImageRequest {
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: GenerationParameters::default(),
        }
    }
}
