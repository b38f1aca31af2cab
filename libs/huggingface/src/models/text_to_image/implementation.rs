use bytes::Bytes;

use crate::error::Error;
use crate::models::Models;

use super::{TextToImage, TextToImageRequest, STABLE_DIFFUSION_XL_BASE};

impl TextToImage for Models {
    async fn stable_diffusion_xl_base(
        &self,
        request: TextToImageRequest,
    ) -> Result<Bytes, Error> {
        if request.inputs.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        let body = serde_json::to_string(&request).unwrap();

        self.binary_response_with_retry(body, STABLE_DIFFUSION_XL_BASE)
            .await
    }
}
