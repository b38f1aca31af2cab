use std::{fs::File, io::Write};

use huggingface::models::{
    text_to_image::{TextToImage, TextToImageRequest},
    Models,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::load_dotenv();
    let token = util::require_env("HF_TOKEN")?;

    let models = Models::new(&token)?;

    let result = models
        .stable_diffusion_xl_base(TextToImageRequest::new(
            "An astronaut riding a bike on Mars at sunset",
        ))
        .await?;

    File::create("image.png")?.write_all(&result)?;

    Ok(())
}
