//! Basic text-to-video generation.
//!
//! Run with: `cargo run --example generate_video`
//!
//! Requires the `LTX_API_KEY` environment variable.

use cineclaw::{LtxClient, VideoRequest};

#[tokio::main]
async fn main() -> cineclaw::Result<()> {
    let client = LtxClient::builder().build()?;

    let request = VideoRequest::text_to_video("Ocean waves crashing on a rocky shore at sunset")
        .with_duration(6);

    println!("Generating video (this may take a few minutes)...");
    let video = client.generate(&request).await?;

    video.save("waves.mp4")?;
    println!(
        "Generated video: {} bytes, cost: {:?}",
        video.size(),
        video.metadata.cost_usd
    );

    Ok(())
}
