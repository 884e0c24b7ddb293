//! CineClaw CLI - LTX-2 video generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use cineclaw::{
    resolve_output_path, CostEstimate, JobMode, LtxClient, LtxModel, MediaSource, Resolution,
    VideoRequest,
};

#[derive(Parser)]
#[command(name = "cineclaw")]
#[command(about = "Generate videos via the LTX-2 API (text/image/audio-to-video)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a video from a text prompt
    T2v(GenerateArgs),

    /// Animate a source image (requires --image)
    I2v(GenerateArgs),

    /// Generate visuals for a source audio track (requires --audio)
    A2v(GenerateArgs),

    /// Print a cost estimate without calling the API
    Estimate(EstimateArgs),

    /// Check API connectivity and credentials
    Test,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// The text prompt: scene description (t2v), motion (i2v), or visuals (a2v)
    prompt: String,

    /// Model: ltx-2-fast or ltx-2-pro (a2v always uses ltx-2-pro)
    #[arg(long, default_value = "ltx-2-fast")]
    model: String,

    /// Resolution: 1080p, 1440p, 4k, or full format like 1920x1080
    #[arg(long, default_value = "1080p")]
    resolution: String,

    /// Clip length in seconds (ignored for a2v)
    #[arg(long, default_value_t = cineclaw::DEFAULT_DURATION_SECS)]
    duration: u32,

    /// Frame rate, 25 or 50 (ignored for a2v)
    #[arg(long, default_value_t = cineclaw::DEFAULT_FPS)]
    fps: u32,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Camera motion preset (dolly_in, dolly_out, pan_left, pan_right,
    /// crane_up, crane_down, static, handheld)
    #[arg(long)]
    camera: Option<String>,

    /// Disable generated audio (ignored for a2v)
    #[arg(long)]
    no_audio: bool,

    /// Source image for i2v: local path or https URL
    #[arg(long)]
    image: Option<String>,

    /// Source audio for a2v: local path or https URL
    #[arg(long)]
    audio: Option<String>,

    /// Write the video to this exact path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the generated filename (default: ~/Desktop/cineclaw)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EstimateArgs {
    /// Model: ltx-2-fast or ltx-2-pro
    #[arg(long, default_value = "ltx-2-fast")]
    model: String,

    /// Resolution: 1080p, 1440p, 4k, or full format like 1920x1080
    #[arg(long, default_value = "1080p")]
    resolution: String,

    /// Clip length in seconds
    #[arg(long, default_value_t = cineclaw::DEFAULT_DURATION_SECS)]
    duration: u32,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Tracing goes to stderr, gated on RUST_LOG, so --json stdout stays clean.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::T2v(args) => generate(JobMode::TextToVideo, args, cli.json).await,
        Commands::I2v(args) => generate(JobMode::ImageToVideo, args, cli.json).await,
        Commands::A2v(args) => generate(JobMode::AudioToVideo, args, cli.json).await,
        Commands::Estimate(args) => estimate(args, cli.json),
        Commands::Test => test_connection(cli.json).await,
    }
}

fn build_request(mode: JobMode, args: &GenerateArgs) -> anyhow::Result<VideoRequest> {
    let model: LtxModel = args.model.parse()?;
    let resolution: Resolution = args.resolution.parse()?;

    let mut request = match mode {
        JobMode::TextToVideo => VideoRequest::text_to_video(&args.prompt),
        JobMode::ImageToVideo => {
            let image = args
                .image
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("image-to-video requires --image"))?;
            VideoRequest::image_to_video(&args.prompt, MediaSource::from_arg(image))
        }
        JobMode::AudioToVideo => {
            let audio = args
                .audio
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("audio-to-video requires --audio"))?;
            VideoRequest::audio_to_video(&args.prompt, MediaSource::from_arg(audio))
        }
    };

    request = request
        .with_model(model)
        .with_resolution(resolution)
        .with_duration(args.duration)
        .with_fps(args.fps);

    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }
    if let Some(camera) = &args.camera {
        request = request.with_camera_motion(camera.parse()?);
    }
    if args.no_audio {
        request = request.without_audio();
    }

    Ok(request)
}

async fn generate(mode: JobMode, args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let request = build_request(mode, &args)?;
    request.validate()?;

    let estimate = CostEstimate::for_request(&request);

    if !json_output {
        println!("{estimate}");
        println!();
        println!(
            "[{}] Generating: {}",
            mode.as_str().to_uppercase(),
            truncate_prompt(&request.prompt, 80)
        );
        print!(
            "  Model: {} | Resolution: {}",
            request.effective_model(),
            request.effective_resolution()
        );
        if mode != JobMode::AudioToVideo {
            print!(" | Duration: {}s @ {}fps", request.duration_secs, request.fps);
        }
        println!();
        println!("  Generating... (this may take 10-90 seconds)");
        println!();
    }

    let client = LtxClient::builder().build()?;
    let video = client.generate(&request).await?;

    let path = resolve_output_path(
        args.output.as_deref(),
        args.output_dir.as_deref(),
        mode,
        request.effective_model(),
    )?;
    video.save(&path)?;

    let cost = video.metadata.cost_usd.unwrap_or(estimate.total);

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "mode": mode.as_str(),
            "output": path.display().to_string(),
            "size_bytes": video.size(),
            "model": request.effective_model().as_str(),
            "resolution": request.effective_resolution().as_str(),
            "cost_usd": cost,
            "generation_ms": video.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} Video saved: {}", "✓".green(), path.display());
        println!("  Size: {:.1} MB", video.size() as f64 / (1024.0 * 1024.0));
        println!("  Cost: ~${cost:.2}");
        if let Some(ms) = video.metadata.duration_ms {
            println!("  Generation time: {ms}ms");
        }
    }

    Ok(())
}

fn estimate(args: EstimateArgs, json_output: bool) -> anyhow::Result<()> {
    let model: LtxModel = args.model.parse()?;
    let resolution: Resolution = args.resolution.parse()?;
    let est = CostEstimate::new(model, resolution, args.duration);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&est)?);
    } else {
        println!("{est}");
    }
    Ok(())
}

async fn test_connection(json_output: bool) -> anyhow::Result<()> {
    let client = LtxClient::builder().build()?;
    client.health_check().await?;

    if json_output {
        println!("{}", serde_json::json!({ "reachable": true }));
    } else {
        println!("{} LTX API reachable", "OK".green().bold());
    }
    Ok(())
}

fn truncate_prompt(prompt: &str, max_chars: usize) -> String {
    if prompt.chars().count() <= max_chars {
        prompt.to_string()
    } else {
        let head: String = prompt.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
