use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use countdown_gif::{
    CountdownParams, CountdownSession, FrameIndex, GifEncodeOpts, InstantDef, Labels, NumberDef,
    RenderOptions, RenderThreading, parse_instant_ms,
};

#[derive(Parser, Debug)]
#[command(name = "countdown-gif", version)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the looping countdown GIF.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// JSON params file (`endDate`, `bgColor`, `textColor`, `fontSize`, `width`, `labels`).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Target instant: epoch ms, RFC 3339, or `YYYY-MM-DD[ HH:MM[:SS]]` (UTC).
    #[arg(long)]
    target: Option<String>,

    /// Render instant; defaults to the current time.
    #[arg(long)]
    now: Option<String>,

    /// Background color (`#RRGGBB`).
    #[arg(long)]
    bg: Option<String>,

    /// Foreground color (`#RRGGBB`).
    #[arg(long)]
    fg: Option<String>,

    /// Digit font size, clamped to [16, 60].
    #[arg(long)]
    font_size: Option<String>,

    /// Canvas width in pixels, clamped to [200, 800].
    #[arg(long)]
    width: Option<String>,

    /// Use English unit captions.
    #[arg(long, default_value_t = false)]
    english: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per loop.
    #[arg(long, default_value_t = 10)]
    frames: u64,

    /// Per-frame delay in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u32,

    /// Play the animation once instead of looping.
    #[arg(long, default_value_t = false)]
    no_loop: bool,

    /// Palette sampling factor in [1, 30]; lower is slower and more faithful.
    #[arg(long, default_value_t = 10)]
    quality: i32,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Rasterize every frame even when consecutive frames are identical.
    #[arg(long, default_value_t = false)]
    no_elision: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (request, now_ms) = resolve(&args.style)?;
    let opts = RenderOptions {
        frame_count: args.index.saturating_add(1),
        ..RenderOptions::default()
    };
    let mut sess = CountdownSession::new(request, opts)?;
    let frame = sess.render_frame(now_ms, FrameIndex(args.index))?;

    create_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (request, now_ms) = resolve(&args.style)?;
    let opts = RenderOptions {
        frame_count: args.frames,
        encode: GifEncodeOpts {
            frame_delay_ms: args.delay_ms,
            loop_forever: !args.no_loop,
            palette_quality: args.quality,
        },
        threading: RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
            static_frame_elision: !args.no_elision,
        },
    };
    let sess = CountdownSession::new(request, opts)?;
    let anim = sess.render_gif(now_ms)?;

    create_parent(&args.out)?;
    std::fs::write(&args.out, anim.bytes())
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), anim.len());
    Ok(())
}

/// Merge the params file with flag overrides and resolve it at the render instant.
fn resolve(style: &StyleArgs) -> anyhow::Result<(countdown_gif::RenderRequest, i64)> {
    let mut params = match &style.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read params '{}'", path.display()))?;
            CountdownParams::from_json_str(&text)
                .with_context(|| format!("parse params '{}'", path.display()))?
        }
        None => CountdownParams::default(),
    };

    if let Some(target) = &style.target {
        params.end_date = Some(InstantDef::Text(target.clone()));
    }
    if let Some(bg) = &style.bg {
        params.bg_color = Some(bg.clone());
    }
    if let Some(fg) = &style.fg {
        params.text_color = Some(fg.clone());
    }
    if let Some(size) = &style.font_size {
        params.font_size = Some(NumberDef::Text(size.clone()));
    }
    if let Some(width) = &style.width {
        params.width = Some(NumberDef::Text(width.clone()));
    }
    if style.english {
        params.labels = Some(Labels::english());
    }

    let now_ms = match &style.now {
        Some(now) => parse_instant_ms(now).context("parse --now")?,
        None => chrono::Utc::now().timestamp_millis(),
    };
    let request = params.into_request(now_ms)?;
    tracing::debug!(target_ms = request.target_ms, now_ms, "resolved countdown request");
    Ok((request, now_ms))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
