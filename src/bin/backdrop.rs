use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

use backdrop::{
    Backdrop, Container, ContainerKind, CpuSurfaceFactory, Fps, FrameIndex, FrameSink, Host,
    ParticleRing, PngSequenceSink, RingConfig, SinkConfig, StarField, StarFieldConfig, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the light ring as a PNG sequence.
    Ring(RenderArgs),
    /// Render the star field as a PNG sequence.
    Stars(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Optional JSON options (camelCase keys); missing keys use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1366)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Frames per second of the simulated display.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Ring(args) => cmd_render(ContainerKind::Ring, args),
        Command::Stars(args) => cmd_render(ContainerKind::Stars, args),
    }
}

fn read_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> anyhow::Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_render(kind: ContainerKind, args: RenderArgs) -> anyhow::Result<()> {
    let viewport = Viewport::new(args.width, args.height)?;
    let fps = Fps::new(args.fps, 1)?;
    let mut host = Host::new(viewport);
    let container = Container::new("cli", kind);
    let factory = CpuSurfaceFactory;

    let mut instance = match kind {
        ContainerKind::Ring => {
            let cfg: RingConfig = read_config(args.config.as_deref())?;
            Backdrop::Ring(ParticleRing::construct(&mut host, &container, cfg, &factory)?)
        }
        ContainerKind::Stars => {
            let cfg: StarFieldConfig = read_config(args.config.as_deref())?;
            Backdrop::Stars(StarField::construct(&mut host, &container, cfg, &factory)?)
        }
    };

    let mut sink = PngSequenceSink::new(&args.out);
    sink.begin(SinkConfig {
        width: viewport.width,
        height: viewport.height,
        fps,
    })?;
    for i in 0..args.frames {
        let idx = FrameIndex(i);
        if !instance.tick(&mut host, fps.frames_to_secs(i)) {
            anyhow::bail!("frame {i} was not scheduled");
        }
        let frame = instance
            .last_frame()
            .with_context(|| format!("frame {i} produced no pixels"))?;
        sink.push_frame(idx, frame)?;
    }
    sink.end()?;
    instance.dispose(&mut host);

    eprintln!("wrote {} frames to {}", args.frames, args.out.display());
    Ok(())
}
