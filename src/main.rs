use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};

use sphere_tracer::scenes::{self, Preset};
use sphere_tracer::settings::{DEFAULT_GAMMA, DEFAULT_MAX_DEPTH, DEFAULT_SAMPLES};
use sphere_tracer::{render_frame, RenderSettings};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneArg {
    ThreeSpheres,
    Random,
}

impl From<SceneArg> for Preset {
    fn from(value: SceneArg) -> Self {
        match value {
            SceneArg::ThreeSpheres => Preset::ThreeSpheres,
            SceneArg::Random => Preset::Random,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Render a scene of spheres with a Monte Carlo ray tracer", long_about = None)]
struct Args {
    /// the built-in scene to render
    #[arg(long, value_enum, default_value = "random")]
    scene: SceneArg,
    /// where the rendered image is saved, format chosen by extension
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
    /// image width in pixels
    #[arg(short, long, default_value_t = 400)]
    width: u32,
    /// width divided by height
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect_ratio: f64,
    /// the number of rays shot per pixel
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
    samples: u32,
    /// maximum number of bounces per ray
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
    /// gamma applied when converting to 8 bit color
    #[arg(long, default_value_t = DEFAULT_GAMMA)]
    gamma: f64,
    /// seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// worker threads, defaults to one per core
    #[arg(short = 'j', long)]
    threads: Option<usize>,
    /// raise the log level, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let settings = RenderSettings::new(args.width, args.aspect_ratio)?
        .with_samples(args.samples)
        .with_max_depth(args.max_depth)
        .with_gamma(args.gamma)
        .with_seed(args.seed)
        .validated()?;

    let (scene, camera) = scenes::build(args.scene.into(), settings.aspect_ratio(), args.seed)?;
    let picture = render_frame(&scene, &camera, &settings)?;

    picture
        .save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    info!(target: "app", "Saved {}", args.output.display());
    Ok(())
}
