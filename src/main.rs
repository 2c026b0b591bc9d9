//! Tress CLI - inspect, validate, and densify HAIR strand-geometry assets.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use walkdir::WalkDir;

use tress::prelude::*;

/// Tress - HAIR strand-geometry inspection and densification tool
#[derive(Parser)]
#[command(name = "tress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header fields and a geometry summary for HAIR files
    Info {
        /// HAIR files to inspect
        files: Vec<PathBuf>,
    },

    /// Batch-validate HAIR files, recursing into directories
    Check {
        /// Files or directories to validate
        paths: Vec<PathBuf>,
    },

    /// Load, augment, and re-export a denser asset
    Densify {
        /// Input HAIR file
        #[arg(short, long, env = "INPUT_HAIR")]
        input: PathBuf,

        /// Output HAIR file
        #[arg(short, long, env = "OUTPUT_HAIR")]
        output: PathBuf,

        /// Strand-density multiplier (>= 1, fractional values allowed)
        #[arg(short, long)]
        density: f32,

        /// Length-disparity factor in [0, 1]
        #[arg(long, default_value_t = 0.0)]
        disparity: f32,

        /// RNG seed for reproducible augmentation
        #[arg(long)]
        seed: Option<u64>,

        /// Curve degree used for the segment summary
        #[arg(long, value_enum, default_value_t = Degree::Cubic)]
        degree: Degree,

        /// Rewrite per-point thickness before export
        #[arg(long, value_enum)]
        radius_mode: Option<RadiusArg>,

        /// Produce one half of a bilaterally split asset
        #[arg(long, value_enum)]
        side: Option<SideArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Degree {
    Linear,
    Quadratic,
    Cubic,
}

impl From<Degree> for SplineMode {
    fn from(degree: Degree) -> Self {
        match degree {
            Degree::Linear => SplineMode::Linear,
            Degree::Quadratic => SplineMode::Quadratic,
            Degree::Cubic => SplineMode::Cubic,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RadiusArg {
    Constant,
    Tapered,
}

impl From<RadiusArg> for RadiusMode {
    fn from(mode: RadiusArg) -> Self {
        match mode {
            RadiusArg::Constant => RadiusMode::ConstantR,
            RadiusArg::Tapered => RadiusMode::TaperedR,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Left => Side::Left,
            SideArg::Right => Side::Right,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { files } => {
            cmd_info(&files)?;
        }
        Commands::Check { paths } => {
            cmd_check(&paths)?;
        }
        Commands::Densify {
            input,
            output,
            density,
            disparity,
            seed,
            degree,
            radius_mode,
            side,
        } => {
            cmd_densify(
                &input,
                &output,
                density,
                disparity,
                seed,
                degree,
                radius_mode,
                side,
            )?;
        }
    }

    Ok(())
}

fn cmd_info(files: &[PathBuf]) -> Result<()> {
    for path in files {
        let file = HairFile::open(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let header = file.header();

        println!("{}", path.display());
        println!("  Strands:              {}", header.strand_count);
        println!("  Points:               {}", header.point_count);
        println!(
            "  Sections:             segments={} points={} thickness={} transparency={} color={}",
            header.has_segments(),
            header.has_points(),
            header.has_thickness(),
            header.has_transparency(),
            header.has_color()
        );
        println!("  Default segments:     {}", header.default_segments);
        println!("  Default thickness:    {}", header.default_thickness);
        println!("  Default transparency: {}", header.default_transparency);
        let [r, g, b] = header.default_color;
        println!("  Default color:        ({r}, {g}, {b})");
        let info = header.info_str();
        println!(
            "  Info:                 {}",
            if info.is_empty() { "n/a" } else { info }
        );
    }

    Ok(())
}

fn cmd_check(paths: &[PathBuf]) -> Result<()> {
    let files = collect_hair_files(paths);
    if files.is_empty() {
        anyhow::bail!("no .hair files found");
    }

    println!("Checking {} files...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failures: Vec<(PathBuf, String)> = files
        .par_iter()
        .filter_map(|path| {
            let result = validate(path);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e.to_string()))
        })
        .collect();
    pb.finish_with_message("Done");

    println!(
        "Checked {} files in {:?}: {} ok, {} failed",
        files.len(),
        start.elapsed(),
        files.len() - failures.len(),
        failures.len()
    );

    for (path, error) in &failures {
        eprintln!("FAIL {}: {}", path.display(), error);
    }

    if !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// Decode the file and build geometry from it without augmentation.
fn validate(path: &Path) -> tress::curves::Result<Curves> {
    let file = HairFile::open(path)?;
    // no augmentation draws happen at density 1, the seed is irrelevant
    let mut rng = StdRng::seed_from_u64(0);
    Curves::from_hair_file(&file, &LoadOptions::default(), &mut rng)
}

fn collect_hair_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                let p = entry.path();
                if p.extension().and_then(|e| e.to_str()) == Some("hair") {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

#[allow(clippy::too_many_arguments)]
fn cmd_densify(
    input: &Path,
    output: &Path,
    density: f32,
    disparity: f32,
    seed: Option<u64>,
    degree: Degree,
    radius_mode: Option<RadiusArg>,
    side: Option<SideArg>,
) -> Result<()> {
    println!("Densifying: {} -> {}", input.display(), output.display());

    let options = LoadOptions {
        mapping: match side {
            Some(side) => AxisMapping::Half(side.into()),
            None => AxisMapping::Whole,
        },
        augmentation: Augmentation::new(density, disparity),
        spline_mode: degree.into(),
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let mut curves = Curves::load_with(input, &options, &mut rng)
        .with_context(|| format!("failed to load {}", input.display()))?;

    if let Some(mode) = radius_mode {
        curves.set_radius_mode(mode.into());
    }

    println!("{curves}");

    curves
        .to_hair_file()
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Densified in {:?}", start.elapsed());

    Ok(())
}
