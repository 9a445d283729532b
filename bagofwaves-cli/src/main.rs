use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use bagofwaves::{
    backend::DefaultEvaluator,
    config::{DescriptorConfig, EnergyGrid},
    molden::MoldenFile,
    Descriptor,
};
use clap::Parser;

/// Samples the orbitals of an unrestricted Q-Chem calculation on the van der
/// Waals surface of the molecule, resolved over an energy grid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The Q-Chem output to read, plain or gzip compressed, or `-` for
    /// standard input
    input: PathBuf,

    /// JSON file with the energy grid, smoothing width and surface settings
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Lowest energy of the grid, in Hartree
    #[arg(long, allow_hyphen_values = true)]
    e_min: Option<f64>,

    /// Highest energy of the grid, in Hartree
    #[arg(long, allow_hyphen_values = true)]
    e_max: Option<f64>,

    /// Number of grid energies
    #[arg(long)]
    points: Option<usize>,

    /// Width of the energy smoothing
    #[arg(long)]
    sigma: Option<f64>,

    /// Treat the input as a bare Molden file instead of a Q-Chem log
    #[arg(long)]
    molden: bool,

    /// Where to write the descriptor; standard output if omitted
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<DescriptorConfig> {
        let mut config = match &self.config {
            Some(path) => DescriptorConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DescriptorConfig::default(),
        };

        if self.e_min.is_some() || self.e_max.is_some() || self.points.is_some() {
            let (start, stop, points) = match config.energy_grid {
                EnergyGrid::Linspace {
                    start,
                    stop,
                    points,
                } => (start, stop, points),
                EnergyGrid::Explicit(ref energies) => (
                    energies.first().copied().unwrap_or(-20.0),
                    energies.last().copied().unwrap_or(2.0),
                    energies.len(),
                ),
            };
            config.energy_grid = EnergyGrid::Linspace {
                start: self.e_min.unwrap_or(start),
                stop: self.e_max.unwrap_or(stop),
                points: self.points.unwrap_or(points),
            };
        }
        if let Some(sigma) = self.sigma {
            config.smoothing_width = sigma;
        }

        Ok(config)
    }

    fn reader(&self) -> Result<Box<dyn BufRead>> {
        if self.input.as_os_str() == "-" {
            return Ok(Box::new(io::stdin().lock()));
        }

        let file = File::open(&self.input)
            .with_context(|| format!("failed to open {}", self.input.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose && std::env::var_os("RUST_LOG").is_none() {
        pretty_env_logger::formatted_builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::init();
    }

    let config = args.config()?;
    let energy_grid = config.energy_grid.energies();
    log::debug!("energy grid: {energy_grid:.3?}");

    let start = Instant::now();
    let reader = args.reader()?;
    let molden = if args.molden {
        MoldenFile::from_reader(reader)
    } else {
        MoldenFile::from_log(reader)
    }
    .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let descriptor = Descriptor::compute(
        &molden,
        &energy_grid,
        config.smoothing_width,
        &DefaultEvaluator::default(),
        &config.surface,
    )?;
    log::info!(
        "computed {} x {} descriptor in {:0.2?}",
        descriptor.n_points(),
        energy_grid.len(),
        start.elapsed()
    );

    match &args.output {
        Some(path) => descriptor
            .save(path)
            .map_err(|err| anyhow::anyhow!("{err}"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = BufWriter::new(io::stdout().lock());
            serde_json::to_writer(&mut stdout, &descriptor)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
