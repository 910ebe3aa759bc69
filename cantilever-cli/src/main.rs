mod utils;
mod viewer;

use cantilever_core::{Backend, Integrator, SimConfig, Simulation};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cantilever")]
#[command(about = "Cantilever - a 2D mass-spring beam hanging from a wall", long_about = None)]
struct Cli {
    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "cantilever.log")]
    log_name: String,

    /// Also log debug events such as stiffness changes.
    #[arg(short('v'), long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate without a window and print a summary
    Run {
        /// Number of frames to simulate
        #[arg(short('f'), long, default_value_t = 120)]
        frames: usize,

        /// Enable velocity damping
        #[arg(short('d'), long)]
        damping: bool,

        #[command(flatten)]
        sim: SimArgs,
    },
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        sim: SimArgs,
    },
}

/// Overrides for the default cantilever
#[derive(Args, Debug)]
struct SimArgs {
    /// Grid columns
    #[arg(long)]
    nx: Option<usize>,

    /// Grid rows
    #[arg(long)]
    ny: Option<usize>,

    /// Initial spring stiffness
    #[arg(short('k'), long)]
    stiffness: Option<f32>,

    /// Substeps per frame
    #[arg(short('s'), long)]
    substeps: Option<usize>,

    /// Gravity magnitude
    #[arg(short('g'), long)]
    gravity: Option<f32>,

    #[arg(short('i'), long, value_enum, default_value_t = IntegratorArg::Symplectic)]
    integrator: IntegratorArg,

    /// Spread force and integration work over a thread pool
    #[arg(short('p'), long)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntegratorArg {
    Explicit,
    Symplectic,
    Implicit,
}

impl SimArgs {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::new().with_integrator(match self.integrator {
            IntegratorArg::Explicit => Integrator::ExplicitEuler,
            IntegratorArg::Symplectic => Integrator::SymplecticEuler,
            IntegratorArg::Implicit => Integrator::ImplicitEuler,
        });
        if self.nx.is_some() || self.ny.is_some() {
            let (nx, ny) = (self.nx.unwrap_or(config.nx), self.ny.unwrap_or(config.ny));
            config = config.with_grid(nx, ny);
        }
        if let Some(stiffness) = self.stiffness {
            config = config.with_stiffness(stiffness);
        }
        if let Some(substeps) = self.substeps {
            config = config.with_substeps(substeps);
        }
        if let Some(gravity) = self.gravity {
            config = config.with_gravity(gravity);
        }
        if self.parallel {
            config = config.with_backend(Backend::Parallel);
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let _guard = match utils::configure_logger(&cli.log_name, cli.verbose) {
        Ok((guard, log_path)) => {
            ftlog::info!("Log file: {log_path:?}");
            Some(guard)
        }
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let result = match cli.command {
        Commands::Run {
            frames,
            damping,
            sim,
        } => run_headless(sim.config(), frames, damping),
        Commands::View { sim } => viewer::launch(sim.config()),
    };

    if let Err(e) = result {
        ftlog::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_headless(
    config: SimConfig,
    frames: usize,
    damping: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::new(config)?;
    sim.set_damping(damping);

    for frame in 0..frames {
        sim.step_frame()?;
        if frame % 60 == 0 {
            ftlog::info!("Frame {}: energy {:.4}", frame, sim.energy().total());
        }
    }

    let config = sim.config();
    let tip = sim.position_at(config.nx - 1, 0);
    let rest = cantilever_core::grid_positions(config)[sim.topology().index(config.nx - 1, 0)];
    let energy = sim.energy();

    println!("frames = {}", frames);
    println!("substeps = {}", sim.substep_count());
    println!("integrator = {}", config.integrator);
    println!("stiffness = {}", sim.stiffness());
    println!("tip = ({:.6}, {:.6})", tip.x, tip.y);
    println!("tip_deflection = {:.6}", rest.y - tip.y);
    println!("elastic_energy = {:.6}", energy.elastic);
    println!("kinetic_energy = {:.6}", energy.kinetic);

    Ok(())
}
