use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "studydesk", version, about = "Studydesk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a single module average
    Module {
        #[command(subcommand)]
        action: commands::module::ModuleAction,
    },
    /// Standalone unit calculator
    Unit {
        #[command(subcommand)]
        action: commands::unit::UnitAction,
    },
    /// Semester grades and calculation
    Semester {
        #[command(subcommand)]
        action: commands::semester::SemesterAction,
    },
    /// Annual average and promotion status
    Year {
        #[command(subcommand)]
        action: commands::year::YearAction,
    },
    /// Classify a value into a grade band
    Band {
        /// Average on the 0-20 scale
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task calendar
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Module { action } => commands::module::run(action),
        Commands::Unit { action } => commands::unit::run(action),
        Commands::Semester { action } => commands::semester::run(action),
        Commands::Year { action } => commands::year::run(action),
        Commands::Band { value } => commands::band::run(value),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
