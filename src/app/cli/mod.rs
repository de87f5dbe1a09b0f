//! CLI Adapter.

mod doctor;
mod plan;
mod render;
mod templates;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "vpsboot")]
#[command(version)]
#[command(
    about = "Assign CDN/direct roles to domains and render tunnel-stack deployment descriptors",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to $VPSBOOT_CONFIG, then ~/.config/vpsboot/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the role plan for a set of domains
    #[clap(visible_alias = "p")]
    Plan {
        /// Domains, in entry order
        #[arg(required = true)]
        domains: Vec<String>,
        /// Role for a single domain: cdn or direct
        #[arg(long)]
        role: Option<String>,
        /// Domain for the CDN role (two or more domains)
        #[arg(long)]
        cdn: Option<String>,
        /// Domain for the direct role (two or more domains)
        #[arg(long)]
        direct: Option<String>,
    },
    /// Collect parameters and render deployment descriptors
    #[clap(visible_alias = "r")]
    Render {
        /// Read answers from a TOML file instead of prompting
        #[arg(short, long, value_name = "FILE")]
        answers: Option<PathBuf>,
        /// Output root; the primary domain is appended
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Do not offer to launch rendered descriptors
        #[arg(long)]
        no_launch: bool,
    },
    /// List template families and their placeholders
    #[clap(visible_alias = "t")]
    Templates,
    /// Check that the container engine and keypair generator are installed
    Doctor,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Plan { domains, role, cdn, direct } => {
            plan::run_plan(&domains, role, cdn, direct).map(|_| 0)
        }
        Commands::Render { answers, output, no_launch } => {
            render::run_render(config, answers, output, no_launch).map(|_| 0)
        }
        Commands::Templates => templates::run_templates(config).map(|_| 0),
        Commands::Doctor => doctor::run_doctor(config),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
