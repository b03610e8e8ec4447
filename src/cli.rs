use crate::tools::locate::{self, ReportFormat};
use clap::{Parser, Subcommand};

/// Root CLI for projgen
#[derive(Parser)]
#[command(name = "projgen")]
#[command(about = "Locate project roots, command directories and licenses for code generation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve where a project lives and where its commands go
    Locate {
        /// Project name (e.g. github.com/user/app) or absolute path
        project: String,
        /// License name to embed, overriding projgen.yml (`None` to opt out)
        #[arg(long)]
        license: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// List configured source roots and command directory names
    Roots,
    /// Manage the project-local projgen.yml
    Config {
        #[command(subcommand)]
        sub: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a starter projgen.yml into the current directory
    Init,
}

/// Dispatch after parse
pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            project,
            license,
            format,
        } => {
            if let Err(e) = locate::locate(&project, license, format) {
                eprintln!("error (locate): {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Roots => {
            if let Err(e) = locate::list_roots() {
                eprintln!("error (roots): {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Config { sub } => match sub {
            ConfigCommands::Init => {
                if let Err(e) = locate::init_config() {
                    eprintln!("error (config init): {e:#}");
                    std::process::exit(1);
                }
            }
        },
    }
}
