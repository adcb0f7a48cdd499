//! forgekit CLI — scaffolding and prompt rendering from the command line.
//!
//! Six commands cover the engine surface: `init`, `list`, `show`,
//! `render`, `new`, and `save`. Each command is a thin delegate to
//! `forgekit-core`; no rendering logic lives here.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use forgekit_core::TemplateKind;

#[derive(Parser)]
#[command(
    name = "forgekit",
    about = "Template & prompt scaffolding toolkit",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to forgekit.json (default: ./forgekit.json)
    #[arg(long, global = true, default_value = "forgekit.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a forgekit.json config and the library root directories
    Init {
        /// Base directory for the template/prompt/resource/output roots
        #[arg(default_value = ".")]
        base: PathBuf,
    },

    /// List available templates and prompts
    List {
        /// Only show definitions of this category
        #[arg(long, value_enum)]
        kind: Option<KindChoice>,
    },

    /// Show the metadata and declared variables of one definition
    Show {
        /// Definition name
        name: String,
    },

    /// Render a prompt to stdout or a file
    Render {
        /// Prompt name
        name: String,

        /// Context variables as name=value (repeatable)
        #[arg(long = "var", value_parser = commands::parse_key_val)]
        vars: Vec<(String, String)>,

        /// Write output here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Instantiate a scaffold template into a target directory
    New {
        /// Template name
        template: String,

        /// Target directory (default: <output root>/<template name>)
        target: Option<PathBuf>,

        /// Context variables as name=value (repeatable)
        #[arg(long = "var", value_parser = commands::parse_key_val)]
        vars: Vec<(String, String)>,
    },

    /// Import a prompt record file into the prompt library
    Save {
        /// Path to a JSON prompt record ({ "metadata": ..., "content": ... })
        file: PathBuf,

        /// Reject the record if it fails the completeness check
        #[arg(long)]
        strict: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindChoice {
    Project,
    Component,
    System,
    User,
    Developer,
}

impl From<KindChoice> for TemplateKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Project => TemplateKind::Project,
            KindChoice::Component => TemplateKind::Component,
            KindChoice::System => TemplateKind::System,
            KindChoice::User => TemplateKind::User,
            KindChoice::Developer => TemplateKind::Developer,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { base } => {
            commands::init::run(&base)?;
        }
        Commands::List { kind } => {
            commands::list::run(&cli.config, kind.map(Into::into))?;
        }
        Commands::Show { name } => {
            commands::show::run(&cli.config, &name)?;
        }
        Commands::Render { name, vars, output } => {
            commands::render::run(&cli.config, &name, vars, output.as_deref())?;
        }
        Commands::New {
            template,
            target,
            vars,
        } => {
            commands::new::run(&cli.config, &template, target.as_deref(), vars)?;
        }
        Commands::Save { file, strict } => {
            commands::save::run(&cli.config, &file, strict)?;
        }
    }

    Ok(())
}
