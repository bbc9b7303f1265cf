use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use workshop_landing::install::{self, InstallPlan, PipFetcher, PythonImporter, Runtime};
use workshop_landing::landing::{self, BuildOptions};
use workshop_landing::render::Renderer;
use workshop_landing::{config, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "workshop-landing")]
#[command(about = "Landing page builder for a JupyterLite workshop site")]
#[command(long_about = "\
Landing page builder for a JupyterLite workshop site

Renders README.md into a landing page with launch buttons for JupyterLab,
classic notebooks, and the Python console.

Project layout:

  project/
  ├── landing.toml     # Optional overrides (see gen-config)
  ├── README.md        # Rendered into the landing page
  ├── home.html        # Generated (redirect mode)
  └── dist/            # JupyterLite build output
      ├── home.html    # Generated
      └── index.html   # Replaced by a redirect (redirect mode)

Running with no command is the same as 'workshop-landing build'.")]
#[command(version = version_string())]
struct Cli {
    /// Project root containing README.md and the output directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Show progress logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render README.md into the landing page
    Build {
        /// Write only dist/home.html and leave dist/index.html untouched
        #[arg(long)]
        no_redirect: bool,

        /// Print the build report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Install or check the notebook dependencies
    Install {
        /// browser: fetch every package (pip stands in for micropip);
        /// native: only check that the library imports
        #[arg(long, value_enum, default_value_t = RuntimeKind::Native)]
        runtime: RuntimeKind,

        /// Python interpreter to use
        #[arg(long, default_value = "python3")]
        python: PathBuf,
    },
    /// Print a stock landing.toml with all options documented
    GenConfig,
}

/// Capability of the runtime the notebooks run in.
#[derive(Clone, Copy, ValueEnum)]
enum RuntimeKind {
    /// A package-fetch facility is available
    Browser,
    /// A plain interpreter
    Native,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Build {
        no_redirect: false,
        json: false,
    }) {
        Command::Build { no_redirect, json } => {
            let config = config::load_config(&cli.root)?;
            let renderer = Renderer::new(&config.highlight.theme)?;
            let options = BuildOptions {
                redirect: !no_redirect,
            };
            let report = landing::build(&cli.root, &config, &renderer, options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_build_output(&report, &cli.root, &config, options);
            }
        }
        Command::Install { runtime, python } => {
            let plan = InstallPlan::default();
            let runtime = match runtime {
                RuntimeKind::Browser => Runtime::Browser(PipFetcher { python }),
                RuntimeKind::Native => Runtime::Native(PythonImporter { python }),
            };
            let outcome = futures::executor::block_on(install::install(&runtime, &plan))?;
            output::print_install_outcome(&outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings only unless `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("workshop_landing={default_level}")));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
