use clap::{Parser, Subcommand};
use folio_ui::{config, output, snippet};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio-ui")]
#[command(about = "Interaction layer for static portfolio sites")]
#[command(long_about = "\
Interaction layer for static portfolio sites

The browser side is a WebAssembly module that wires up the navigation menu,
smooth scrolling, scroll-reveal animations, active nav links, the contact form
and toast notifications. This tool manages its configuration.

Page markup it expects:

  nav.nav
  ├── #nav-toggle                  # Mobile menu button
  └── #nav-menu
      └── a.nav-link[href=\"#about\"]  # One per section
  section#home.hero                # .hero-title, .hero-subtitle, .profile-photo
  section#about                    # .card blocks fade in on scroll
  section#skills  > .skills-grid   # children reveal with a stagger
  section#projects > .projects-grid
  section#contact > form#contact-form
                                   # input[type=text], input[type=email], textarea

Run 'folio-ui gen-config' to generate a documented folio.toml, then
'folio-ui snippet' to produce the <script> tags for your page.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "folio.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock folio.toml with all options documented
    GenConfig,
    /// Validate the config file and summarize the resolved settings
    Check,
    /// Print the <script> tags that embed the config and load the module
    Snippet {
        /// URL of the wasm-bindgen JS glue, as seen from the page
        #[arg(long, default_value = snippet::DEFAULT_MODULE)]
        module: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check => {
            let found = cli.config.exists();
            let resolved = config::load_config(&cli.config)?;
            tracing::debug!(path = %cli.config.display(), found, "config resolved");
            output::print_check_output(&cli.config, found, &resolved);
            println!();
            println!("==> Config is valid");
        }
        Command::Snippet { module } => {
            let resolved = config::load_config(&cli.config)?;
            let markup = snippet::render_snippet(&resolved, &module)?;
            println!("{}", markup.into_string());
        }
    }

    Ok(())
}
