use clap::{Parser, Subcommand};
use frontpage::assets::AssetResolver;
use frontpage::components::MenuState;
use frontpage::content::{self, SourceKind};
use frontpage::editor::{ComponentRegistry, EditorContext};
use frontpage::page::{self, PageComposer};
use frontpage::{config, generate, logging, models, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frontpage")]
#[command(about = "Static homepage generator for localized or headless-CMS content")]
#[command(long_about = "\
Static homepage generator for localized or headless-CMS content

Every section of the homepage reads its text, links and images through a
content key. Keys resolve against a bundled JSON document or, when a remote
host is configured, against persisted queries on a headless CMS.

Content structure:

  content/
  ├── config.toml          # Site config (optional, overrides stock defaults)
  ├── en.json              # Content document for locale `en`
  └── assets/              # Images referenced as /assets/... → copied to output

Source selection (remote.data_source):
  auto    remote when remote.host is set, static document otherwise
  mock    always the static document
  remote  always the CMS; requires remote.host

Environment overrides: FRONTPAGE_REMOTE_HOST, FRONTPAGE_QUERY_PATH,
FRONTPAGE_AUTH_TOKEN, FRONTPAGE_DATA_SOURCE.

Run 'frontpage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose, render and write the homepage
    Build {
        /// Page URL query string, e.g. "wcmmode=edit" to render in author mode
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Resolve every content slot and report what failed, without writing
    Check,
    /// Show configuration, content source and editor integration status
    Status,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose).map_err(|e| e as Box<dyn std::error::Error>)?;

    match cli.command {
        Command::Build { query } => {
            let site_config = config::load_config(&cli.source, std::env::vars())?;
            let source = content::open_source(&site_config, &cli.source)?;
            let assets = AssetResolver::from_config(&site_config.remote);
            tracing::info!(source = %source.describe(), "composing homepage");

            let composed = PageComposer::new(source.as_ref(), &assets).compose();
            let registry = ComponentRegistry::for_home(&site_config.namespace);
            let editor = EditorContext::from_query(&query, &registry);
            let markup =
                page::render_home(&composed.content, &site_config, &editor, MenuState::Closed);

            let report = generate::generate(&markup.into_string(), &cli.source, &cli.output)?;
            output::print_build_output(&composed.diagnostics, &report);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source, std::env::vars())?;
            let source = content::open_source(&site_config, &cli.source)?;
            let assets = AssetResolver::from_config(&site_config.remote);
            println!("==> Checking {}", source.describe());

            let composed = PageComposer::new(source.as_ref(), &assets).compose();
            output::print_check_report(&composed.diagnostics);
            if !composed.is_complete() {
                std::process::exit(1);
            }
            println!("==> Content is complete");
        }
        Command::Status => {
            let site_config = config::load_config(&cli.source, std::env::vars())?;
            let selected = SourceKind::select(&site_config.remote);
            let source = match content::open_source(&site_config, &cli.source) {
                Ok(source) => source.describe(),
                Err(e) => format!("unavailable: {e}"),
            };
            let assets = AssetResolver::from_config(&site_config.remote);
            let queries = match site_config.remote.host() {
                Some(_) => content::PERSISTED_QUERIES
                    .iter()
                    .map(|query| {
                        let url = content::persisted_query_url(&site_config.remote, query);
                        (query.to_string(), url)
                    })
                    .collect(),
                None => Vec::new(),
            };
            let catalog = models::catalog();
            let registry = ComponentRegistry::for_home(&site_config.namespace);

            output::print_status(&output::StatusReport {
                config: &site_config,
                selected,
                source,
                assets: &assets,
                queries,
                models: &catalog,
                registry: &registry,
            });
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
