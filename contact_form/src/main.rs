use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use contact_form::commands::{countries, fill, submit::SubmitCommand};
use contact_form_utils::contact_form_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let paths = contact_form_config::config_paths(cli.config);
    let config = contact_form_config::load_from(&paths, contact_form_config::environment())
        .context("Failed to load config")?;

    match cli.command {
        Command::Submit(command) => command.invoke(config).await?,
        Command::Fill => fill::invoke(config).await?,
        Command::Countries => countries::invoke(&config, &mut std::io::stdout())?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = contact_form_version())]
struct Cli {
    /// Additional config files, applied after the ones listed in $CONTACT_FORM_CONFIG
    #[arg(short, long, global = true)]
    config: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the given values and send them to the webhook
    #[command(aliases(["send", "s"]))]
    Submit(SubmitCommand),
    /// Fill in the form interactively
    #[command(aliases(["f"]))]
    Fill,
    /// List the selectable country calling codes
    #[command(aliases(["c"]))]
    Countries,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
