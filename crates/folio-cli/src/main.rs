use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use folio_core::command_registry::CommandRegistry;
use folio_core::config::Config;
use folio_core::content::PortfolioContent;
use folio_relay::RelayOptions;
use folio_relay::RelayServer;
use folio_relay::SpoolMailTransport;

mod logging;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio command console for the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive console (default).
    Console {
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// YAML or JSON portfolio content; overrides the config file.
        #[arg(long, value_name = "PATH")]
        content: Option<PathBuf>,
    },
    /// Run the contact relay and resume download server.
    Serve {
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Listen address, e.g. 0.0.0.0:5000.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Resolve one command and print its output.
    Print {
        #[arg(required = true, value_name = "COMMAND")]
        command: Vec<String>,
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "PATH")]
        content: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Console {
        config: None,
        content: None,
    }) {
        Command::Console { config, content } => {
            let config = load_config(config.as_deref())?;
            logging::init_file(&log_path())?;
            let content = load_content(&config, content.as_deref())?;
            tracing::info!(name = %content.personal.name, "console session starting");
            let registry = CommandRegistry::new(Arc::new(content));
            ui::run(registry, &config.console)
        }
        Command::Serve { config, bind } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            logging::init_stderr()?;
            serve(&config)
        }
        Command::Print {
            command,
            config,
            content,
        } => {
            let config = load_config(config.as_deref())?;
            let content = load_content(&config, content.as_deref())?;
            let registry = CommandRegistry::new(Arc::new(content));
            let resolution = registry.resolve(&command.join(" "));
            println!("{}", resolution.payload.flatten());
            Ok(())
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("folio.log")
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.apply_port_override(std::env::var("PORT").ok().as_deref());
    Ok(config)
}

fn load_content(config: &Config, path: Option<&Path>) -> anyhow::Result<PortfolioContent> {
    match path.or(config.content.path.as_deref()) {
        Some(path) => PortfolioContent::load(path)
            .with_context(|| format!("failed to load content from {}", path.display())),
        None => Ok(PortfolioContent::sample()),
    }
}

fn serve(config: &Config) -> anyhow::Result<()> {
    let transport = SpoolMailTransport::new(&config.mail.spool_dir);
    tracing::info!(spool = %transport.dir().display(), "mail spool ready");
    let server = RelayServer::bind(RelayOptions::from_config(config), transport)?;
    server.serve();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_subcommand_defaults_to_console() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn print_joins_words() {
        let cli = Cli::try_parse_from(["folio", "print", "sudo", "hire_me"]).unwrap();
        let Some(Command::Print { command, .. }) = cli.command else {
            panic!("expected print");
        };
        assert_eq!(command.join(" "), "sudo hire_me");
    }

    #[test]
    fn serve_accepts_bind() {
        let cli = Cli::try_parse_from(["folio", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Serve { bind: Some(ref bind), .. }) if bind == "0.0.0.0:8080"
        ));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[console]\nprompt = \"guest$\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.console.prompt, "guest$");
    }

    #[test]
    fn content_falls_back_to_sample() {
        let content = load_content(&Config::default(), None).unwrap();
        assert_eq!(content, PortfolioContent::sample());
    }
}
