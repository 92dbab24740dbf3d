//! Tracing subscriber setup.
//!
//! The console owns the terminal, so it logs to a file. The relay logs to
//! stderr.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Writes logs to `path`, creating its parent directory.
pub fn init_file(path: &Path) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(file_layer(path)?)
        .with(env_filter())
        .try_init()
        .context("tracing subscriber already installed")
}

fn file_layer<S>(path: &Path) -> anyhow::Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Ok(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
}

pub fn init_stderr() -> anyhow::Result<()> {
    let layer = fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter())
        .try_init()
        .context("tracing subscriber already installed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_layer_creates_directory_and_writes_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("folio.log");
        let subscriber = tracing_subscriber::registry()
            .with(file_layer(&path).unwrap())
            .with(EnvFilter::new("debug"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(command = "help", "console submit");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("console submit"), "{contents}");
        assert!(contents.contains("command=\"help\""), "{contents}");
        assert!(!contents.contains("\u{1b}["), "{contents}");
    }

    #[test]
    fn file_layer_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let err = file_layer::<tracing_subscriber::Registry>(&blocker.join("folio.log"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("failed to create log"), "{err}");
    }
}
