//! `vw export` command implementation.

use std::path::PathBuf;

use clap::Args;
use vw_config::{CliSettings, Config};
use vw_export::{ExportOptions, Exporter, Published};
use vw_storage_fs::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover vw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory to write the artifacts to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Public site URL that links are anchored at (overrides config).
    #[arg(long, env = "VW_SITE_URL")]
    site_url: Option<String>,

    /// Enable verbose output (per-document logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is
    /// missing, or an artifact can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            site_url: self.site_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.export_resolved.output_dir.display()
        ));

        let published = run_export(&config)?;

        if published.indexed == 0 {
            output.warning(&format!(
                "No document has a sidebar_label; {} lists no sections",
                config.export_resolved.index_filename
            ));
        }
        output.success(&format!(
            "Exported {} documents to {}",
            published.documents,
            published.full_path.display()
        ));
        output.success(&format!(
            "Indexed {} documents in {}",
            published.indexed,
            published.index_path.display()
        ));

        Ok(())
    }
}

/// Collect the content tree and write both artifacts.
fn run_export(config: &Config) -> Result<Published, CliError> {
    let source_dir = &config.docs_resolved.source_dir;
    if !source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            source_dir.display()
        )));
    }

    let storage = FsStorage::new(source_dir.clone());
    let exporter = Exporter::new(export_options(config));
    let collected = exporter.collect(&storage)?;
    Ok(exporter.publish(&collected, &config.export_resolved.output_dir)?)
}

fn export_options(config: &Config) -> ExportOptions {
    ExportOptions {
        base_url: config.site.base_url(),
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        full_filename: config.export_resolved.full_filename.clone(),
        index_filename: config.export_resolved.index_filename.clone(),
    }
}
