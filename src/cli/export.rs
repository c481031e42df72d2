//! Export and import CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::Session;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{
    export_full_json, export_full_yaml, export_transactions_csv, parse_import, ExportFormat,
    FullExport,
};

/// Export/import subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export all state (JSON or YAML) or the ledger (CSV)
    Export {
        /// Output file
        file: PathBuf,
        /// json, yaml or csv; guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Replace all state with a JSON or YAML export
    Import {
        /// Input file
        file: PathBuf,
        /// json or yaml; guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Handle an export command
pub fn handle_export_command(session: &mut Session, cmd: ExportCommands) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Export {
            file,
            format,
            pretty,
        } => {
            let format = resolve_format(format, &file)?;
            let now = session.engine.now();

            let handle = File::create(&file).map_err(|e| {
                TrackerError::Io(format!("Failed to create {}: {}", file.display(), e))
            })?;
            let mut writer = BufWriter::new(handle);

            match format {
                ExportFormat::Json => {
                    let export = FullExport::from_snapshot(session.engine.snapshot(now), now);
                    export_full_json(&export, &mut writer, pretty)?;
                }
                ExportFormat::Yaml => {
                    let export = FullExport::from_snapshot(session.engine.snapshot(now), now);
                    export_full_yaml(&export, &mut writer)?;
                }
                ExportFormat::Csv => {
                    export_transactions_csv(session.engine.transactions(), &mut writer)?;
                }
            }
            writer.flush()?;

            tracing::info!(path = %file.display(), %format, "exported");
            println!(
                "Exported {} transaction(s) as {} to {}",
                session.engine.transactions().len(),
                format,
                file.display()
            );
        }

        ExportCommands::Import { file, format } => {
            let format = resolve_format(format, &file)?;
            let text = std::fs::read_to_string(&file).map_err(|e| {
                TrackerError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;

            let state = parse_import(&text, format)?;
            let now = session.engine.now();
            session.engine.import(state, now)?;

            println!(
                "Imported {} transaction(s) from {}",
                session.engine.transactions().len(),
                file.display()
            );
            println!(
                "Balance: {}  Mission started {}",
                session.engine.balance().format_with_symbol(session.currency()),
                session.engine.mission().start_date()
            );
        }
    }

    Ok(())
}

fn resolve_format(format: Option<String>, file: &std::path::Path) -> TrackerResult<ExportFormat> {
    match format {
        Some(name) => name.parse(),
        None => Ok(ExportFormat::from_path(file)),
    }
}
