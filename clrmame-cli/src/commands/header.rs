use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use clrmame_dat::{AsFields, DatFile};

use crate::cli_types::OutputFormat;
use crate::error::CliError;

/// Show the DAT header.
pub(crate) fn run_header(path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let dat = DatFile::load(path)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&dat.header)?);
        return Ok(());
    }

    let Some(header) = dat.header.as_ref() else {
        log::warn!("{} has no header", path.display());
        return Ok(());
    };

    for (field, value) in header.as_fields() {
        log::info!(
            "{:>12}: {}",
            field.if_supports_color(Stdout, |t| t.bold()),
            value.unwrap_or("-"),
        );
    }
    log::info!(
        "{:>12}: {} ({} ROMs)",
        "games".if_supports_color(Stdout, |t| t.bold()),
        dat.games.len(),
        dat.rom_count(),
    );
    Ok(())
}
