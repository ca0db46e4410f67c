use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use clrmame_dat::{DatFile, Game, Rom};

use crate::cli_types::OutputFormat;
use crate::error::CliError;

/// Whether a game's name contains `filter`, ignoring case.
pub(crate) fn matches_name(game: &Game, filter: &str) -> bool {
    game.name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(&filter.to_lowercase()))
}

/// List games and their ROMs.
pub(crate) fn run_games(
    path: &Path,
    format: OutputFormat,
    name: Option<&str>,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let dat = DatFile::load(path)?;
    let games: Vec<&Game> = dat
        .games
        .iter()
        .filter(|g| name.is_none_or(|filter| matches_name(g, filter)))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    if let Some(dat_name) = dat.name() {
        log::info!("{}", dat_name.if_supports_color(Stdout, |t| t.bold()));
        log::info!("");
    }

    for game in &games {
        log::info!(
            "{}",
            game.name
                .as_deref()
                .unwrap_or("(unnamed)")
                .if_supports_color(Stdout, |t| t.bold()),
        );
        if let Some(ref description) = game.description {
            if Some(description) != game.name.as_ref() {
                log::info!(
                    "  {}",
                    description.if_supports_color(Stdout, |t| t.dimmed())
                );
            }
        }
        for rom in &game.roms {
            log::info!("  {}", format_rom(rom));
        }
    }

    let rom_count: usize = games.iter().map(|g| g.roms.len()).sum();
    log::info!("");
    log::info!(
        "Total: {} of {} games, {} ROMs",
        games.len(),
        dat.games.len(),
        rom_count
    );
    Ok(())
}

/// One-line ROM summary: name, size, crc and status when present.
pub(crate) fn format_rom(rom: &Rom) -> String {
    let mut line = rom.name.clone().unwrap_or_else(|| "(unnamed)".to_string());
    match (rom.size_bytes(), rom.size.as_deref()) {
        (Some(bytes), _) => line.push_str(&format!(" [{}]", format_bytes(bytes))),
        (None, Some(raw)) => line.push_str(&format!(" [size {raw}]")),
        (None, None) => {}
    }
    if let Some(ref crc) = rom.crc {
        line.push_str(&format!(" crc {}", crc.to_lowercase()));
    }
    if let Some(status) = rom.flags() {
        line.push_str(&format!(" ({status})"));
    }
    line
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;
    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
