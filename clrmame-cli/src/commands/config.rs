use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings;

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show() {
    let path = settings::settings_path();
    let current = settings::load();

    log::info!(
        "{}",
        "clrmame Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let fields = [
        ("output.format", format!("{:?}", current.output.format).to_lowercase()),
        ("parse.container", format!("{:?}", current.parse.container).to_lowercase()),
    ];
    for (name, value) in fields {
        log::info!(
            "  {} {}",
            format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

/// Write one settings value.
pub(crate) fn run_config_set(key: &str, value: &str) -> Result<(), CliError> {
    settings::save_value(key, value)?;
    log::info!(
        "{} {} = {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key.if_supports_color(Stdout, |t| t.bold()),
        value,
    );
    Ok(())
}
