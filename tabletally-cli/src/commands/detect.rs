use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletally_formats::{detect, Detection};

use crate::CliError;

use super::read_input;

/// Run the `detect` command.
pub(crate) fn run_detect(file: PathBuf) -> Result<(), CliError> {
    let raw = read_input(&file)?;

    match detect(&raw) {
        Detection::Known(format) => {
            log::info!(
                "{} {} ({})",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                format
                    .display_name()
                    .if_supports_color(Stdout, |t| t.bold()),
                format.short_name(),
            );
        }
        Detection::Ambiguous(candidates) if candidates.is_empty() => {
            log::warn!(
                "{} No format signature matches this input",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
        }
        Detection::Ambiguous(candidates) => {
            log::warn!(
                "{} Several format signatures match:",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            );
            for format in &candidates {
                log::warn!("  {} ({})", format.display_name(), format.short_name());
            }
            log::info!("Pass --format to 'tabletally import' to pick one.");
        }
    }

    Ok(())
}
