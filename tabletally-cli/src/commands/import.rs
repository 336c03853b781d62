use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletally_formats::FormatKind;
use tabletally_import::{import_text, ImportError, ImportReport};

use crate::CliError;

use super::{default_db_path, open_db, read_input};

/// Run the `import` command.
pub(crate) fn run_import(
    file: PathBuf,
    format: Option<FormatKind>,
    db_path: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let raw = read_input(&file)?;
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    let report = import_text(&conn, &raw, format).map_err(describe_import_error)?;

    if json {
        // Machine output goes straight to stdout, unaffected by log levels.
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::other(format!("Failed to render report: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    print_report(&report, &file, &db_path);
    Ok(())
}

fn describe_import_error(err: ImportError) -> CliError {
    match err {
        ImportError::Ambiguous(candidates) if candidates.is_empty() => CliError::import(
            "input does not match any known export format; pass --format to override",
        ),
        ImportError::Ambiguous(candidates) => {
            let names: Vec<&str> = candidates.iter().map(|f| f.display_name()).collect();
            CliError::import(format!(
                "input matches several formats ({}); pass --format to pick one",
                names.join(", "),
            ))
        }
        ImportError::Parse(e) => CliError::import(e.to_string()),
        ImportError::Db(e) => CliError::database(e.to_string()),
        ImportError::Sqlite(e) => CliError::database(e.to_string()),
    }
}

fn print_report(report: &ImportReport, file: &std::path::Path, db_path: &std::path::Path) {
    let source = if file.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        file.display().to_string()
    };

    log::info!(
        "{} Imported {} from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report
            .format
            .display_name()
            .if_supports_color(Stdout, |t| t.bold()),
        source,
    );

    let c = &report.counts;
    let kinds: &[(&str, u64, u64)] = &[
        ("Catalog items", c.catalog_items_created, c.catalog_items_updated),
        ("Participants", c.participants_created, c.participants_updated),
        ("Item stats", c.pair_stats_created, c.pair_stats_updated),
        ("Events", c.events_created, c.events_updated),
        ("Moves", c.moves_created, c.moves_updated),
        ("Tournaments", c.tournaments_created, c.tournaments_updated),
        ("Matches", c.matches_created, c.matches_updated),
        ("Match players", c.match_players_created, c.match_players_updated),
    ];
    for (label, created, updated) in kinds {
        if *created > 0 || *updated > 0 {
            log::info!("  {}: {} new, {} updated", label, created, updated);
        }
    }

    if !report.row_errors.is_empty() {
        crate::log_blank();
        log::warn!(
            "{} {} row(s) rejected:",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            report.row_errors.len(),
        );
        for err in &report.row_errors {
            log::warn!("  line {}: {}", err.line, err.message);
        }
    }

    log::info!("  Database: {}", db_path.display());
}
