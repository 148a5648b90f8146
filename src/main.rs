// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::env;
use std::path::Path;
use tracing::info;

use tuition_book::commands::{self, ListTuitionCommand};
use tuition_book::logging::{init_logger, LogOutput};
use tuition_book::sample::sample_tuitions;
use tuition_book::{
    count_tuitions, export_json, import_json, load_tuitions, save_tuitions, setup_database,
    AppConfig, Model,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = AppConfig::from_env()?;

    let mode = args.get(1).map(String::as_str);
    let output = match mode {
        Some("list") | Some("import") | Some("export") => LogOutput::Stderr,
        _ => LogOutput::File(&config.log_path),
    };
    init_logger(config.verbose, output)?;

    match mode {
        Some("list") => run_list(&config)?,
        Some("import") => run_import(&config, path_arg(&args, "import")?)?,
        Some("export") => run_export(&config, path_arg(&args, "export")?)?,
        // UI mode (default)
        None => run_ui_mode(&config)?,
        Some(other) => bail!(
            "Unknown mode '{}'. Usage: tuition-book [list | import <file.json> | export <file.json>]",
            other
        ),
    }

    Ok(())
}

fn path_arg<'a>(args: &'a [String], mode: &str) -> Result<&'a Path> {
    args.get(2)
        .map(Path::new)
        .with_context(|| format!("Usage: tuition-book {} <file.json>", mode))
}

/// Open the book, seeding sample students into an empty one when enabled
fn open_book(config: &AppConfig) -> Result<(Connection, Model)> {
    let mut conn = Connection::open(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;
    setup_database(&conn)?;

    if count_tuitions(&conn)? == 0 && config.seed_sample_data {
        let samples = sample_tuitions()?;
        save_tuitions(&mut conn, &samples)?;
        info!(count = samples.len(), "seeded empty book with sample students");
    }

    let model = Model::with_tuitions(load_tuitions(&conn)?)?;
    info!(
        count = model.tuitions().len(),
        db = %config.db_path.display(),
        "tuition book loaded"
    );

    Ok((conn, model))
}

fn run_list(config: &AppConfig) -> Result<()> {
    let (_conn, mut model) = open_book(config)?;
    let result = commands::run(&ListTuitionCommand, &mut model)?;

    println!("📚 {}", result.feedback);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (i, tuition) in model.filtered_view().iter().enumerate() {
        println!("{}. {}", i + 1, tuition);
        for session in tuition.sessions() {
            println!("     • {}", session);
        }
    }

    Ok(())
}

fn run_import(config: &AppConfig, path: &Path) -> Result<()> {
    let (mut conn, mut model) = open_book(config)?;

    let imported = import_json(path)?;
    model
        .set_tuitions(imported)
        .with_context(|| format!("Rejected snapshot {}", path.display()))?;
    let saved = save_tuitions(&mut conn, model.tuitions().as_slice())?;

    println!("✓ Imported {} students from {}", saved, path.display());
    Ok(())
}

fn run_export(config: &AppConfig, path: &Path) -> Result<()> {
    let (_conn, model) = open_book(config)?;

    export_json(path, model.tuitions().as_slice())?;

    println!(
        "✓ Exported {} students to {}",
        model.tuitions().len(),
        path.display()
    );
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    let (mut conn, model) = open_book(config)?;

    let mut app = ui::App::new(model);
    ui::run_ui(&mut app)?;

    // Save the book on exit
    let model = app.into_model();
    let saved = save_tuitions(&mut conn, model.tuitions().as_slice())?;
    println!("✓ Saved {} students to {}", saved, config.db_path.display());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: tuition-book list");
    std::process::exit(1);
}
