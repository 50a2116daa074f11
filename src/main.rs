use anyhow::{Context, Result, bail};
use clap::Parser;
use nefsort::nefsort_core::cli::{DEFAULT_SOURCE_DIR, DEFAULT_TARGET_DIR};
use nefsort::nefsort_core::{
    Cli, ExifToolCommand, ExifToolSession, OrganizeConfig, Organizer, exiftool_available,
};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let term_level = if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("nefsort.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    let config = OrganizeConfig::new(&cli.raw_extensions, &cli.preview_extensions)?;

    let source_dir = match cli.source_dir() {
        Some(dir) => dir.clone(),
        None => {
            let dir = home_relative(DEFAULT_SOURCE_DIR)?;
            println!("Using default source folder: {}", dir.display());
            dir
        }
    };

    let target_dir = match cli.target_dir() {
        Some(dir) => dir.clone(),
        None => {
            let dir = home_relative(DEFAULT_TARGET_DIR)?;
            println!("Using default target folder: {}", dir.display());
            dir
        }
    };

    if !source_dir.exists() {
        bail!("Source folder '{}' does not exist", source_dir.display());
    }
    if !source_dir.is_dir() {
        bail!("Source folder '{}' is not a directory", source_dir.display());
    }

    if !target_dir.exists() {
        println!(
            "Target folder '{}' does not exist. Creating it...",
            target_dir.display()
        );
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;
    }

    let stats = if cli.stay_open {
        Organizer::new(
            &source_dir,
            &target_dir,
            config,
            ExifToolSession::new(&cli.exiftool),
        )
        .run()
    } else {
        if !exiftool_available(cli.exiftool.as_os_str()) {
            log::warn!(
                "{} could not be launched; every file will be skipped",
                cli.exiftool.display()
            );
        }
        Organizer::new(
            &source_dir,
            &target_dir,
            config,
            ExifToolCommand::new(&cli.exiftool),
        )
        .run()
    };

    println!("\nOrganize complete!");
    println!("  {} groups moved ({} files)", stats.groups_moved, stats.files_moved);
    if stats.skipped > 0 {
        println!("  {} files skipped", stats.skipped);
    }
    if stats.failed > 0 {
        println!("  {} files failed", stats.failed);
    }

    Ok(())
}

fn home_relative(parts: &[&str]) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .context("Could not determine home directory; pass source and target explicitly")?;
    Ok(parts.iter().fold(home, |dir, part| dir.join(part)))
}
