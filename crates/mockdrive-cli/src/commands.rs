use std::io::Write;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use mockdrive_store::{
    CopyOptions, CreateFile, CreateFolder, DriveBackend, InMemoryDrive, StoreConfig, UpdateFile,
    UpdateFolder,
};
use tracing::info;

use crate::cli::*;
use crate::output::{record_text, render};
use crate::script::{Script, ScriptRunner, StepOutcome};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.root_id.clone())?;
    let drive = InMemoryDrive::from_config(&config);
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Run(args) => cmd_run(drive, args, &cli.format, &mut stdout),
        Command::Demo(_) => cmd_demo(drive, &cli.format, &mut stdout),
    }
}

/// Store settings from an optional TOML file, with `--root-id` taking priority.
fn load_config(path: Option<&Path>, root_id: Option<String>) -> anyhow::Result<StoreConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            StoreConfig::from_toml_str(&raw)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => StoreConfig::default(),
    };
    if root_id.is_some() {
        config.root_id = root_id;
    }
    Ok(config)
}

fn cmd_run(
    drive: InMemoryDrive,
    args: RunArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let script = Script::from_toml_str(&raw)?;
    info!(steps = script.steps.len(), script = %args.script.display(), "running script");
    execute_script(drive, script, args.keep_going, format, out)
}

fn execute_script(
    drive: InMemoryDrive,
    script: Script,
    keep_going: bool,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut runner = ScriptRunner::new(drive);
    let mut failures = 0usize;
    for (index, step) in script.steps.into_iter().enumerate() {
        let op = step.op();
        let number = index + 1;
        match runner.run_step(step) {
            Ok(outcome) => writeln!(out, "{}", render(&outcome, format)?)?,
            Err(err) if keep_going => {
                failures += 1;
                writeln!(out, "{} step {number} ({op}): {err}", "✗".red().bold())?;
            }
            Err(err) => return Err(err.context(format!("step {number} ({op}) failed"))),
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} step(s) failed");
    }
    Ok(())
}

fn cmd_demo(
    mut drive: InMemoryDrive,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let root = drive.root_id().clone();

    let docs = drive.create_folder("Documents", CreateFolder::default())?;
    let photos = drive.create_folder("Photos", CreateFolder::default())?;
    let notes = drive.create_file(
        "notes.txt",
        CreateFile::default().parent(docs.id.clone()).content("Hello, world!"),
    )?;
    drive.create_file(
        "cat.png",
        CreateFile::default().parent(photos.id.clone()).content(vec![0x89u8, b'P', b'N', b'G']),
    )?;
    show(&drive, "created sample tree", format, out)?;

    drive.update_file(&notes.id, UpdateFile::default().content("Hello again, world!"))?;
    drive.update_file(&notes.id, UpdateFile::default().parent(root.clone()).name("readme.txt"))?;
    show(&drive, "moved notes.txt to the root as readme.txt", format, out)?;

    drive.copy_folder(&photos.id, CopyOptions::default().name("Photos (copy)"))?;
    drive.update_folder(&docs.id, UpdateFolder::default().name("Docs"))?;
    show(&drive, "copied Photos and renamed Documents", format, out)?;

    drive.delete_folder(&photos.id)?;
    show(&drive, "deleted the original Photos", format, out)?;
    Ok(())
}

fn show(
    drive: &InMemoryDrive,
    caption: &str,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let root = drive.root()?;
    match format {
        OutputFormat::Text => {
            writeln!(out, "{} {}", "✓".green().bold(), caption)?;
            writeln!(out, "{}\n", record_text(&root))?;
        }
        OutputFormat::Json => writeln!(out, "{}", render(&StepOutcome::Record(root), format)?)?,
    }
    Ok(())
}
