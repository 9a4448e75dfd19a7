use super::read_design;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailframe_compiler_html::{compile_to_html, CompileOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Hidden inbox preview text
    #[arg(long)]
    pub preheader: Option<String>,

    /// Emit compact markup regardless of config
    #[arg(long)]
    pub compact: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let designs_dir = config.get_designs_dir(cwd);

    if !designs_dir.exists() {
        return Err(anyhow!("Designs directory does not exist: {:?}", designs_dir));
    }

    if !args.stdout {
        println!("{}", "🔨 Compiling designs...".bright_blue().bold());
    }

    let designs = find_design_files(&designs_dir)?;
    info!(count = designs.len(), dir = %designs_dir.display(), "Found designs");

    if designs.is_empty() {
        println!("{}", "⚠️  No designs found".yellow());
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let options = CompileOptions {
        pretty: config.pretty && !args.compact,
        preheader: args.preheader.clone(),
        ..Default::default()
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for design in &designs {
        let relative_path = design.strip_prefix(&designs_dir).unwrap_or(design);

        match compile_file(design, relative_path, &args, &out_dir, &options) {
            Ok(output_path) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), output_path);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), relative_path.display(), e.to_string().red());
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} designs successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Compiled {} designs, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_design_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    args: &CompileArgs,
    out_dir: &Path,
    options: &CompileOptions,
) -> Result<String> {
    let document = read_design(file_path)?;
    debug!(path = %file_path.display(), blocks = document.len(), "Compiling design");
    let output = compile_to_html(&document, options.clone());

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(relative_path).with_extension("html");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}
