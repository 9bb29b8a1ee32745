use clap::{Parser, Subcommand};
use generate_book::layout::Layout;
use generate_book::{book, builder, config, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "generate-book")]
#[command(about = "Stage a directory of Markdown documents as an mdBook and build it")]
#[command(long_about = "\
Stage a directory of Markdown documents as an mdBook and build it

The content directory is the table of contents. Documents are chapters in
filename order; a document can keep sub-chapters and assets in a directory
with the same name.

Project structure:

  project/
  ├── generate-book.toml          # Optional, see 'generate-book gen-config'
  ├── README.md                   # Introduction chapter
  ├── compiler_changes.md         # Guideline chapters
  ├── lang_changes.md
  ├── libs_changes.md
  ├── text/
  │   ├── 0001-private-items.md   # Chapter
  │   ├── 3446-store.md           # Chapter with sub-chapters
  │   └── 3446-store/
  │       ├── motivation.md       # Listed under 3446-store
  │       └── diagram.svg         # Reachable by link, not listed
  └── src/                        # Generated: links + SUMMARY.md

The src/ directory is deleted and recreated on every run.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Content directory, relative to the root (overrides the config file)
    #[arg(long, global = true)]
    content: Option<String>,

    /// Staging directory, relative to the root (overrides the config file)
    #[arg(long, global = true)]
    staging: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Stage the book, then run the builder (default)
    Build,
    /// Reset the staging directory, create links and write the index
    Stage,
    /// Print the index document without touching the staging directory
    Summary {
        /// Print index entries as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print a stock generate-book.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let layout = || load_layout(&cli.root, cli.content.as_deref(), cli.staging.as_deref());

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Summary { json } => {
            let plan = book::plan(&layout()?)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&plan.entries)?);
            } else {
                print!("{}", plan.text);
            }
        }
        Command::Stage => {
            stage(&layout()?)?;
        }
        Command::Build => {
            let layout = layout()?;
            stage(&layout)?;
            println!("==> Building: {}", layout.config.builder.join(" "));
            let status = builder::run_builder(&layout.config.builder, &layout.root)?;
            let code = builder::exit_code(&status);
            if code != 0 {
                eprintln!("==> Builder failed: {status}");
            }
            return Ok(ExitCode::from(code));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_layout(
    root: &std::path::Path,
    content: Option<&str>,
    staging: Option<&str>,
) -> Result<Layout, config::ConfigError> {
    let config = config::load_config(root)?.with_overrides(content, staging)?;
    Ok(Layout::new(root, config))
}

fn stage(layout: &Layout) -> Result<book::StageReport, book::BookError> {
    println!("==> Staging {}", layout.staging_root().display());
    let report = book::stage(layout)?;
    output::print_stage_output(&report, &layout.root);
    output::eprint_warnings(&report, &layout.config.content_dir);
    Ok(report)
}
