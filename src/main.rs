use clap::Parser;
use quire::{PipelineBuilder, PipelineError, PolicyKind, manifest};
use std::path::PathBuf;
use std::process::ExitCode;

/// Lay captured question images out into a printable PDF booklet.
#[derive(Parser, Debug)]
#[command(name = "quire", version, about)]
struct Cli {
    /// Path to the JSON manifest listing the template and questions.
    manifest: PathBuf,

    /// Output PDF path.
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory to write into, using the title-and-date file name.
    /// Defaults to the current directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON file overriding page geometry and sizing constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use one full-width column with larger images.
    #[arg(long)]
    single_column: bool,
}

async fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut builder = PipelineBuilder::new();
    if let Some(config) = &cli.config {
        builder = builder.with_config_file(config)?;
    }
    if cli.single_column {
        builder = builder.with_policy(PolicyKind::SingleColumn);
    }
    let pipeline = builder.build()?;

    log::info!("Loading manifest from {}", cli.manifest.display());
    let loaded = manifest::load(&cli.manifest).await?;

    let output = match (cli.output, cli.out_dir) {
        (Some(path), _) => path,
        (None, dir) => dir
            .unwrap_or_else(|| PathBuf::from("."))
            .join(pipeline.file_name(&loaded.template)),
    };

    let questions = loaded.questions.into_vec();
    let template = loaded.template;
    let booklet = pipeline.generate_async(questions, template).await?;
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output, &booklet.pdf).await?;

    for skipped in &booklet.document.skipped {
        eprintln!("skipped question {} (#{}): {}", skipped.id, skipped.order, skipped.reason);
    }
    println!(
        "Wrote {} ({} pages, {} questions)",
        output.display(),
        booklet.document.page_count(),
        booklet.document.placed_count()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
