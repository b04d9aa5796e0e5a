use clap::Parser;
use git_active_files::{self, ActiveFilesOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

fn parse_extension(s: &str) -> std::result::Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        Err("Extension cannot be empty".to_string())
    } else if s.starts_with('.') {
        Ok(s.to_string())
    } else {
        Ok(format!(".{s}"))
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path inside the Git working tree
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Only list files with this extension (e.g. `.rs`)
    #[arg(short, long, value_parser = parse_extension, conflicts_with = "no_ext")]
    ext: Option<String>,

    /// Only list files without an extension
    #[arg(long)]
    no_ext: bool,

    /// Also list files deleted in the index
    #[arg(short = 'd', long)]
    include_deleted: bool,

    /// Print absolute paths rooted at the working tree toplevel
    #[arg(short, long)]
    absolute: bool,

    /// Print the result as a JSON array
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(global = true, short, long, value_enum, default_value = "error")]
    log: LevelFilter,
}

#[tokio::main]
async fn main() -> git_active_files::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive(cli.log.into());

    fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .pretty()
        .init();

    let processor = git_active_files::new(&cli.repo)?;

    let mut options = if cli.absolute {
        ActiveFilesOptions::new(processor.toplevel()?)
    } else {
        ActiveFilesOptions::relative()
    };
    options = options
        .include_deleted(cli.include_deleted)
        .no_extension(cli.no_ext);
    if let Some(ext) = cli.ext {
        options = options.file_extension(ext);
    }
    debug!(options = ?options, "Collecting active files");

    let mut files = processor.active_files(&options)?;
    files.sort();

    if cli.json {
        // lossy so names that are not UTF-8 still print
        let names: Vec<_> = files.iter().map(|path| path.to_string_lossy()).collect();
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &names).map_err(std::io::Error::from)?;
        writeln!(stdout)?;
    } else {
        for path in &files {
            println!("{}", path.display());
        }
    }

    Ok(())
}
