use std::path::PathBuf;

use clap::Parser;
use gobuild_constraints::context::{host_goarch, host_goos};
use gobuild_constraints::{BuildContext, BuildFilter};
use tracing::{debug, warn, Level};

/// Print the Go source files that take part in a build.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source files to check (slash-separated paths)
    files: Vec<String>,
    /// Target operating system (defaults to the host)
    #[arg(long)]
    goos: Option<String>,
    /// Target architecture (defaults to the host)
    #[arg(long)]
    goarch: Option<String>,
    /// Extra build tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    /// Newest supported Go 1.x minor version
    #[arg(long, default_value_t = 21)]
    go_minor: u32,
    /// JSON build context; replaces --goos/--goarch/--tags/--go-minor
    #[arg(long)]
    context: Option<PathBuf>,
    /// Only apply the file name rules, do not read file contents
    #[arg(long)]
    names_only: bool,
    /// Log every exclusion to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn load_context(args: &Args) -> Result<BuildContext, String> {
    if let Some(path) = &args.context {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        return serde_json::from_str(&raw).map_err(|e| format!("invalid build context: {e}"));
    }
    let goos = args.goos.clone().unwrap_or_else(|| host_goos().to_string());
    let goarch = args.goarch.clone().unwrap_or_else(|| host_goarch().to_string());
    Ok(BuildContext::release(goos, goarch, args.go_minor).with_tags(args.tags.iter().cloned()))
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    let ctx = match load_context(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let filter = BuildFilter::new(&ctx);

    if args.names_only {
        for path in filter.retain_names(&args.files) {
            println!("{path}");
        }
        return;
    }

    for path in &args.files {
        let src = match std::fs::read_to_string(path) {
            Ok(src) => src,
            Err(e) => {
                warn!(path = %path, error = %e, "cannot read file, excluded");
                continue;
            }
        };
        if filter.includes(path, &src) {
            println!("{path}");
        } else {
            debug!(path = %path, "excluded");
        }
    }
}
