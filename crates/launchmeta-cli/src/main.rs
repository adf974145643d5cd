//! `launchmeta` CLI — decode launcher manifests and plan client launches.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a manifest to pretty-printed JSON
//! launchmeta decode -i version_manifest_v2.json
//!
//! # Resolve a version id to its manifest URL
//! launchmeta resolve --version 1.21.4 -i version_manifest_v2.json
//!
//! # List libraries that are not yet on disk
//! launchmeta libraries -i 1.21.4.json --root libraries --missing
//!
//! # Show what a launch would download and run
//! launchmeta plan --version 1.21.4 -i 1.21.4.json --dir ~/games/mc
//!
//! # The same through the installed mod loader
//! launchmeta plan --version 1.21.5 --loader --dir ~/games/mc
//!
//! # Check a Java runtime
//! java -version 2>&1 | launchmeta java-check --min 21
//!
//! # Print the effective launcher config
//! launchmeta config --config launcher.json
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`) to see skipped manifest entries.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use launchmeta_core::{
    java, manifest, DecodeOptions, Decoder, JsonValue, LauncherConfig, LoaderInstall, ScanMode,
    StringMode, DEFAULT_MAX_DEPTH,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "launchmeta",
    version,
    about = "Decode launcher manifests and plan client launches"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a JSON document and print it
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        scan: ScanArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the manifest URL for a version from a version index
    Resolve {
        /// Version id, e.g. 1.21.4
        #[arg(long)]
        version: String,
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Launcher config (JSON); built-in defaults if omitted
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// List the versions of a version index
    Versions {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// List library artifacts of a version manifest
    Libraries {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Library root used to check for existing files
        #[arg(long, default_value = "libraries")]
        root: PathBuf,
        /// Only list artifacts missing under --root
        #[arg(long)]
        missing: bool,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Show downloads and the launch command for a version manifest
    Plan {
        #[arg(long)]
        version: String,
        /// Version manifest; not read with --loader
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Launcher config (JSON); built-in defaults if omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Game directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Launch through the mod loader installed under the game directory
        #[arg(long)]
        loader: bool,
        /// Java executable placed at the head of the command
        /// (default: $JAVA_HOME/bin/java, else java from PATH)
        #[arg(long)]
        java: Option<PathBuf>,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Check `java -version` output against a minimum major version
    JavaCheck {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Minimum major version (default: min_java_major from the config)
        #[arg(long)]
        min: Option<u32>,
        /// Launcher config (JSON); built-in defaults if omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective launcher config as JSON
    Config {
        /// Launcher config (JSON); built-in defaults if omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ScanArgs {
    /// Skip quoted text when matching brackets, and honor \" in strings
    #[arg(long)]
    quote_aware: bool,
    /// Decode escape sequences in strings
    #[arg(long)]
    unescape: bool,
    /// Containers nested deeper than this are kept as raw text
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl ScanArgs {
    fn decoder(&self) -> Decoder {
        Decoder::new(DecodeOptions {
            scan: if self.quote_aware {
                ScanMode::QuoteAware
            } else {
                ScanMode::Fast
            },
            strings: if self.unescape {
                StringMode::Unescape
            } else {
                StringMode::Raw
            },
            max_depth: self.max_depth,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Pretty JSON via serde_json
    Json,
    /// The decoder's own text form (raw strings, bare literals)
    Raw,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            output,
            scan,
            format,
        } => {
            let value = read_document(input.as_deref(), &scan)?;
            let text = match format {
                Format::Json => serde_json::to_string_pretty(&value.to_serde())?,
                Format::Raw => launchmeta_core::encode_pretty(&value),
            };
            write_output(output.as_deref(), &format!("{text}\n"))?;
        }
        Commands::Resolve {
            version,
            input,
            config,
            scan,
        } => {
            let config = load_config(config.as_deref())?;
            let index = read_document(input.as_deref(), &scan)?;
            match manifest::find_manifest_url(&index, &version) {
                Some(url) => println!("{url}"),
                None => bail!(
                    "Version {version} not found in version index ({})",
                    config.index_url
                ),
            }
        }
        Commands::Versions { input, scan } => {
            let index = read_document(input.as_deref(), &scan)?;
            for entry in manifest::versions(&index) {
                println!("{}\t{}\t{}", entry.id, entry.kind.unwrap_or("-"), entry.url);
            }
        }
        Commands::Libraries {
            input,
            root,
            missing,
            scan,
        } => {
            let doc = read_document(input.as_deref(), &scan)?;
            for artifact in manifest::library_artifacts(&doc) {
                if missing && artifact.local_path(&root).exists() {
                    continue;
                }
                println!("{}\t{}", artifact.path, artifact.url);
            }
        }
        Commands::Plan {
            version,
            input,
            config,
            dir,
            loader,
            java,
            scan,
        } => {
            let config = load_config(config.as_deref())?;
            let planned = if loader {
                LoaderInstall::locate(&config.loader, &dir).and_then(|install| {
                    launchmeta_core::plan_loader_launch(&config, &version, &install, &dir, |p| {
                        p.exists()
                    })
                })
            } else {
                let doc = read_document(input.as_deref(), &scan)?;
                launchmeta_core::plan_launch(&config, &version, &doc, &dir, |p| p.exists())
            };
            let plan = planned.with_context(|| format!("Failed to plan launch of {version}"))?;

            println!("downloads: {}", plan.downloads.len());
            for download in &plan.downloads {
                println!("  {} -> {}", download.url, download.dest.display());
            }
            println!("workdir: {}", plan.working_dir.display());
            let java = java.unwrap_or_else(default_java);
            let argv = plan.command(java.as_os_str())?;
            let rendered: Vec<String> = argv
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect();
            println!("command: {}", rendered.join(" "));
        }
        Commands::JavaCheck { input, min, config } => {
            let min = match min {
                Some(min) => min,
                None => load_config(config.as_deref())?.min_java_major,
            };
            let output = read_input(input.as_deref())?;
            let line = java::find_version_line(&output)
                .context("No version line found in java -version output")?;
            let major = java::parse_java_major(line)
                .with_context(|| format!("Could not parse Java version from: {line}"))?;
            if !java::meets_minimum(line, min) {
                bail!("Java {major} found, {min}+ required");
            }
            println!("java {major}");
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// First Java candidate that exists on disk, else the first candidate.
fn default_java() -> PathBuf {
    let java_home = std::env::var_os("JAVA_HOME").map(PathBuf::from);
    let candidates = java::candidates(java_home.as_deref());
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from("java"))
}

fn load_config(path: Option<&Path>) -> Result<LauncherConfig> {
    match path {
        Some(path) => LauncherConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(LauncherConfig::default()),
    }
}

fn read_document(path: Option<&Path>, scan: &ScanArgs) -> Result<JsonValue> {
    let text = read_input(path)?;
    let value = scan
        .decoder()
        .decode(&text)
        .context("Failed to decode document")?;
    tracing::debug!(kind = %value.kind(), bytes = text.len(), "decoded document");
    Ok(value)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
