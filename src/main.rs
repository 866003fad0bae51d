use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chromedriver_fetch::catalog::resolver::{VersionFilter, resolve};
use chromedriver_fetch::catalog::types::{Arch, Platform, Source, VersionRecord};
use chromedriver_fetch::config::{DEFAULT_OUTPUT_DIR, Endpoints};
use chromedriver_fetch::download::HttpDownloader;
use chromedriver_fetch::local::scan_present_majors;
use chromedriver_fetch::reconcile::{DriverDownloader, download_missing, find_missing};
use chromedriver_fetch::remote::{
    CatalogSource, LegacyCatalogSource, ModernCatalogSource, fetch_combined,
};

#[derive(Parser)]
#[command(name = "chromedriver-fetch")]
#[command(version, about = "Download manager for ChromeDriver builds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available versions
    List {
        /// Filter by platform
        #[arg(long)]
        platform: Option<PlatformArg>,
        /// Filter by architecture
        #[arg(long)]
        arch: Option<ArchArg>,
        /// Filter by version prefix or exact version (e.g. "114")
        #[arg(long)]
        version: Option<String>,
        /// Keep only the newest build of each major version
        #[arg(long)]
        latest: bool,
        /// Skip the legacy (Chrome < 115) catalog
        #[arg(long)]
        no_legacy: bool,
    },
    /// Download a specific version
    Download {
        /// Platform to download for
        #[arg(long)]
        platform: PlatformArg,
        /// Version to download, e.g. "114.0.5735.90" (a bare major like
        /// "114" works together with --latest)
        #[arg(long)]
        version: String,
        /// Architecture to download for
        #[arg(long, default_value = "x64")]
        arch: ArchArg,
        /// Output directory
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
        /// Resolve a bare major version to its newest build
        #[arg(long)]
        latest: bool,
        /// Skip the legacy (Chrome < 115) catalog
        #[arg(long)]
        no_legacy: bool,
    },
    /// Report and optionally fetch drivers missing from a local directory
    Missing {
        /// Directory containing existing drivers
        #[arg(long)]
        dir: PathBuf,
        /// Platform to check
        #[arg(long)]
        platform: PlatformArg,
        /// Architecture to check
        #[arg(long, default_value = "x64")]
        arch: ArchArg,
        /// Download the missing drivers
        #[arg(long)]
        download: bool,
        /// Consider only the newest build of each major version
        #[arg(long)]
        latest: bool,
        /// Skip the legacy (Chrome < 115) catalog
        #[arg(long)]
        no_legacy: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Windows,
    Linux,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Linux => Platform::Linux,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArchArg {
    X86,
    X64,
}

impl From<ArchArg> for Arch {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::X86 => Arch::X86,
            ArchArg::X64 => Arch::X64,
        }
    }
}

/// Log level comes from RUST_LOG when set, INFO otherwise; logs go to
/// stderr so command output stays clean on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chromedriver_fetch=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    let endpoints = Endpoints::default();

    match command {
        Command::List {
            platform,
            arch,
            version,
            latest,
            no_legacy,
        } => {
            let filter = VersionFilter {
                platform: platform.map(Into::into),
                arch: arch.map(Into::into),
                version,
                include_legacy: !no_legacy,
                latest_only: latest,
            };
            let records = resolve_remote(&endpoints, &filter).await;
            print_records(&records);
        }

        Command::Download {
            platform,
            version,
            arch,
            output,
            latest,
            no_legacy,
        } => {
            // A bare major number with --latest resolves to the newest
            // build of that major; anything else must match exactly.
            let resolve_major = latest && version.chars().all(|c| c.is_ascii_digit());
            let filter = VersionFilter {
                platform: Some(platform.into()),
                arch: Some(arch.into()),
                version: Some(version.clone()),
                include_legacy: !no_legacy,
                latest_only: resolve_major,
            };

            let mut records = resolve_remote(&endpoints, &filter).await;
            if !resolve_major {
                records.retain(|r| r.version.as_str() == version);
            }

            let Some(record) = records.first() else {
                println!(
                    "Version {version} not found for platform {} and architecture {}",
                    Platform::from(platform).as_str(),
                    Arch::from(arch).as_str()
                );
                return Ok(());
            };

            if resolve_major {
                println!("Using latest version: {}", record.version);
            }

            let downloader = HttpDownloader::new();
            match downloader.download(record, &output).await {
                Ok(()) => println!(
                    "ChromeDriver {} downloaded to {}",
                    record.version,
                    output.join(record.major_dir_name()).display()
                ),
                Err(err) => eprintln!("Error downloading driver: {err}"),
            }
        }

        Command::Missing {
            dir,
            platform,
            arch,
            download,
            latest,
            no_legacy,
        } => {
            let filter = VersionFilter {
                platform: Some(platform.into()),
                arch: Some(arch.into()),
                version: None,
                include_legacy: !no_legacy,
                latest_only: latest,
            };

            let records = resolve_remote(&endpoints, &filter).await;
            if records.is_empty() {
                println!("Could not obtain the list of available versions.");
                return Ok(());
            }

            let present = scan_present_majors(&dir);
            let missing = find_missing(&records, &present);
            if missing.is_empty() {
                println!("No missing drivers found.");
                return Ok(());
            }

            println!("Found {} missing drivers:", missing.len());
            for (i, record) in missing.iter().enumerate() {
                println!(
                    "{}. {} (full version: {})",
                    i + 1,
                    record.major_dir_name(),
                    record.version
                );
            }

            if download {
                let downloader = HttpDownloader::new();
                let report = download_missing(missing, &dir, &downloader).await;
                println!(
                    "Downloaded {} drivers, {} failed.",
                    report.downloaded.len(),
                    report.failed.len()
                );
                for (record, err) in &report.failed {
                    eprintln!("  {}: {err}", record.version);
                }
            }
        }
    }

    Ok(())
}

/// Fetches both catalogs and resolves them through the filter, warning
/// about (but surviving) a single-source failure.
async fn resolve_remote(endpoints: &Endpoints, filter: &VersionFilter) -> Vec<VersionRecord> {
    let modern = ModernCatalogSource::new(&endpoints.modern_url);
    let legacy = LegacyCatalogSource::new(&endpoints.legacy_url);
    let legacy_ref: Option<&dyn CatalogSource> = if filter.include_legacy {
        Some(&legacy)
    } else {
        None
    };

    let combined = fetch_combined(&modern, legacy_ref).await;
    for (source, err) in &combined.failures {
        eprintln!(
            "Warning: could not fetch the {} catalog: {err}",
            source.as_str()
        );
    }

    resolve(combined.modern, combined.legacy, filter)
}

fn print_records(records: &[VersionRecord]) {
    if records.is_empty() {
        println!("No versions found with the specified filters.");
        return;
    }

    println!("Available versions ({}):", records.len());
    for (i, record) in records.iter().enumerate() {
        let tag = if record.source == Source::Legacy {
            " [legacy]"
        } else {
            ""
        };
        println!(
            "{}. {} - {}/{}{}",
            i + 1,
            record.version,
            record.platform.as_str(),
            record.arch.as_str(),
            tag
        );
    }
}
