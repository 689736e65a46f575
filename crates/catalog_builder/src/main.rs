//! Catalog Builder CLI
//!
//! CSV / JSON → MessagePack+LZ4 catalog cache, cache verification, and
//! facility search from the command line.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "catalog_builder")]
#[command(about = "Build, verify and search sport facility catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build catalog cache from a facility CSV export
    Csv {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Build catalog cache from a catalog JSON file
    Json {
        /// Input JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check a cache file against a checksum and decode it
    Verify {
        #[arg(long)]
        cache: PathBuf,

        /// Expected SHA256 (hex)
        #[arg(long)]
        checksum: String,
    },

    /// Search a catalog (embedded dataset unless --cache is given)
    Search {
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Name, city or address text; not combinable with --lat/--lng,
        /// which search around that point instead
        #[arg(long, default_value = "", conflicts_with_all = ["lat", "lng"])]
        query: String,

        /// Canonical sport key, e.g. "football"
        #[arg(long, default_value = "all")]
        sport: String,

        /// Origin latitude (defaults to Amsterdam)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Origin longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Number of result pages to show
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// List the sport filter options of a catalog
    Sports {
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Csv {
            csv,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building catalog cache from CSV...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());
            println!("   Schema:    {}", schema_version);

            let (meta, stats) = catalog_builder::build_catalog_cache(&csv, &out, &schema_version)?;

            println!(
                "\n   Rows: {} parsed, {} without coordinates, {} duplicates, {} failed",
                stats.parsed, stats.skipped_no_coordinates, stats.duplicates, stats.failed
            );
            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Json {
            r#in,
            out,
            verify,
            metadata,
        } => {
            println!("🔨 Building catalog cache from JSON...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());

            let meta = catalog_builder::build_cache_from_json(&r#in, &out)?;

            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Verify { cache, checksum } => {
            verify_cache_integrity(&cache, &checksum)?;
            let catalog = catalog_builder::load_cache(&cache)?;
            println!(
                "   Facilities: {} (schema {})",
                catalog.len(),
                catalog.schema_version
            );
        }

        Commands::Search {
            cache,
            query,
            sport,
            lat,
            lng,
            pages,
        } => {
            let catalog = open_catalog(cache.as_deref())?;
            run_search(&catalog, &query, &sport, lat.zip(lng), pages)?;
        }

        Commands::Sports { cache } => {
            let catalog = open_catalog(cache.as_deref())?;
            for option in sf_core::sport_options(catalog.as_slice()) {
                println!("{:<20} {}", option.key, option.label);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn open_catalog(cache: Option<&Path>) -> Result<sf_core::FacilityCatalog> {
    match cache {
        Some(path) => catalog_builder::load_cache(path),
        None => Ok(sf_core::catalog::embedded_catalog()?),
    }
}

#[cfg(feature = "cli")]
fn run_search(
    catalog: &sf_core::FacilityCatalog,
    query: &str,
    sport: &str,
    origin: Option<(f64, f64)>,
    pages: usize,
) -> Result<()> {
    use sf_core::{LatLng, SearchConfig, SearchController, SportFilter};

    let mut controller = SearchController::new(catalog, SearchConfig::from_env()?)?;
    controller.set_query(query);
    controller.set_sport(SportFilter::from_key(sport));
    controller.search();

    if let Some((lat, lng)) = origin {
        if let Err(e) = controller.apply_device_location(Ok(LatLng::new(lat, lng))) {
            anyhow::bail!("❌ {}", e);
        }
    }
    controller.reveal_pages(pages.saturating_sub(1));

    let o = controller.origin();
    println!(
        "📍 {} locaties gevonden (origin {:.4}, {:.4})\n",
        controller.total(),
        o.lat,
        o.lng
    );
    for card in controller.visible_cards() {
        let distance = card
            .distance_km
            .map(|d| format!("{d:>6.1} km"))
            .unwrap_or_else(|| "     ? km".to_string());
        println!("{distance}  {}  ({})", card.name, card.address_line);
        if !card.sports.is_empty() {
            println!("           {}", card.sports.join(", "));
        }
    }
    if controller.has_more() {
        println!("\n   … use --pages {} to show more", pages.max(1) + 1);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &catalog_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Facilities:      {}", meta.facility_count);
    println!(
        "   Original size:   {}",
        catalog_builder::human_bytes(meta.original_size)
    );
    println!(
        "   Compressed size: {}",
        catalog_builder::human_bytes(meta.compressed_size)
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = catalog_builder::verify_cache(cache_path, checksum)?;

    if is_valid {
        println!("✅ Cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &catalog_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("catalog_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
