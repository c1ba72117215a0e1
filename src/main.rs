use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use glowmatch::catalog::{load_catalog, load_document, load_profile};
use glowmatch::color::{BlendMode, OpacityClass};
use glowmatch::config::Config;
use glowmatch::metrics::{CelebProfile, FiveMetrics, RawFiveMetrics};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a catalog against a skin profile and print the diversified top picks
    Recommend {
        /// Skin profile file (.json, .yaml or .yml)
        #[arg(long)]
        profile: PathBuf,
        /// Product catalog file (.json, .yaml or .yml)
        #[arg(long)]
        catalog: PathBuf,
        /// Maximum products per category (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_per_category: Option<u64>,
        /// Maximum products overall (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        total: Option<u64>,
        /// Print JSON instead of a table
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
        /// Print tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
        /// Show each factor's contribution under every product
        #[arg(long)]
        explain: bool,
        /// Skin hex color; previews each product shade on it
        #[arg(long)]
        skin: Option<String>,
    },
    /// Run a JSON match request body through the request handler
    ServeRequest {
        /// Request body file ({"skinProfile": {...}})
        #[arg(long)]
        request: PathBuf,
        /// Product catalog file
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Render one product color over a skin color
    Render {
        /// Skin hex color (e.g. #8B6547)
        #[arg(long)]
        skin: String,
        /// Product hex color
        #[arg(long)]
        product: String,
        /// Coverage tier: tint, matte or cushion
        #[arg(long, default_value = "matte")]
        class: OpacityClass,
        /// Blend mode: multiply or screen (defaults to config)
        #[arg(long)]
        mode: Option<BlendMode>,
        /// Melanin index (1-6); deeper skin gets more coverage
        #[arg(long)]
        melanin: Option<i32>,
    },
    /// Render a product color at all three coverage tiers
    Swatch {
        /// Skin hex color
        #[arg(long)]
        skin: String,
        /// Product hex color
        #[arg(long)]
        product: String,
        /// Melanin index (1-6)
        #[arg(long)]
        melanin: Option<i32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compare a user's five metrics with a celeb's look
    CelebGap {
        /// User metrics file
        #[arg(long)]
        user: PathBuf,
        /// Celeb profile file
        #[arg(long)]
        celeb: PathBuf,
        /// User file holds raw analyzer measurements to normalize first
        #[arg(long)]
        raw: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the default config file
    Init {
        /// Where to write (defaults to ~/.config/glowmatch/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "glowmatch")]
#[command(about = "Skin-profile product matching and shade preview CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/glowmatch/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Err(e) = glowmatch::telemetry::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Commands::Init { path, force } = &cli.command {
        match glowmatch::config::write_default_config(path.clone(), *force) {
            Ok(written) => {
                println!("Wrote default config to {}", written.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match glowmatch::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = glowmatch::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let outcome = run(cli.command, config, cli.verbose);

    if cli.verbose {
        eprintln!("Finished in {:?}", start_time.elapsed());
    }

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn run(command: Commands, config: Config, verbose: bool) -> Result<i32> {
    let use_colors = glowmatch::output::should_use_colors();

    match command {
        Commands::Recommend {
            profile,
            catalog,
            max_per_category,
            total,
            json,
            tsv,
            explain,
            skin,
        } => {
            let profile = load_profile(&profile)?;
            let products = read_catalog(&catalog, verbose)?;

            let mut scoring = config.scoring;
            if let Some(n) = max_per_category {
                scoring.diversify.max_per_category = n as usize;
            }
            if let Some(n) = total {
                scoring.diversify.total = n as usize;
            }

            let picks = glowmatch::scoring::recommend(&products, &profile, &scoring);
            if verbose {
                eprintln!(
                    "Scored {} products, kept {} (max {} per category)",
                    products.len(),
                    picks.len(),
                    scoring.diversify.max_per_category
                );
            }

            if json {
                let body = serde_json::to_string_pretty(&picks)
                    .context("Failed to encode recommendations")?;
                println!("{}", body);
            } else if tsv {
                let body = glowmatch::output::format_tsv(&picks);
                if !body.is_empty() {
                    println!("{}", body);
                }
            } else {
                println!(
                    "{}",
                    glowmatch::output::format_recommendations(&picks, use_colors, explain)
                );
            }

            if let Some(skin_hex) = skin {
                for scored in &picks {
                    let preview = glowmatch::color::preview_product_shade(
                        &config.render,
                        &scored.product,
                        &skin_hex,
                        Some(profile.melanin_index),
                    );
                    if let Some(set) = preview {
                        let set = set.with_context(|| {
                            format!("Failed to preview shade of {}", scored.product.id)
                        })?;
                        println!();
                        println!("{}", scored.product.display_name());
                        println!("{}", glowmatch::output::format_swatch_set(&set, use_colors));
                    }
                }
            }
            Ok(EXIT_SUCCESS)
        }
        Commands::ServeRequest { request, catalog } => {
            let body = std::fs::read_to_string(&request)
                .with_context(|| format!("Failed to read request at {}", request.display()))?;
            let products = read_catalog(&catalog, verbose)?;

            let (status, response) =
                glowmatch::service::handle_json(&body, &products, &config.scoring);
            println!("{}", response);
            if verbose {
                eprintln!("Status: {}", status);
            }
            Ok(if status == 200 { EXIT_SUCCESS } else { EXIT_INPUT })
        }
        Commands::Render {
            skin,
            product,
            class,
            mode,
            melanin,
        } => {
            let mode = mode.unwrap_or(config.render.default_mode);
            let rendered = config.render.render(&skin, &product, class, melanin, mode)?;
            if verbose {
                eprintln!(
                    "{} {} at {:.2} opacity",
                    class.as_str(),
                    mode,
                    config.render.opacity_for(class, melanin)
                );
            }
            println!("{}", glowmatch::output::format_rendered(&rendered, use_colors));
            Ok(EXIT_SUCCESS)
        }
        Commands::Swatch {
            skin,
            product,
            melanin,
            json,
        } => {
            let set = config.render.swatch_set(&skin, &product, melanin)?;
            if json {
                let body =
                    serde_json::to_string_pretty(&set).context("Failed to encode swatch set")?;
                println!("{}", body);
            } else {
                println!("{}", glowmatch::output::format_swatch_set(&set, use_colors));
            }
            Ok(EXIT_SUCCESS)
        }
        Commands::CelebGap {
            user,
            celeb,
            raw,
            json,
        } => {
            let user_metrics: FiveMetrics = if raw {
                let measured: RawFiveMetrics = load_document(&user)?;
                glowmatch::metrics::normalize_metrics(&measured).into()
            } else {
                load_document(&user)?
            };
            let celeb: CelebProfile = load_document(&celeb)?;

            let report = glowmatch::metrics::analyze_celeb_match(&user_metrics, &celeb)?;
            if json {
                let body =
                    serde_json::to_string_pretty(&report).context("Failed to encode report")?;
                println!("{}", body);
            } else {
                println!("{}", glowmatch::output::format_gap_report(&report, use_colors));
            }
            Ok(EXIT_SUCCESS)
        }
        // Handled before config loading
        Commands::Init { .. } => Ok(EXIT_SUCCESS),
    }
}

fn read_catalog(path: &Path, verbose: bool) -> Result<Vec<glowmatch::catalog::Product>> {
    let load_start = Instant::now();
    let products = load_catalog(path)?;
    if verbose {
        eprintln!(
            "Loaded {} products from {} in {:?}",
            products.len(),
            path.display(),
            load_start.elapsed()
        );
    }
    Ok(products)
}
