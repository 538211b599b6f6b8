use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use record_sourcer::cite::data::household_wikitable;
use record_sourcer::cite::CitationType;
use record_sourcer::options::REGISTRY;
use record_sourcer::page::RawPageRecord;
use record_sourcer::pipeline;
use record_sourcer::regression::{self, ReferenceMode, SiteFixtures, TestContext};
use record_sourcer::settings::Settings;
use record_sourcer::sites::{self, Site, SITES};

#[derive(Parser)]
#[command(name = "record_sourcer", about = "Genealogy record citations from captured record pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the site-specific extracted record as JSON
    Extract {
        /// Page snapshot (front matter + markdown)
        snapshot: PathBuf,
    },
    /// Print the generalized record as JSON
    Generalize { snapshot: PathBuf },
    /// Print the household table as wikitext
    Table { snapshot: PathBuf },
    /// Build a citation
    Cite {
        snapshot: PathBuf,
        /// inline, source or narrative
        #[arg(short = 't', long = "type", default_value = "inline")]
        citation_type: CitationType,
        /// Option override, e.g. citation_fmp_dataStyle=list
        #[arg(short = 'o', long = "option", value_parser = parse_key_val)]
        options: Vec<(String, String)>,
        /// JSON file of option overrides (replaces the configured one)
        #[arg(long)]
        options_file: Option<PathBuf>,
    },
    /// Run the golden-file regression tests
    Test {
        /// Only this site (fmp, wikitree, np)
        #[arg(short, long)]
        site: Option<String>,
        /// Fail on missing references instead of recording them
        #[arg(long)]
        strict: bool,
    },
    /// List citation option keys
    Options {
        /// Only the keys this site reads
        #[arg(short, long)]
        site: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("loading settings")?;

    let result = match cli.command {
        Commands::Extract { snapshot } => {
            let page = load(&snapshot)?;
            let record = pipeline::extract(&page)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Generalize { snapshot } => {
            let page = load(&snapshot)?;
            let data = pipeline::generalize(&pipeline::extract(&page)?)?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Commands::Table { snapshot } => {
            let page = load(&snapshot)?;
            let data = pipeline::generalize(&pipeline::extract(&page)?)?;
            match pipeline::household_table(&data) {
                Some(table) => {
                    if let Some(ambiguity) = &table.ambiguity {
                        eprintln!("note: {}", ambiguity);
                    }
                    println!("{}", household_wikitable(&table).to_wikitext());
                }
                None => println!("A {} record has no household table.", data.record_type),
            }
            Ok(())
        }
        Commands::Cite {
            snapshot,
            citation_type,
            options,
            options_file,
        } => {
            if options_file.is_some() {
                settings.options_file = options_file;
            }
            // validated before the page is even read
            let options = settings.citation_options(&options)?;
            let page = load(&snapshot)?;
            let out = pipeline::run(&page, &options, citation_type)?;
            println!("{}", out.citation.text);
            Ok(())
        }
        Commands::Test { site, strict } => run_tests(&settings, site.as_deref(), strict),
        Commands::Options { site } => {
            let keys = match site.as_deref() {
                Some(id) => Some(find_site(id)?.option_keys()),
                None => None,
            };
            println!("{:<44} | {:<16} | {}", "Key", "Default", "Values");
            println!("{}", "-".repeat(100));
            for def in REGISTRY.iter().filter(|d| keys.as_ref().map_or(true, |k| k.contains(&d.key))) {
                println!("{:<44} | {:<16} | {}", def.key, def.default, def.domain.join(", "));
                println!("{:<44}   {}", "", truncate(def.description, 70));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load(path: &Path) -> Result<RawPageRecord> {
    RawPageRecord::load(path).with_context(|| format!("reading snapshot {}", path.display()))
}

fn find_site(id: &str) -> Result<&'static Site> {
    sites::lookup(id).with_context(|| format!("unknown site '{}'", id))
}

fn run_tests(settings: &Settings, site: Option<&str>, strict: bool) -> Result<()> {
    let targets: Vec<&'static Site> = match site {
        Some(id) => vec![find_site(id)?],
        None => SITES.to_vec(),
    };
    let mode = if strict { ReferenceMode::Strict } else { ReferenceMode::Record };
    let ctx = TestContext::new(&settings.fixtures_dir, &settings.results_dir, mode);

    let mut total = 0;
    for site in targets.iter().copied() {
        total += SiteFixtures::load(&ctx, site)?.cases.len() * 3;
    }
    println!("Running {} stage cases from {}...", total, settings.fixtures_dir.display());

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .context("progress bar template")?
            .progress_chars("#>-"),
    );
    let ctx = ctx.with_progress(pb.clone());

    let mut reports = Vec::new();
    for site in targets {
        reports.extend(regression::run_all(&ctx, site)?);
    }
    pb.finish_and_clear();

    for report in &reports {
        println!("{}", report.summary());
    }
    let failed: usize = reports.iter().map(|r| r.failures().len()).sum();
    if failed > 0 {
        bail!("{} regression case(s) failed", failed);
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
