use anyhow::{Context, Result, anyhow};
use catalog::{AttributeData, Category, Product, ProductId, load_category};
use clap::{Parser, Subcommand};
use colored::Colorize;
use filtering::{
    BoundKind, CharacteristicFilterEngine, FacetDetail, FacetSummary, FallbackReason,
    FilterSelection, TextSelectionScope, summarize,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Storefront Filter - browse a category the way its product page filters it
#[derive(Parser)]
#[command(name = "storefront-filter")]
#[command(about = "Filter a storefront category by its characteristics", long_about = None)]
struct Cli {
    /// Path to the category JSON document
    #[arg(short, long, default_value = "data/bikes.json")]
    category: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products visible for a selection
    Filter {
        /// Facet pick as name=value (repeatable)
        #[arg(long = "pick", value_name = "NAME=VALUE")]
        picks: Vec<String>,

        /// Lower bound as name=number (repeatable)
        #[arg(long = "low", value_name = "NAME=NUMBER")]
        lows: Vec<String>,

        /// Upper bound as name=number (repeatable)
        #[arg(long = "high", value_name = "NAME=NUMBER")]
        highs: Vec<String>,

        /// Pool facet picks across all text characteristics
        #[arg(long)]
        shared_text_picks: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the filter sidebar: facet values and numeric bounds
    Facets {
        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one product and its attribute values
    Show {
        /// Product id to display
        #[arg(long)]
        id: ProductId,
    },
}

#[derive(Serialize)]
struct FilterReport<'a> {
    category: &'a str,
    selection: &'a FilterSelection,
    fallback: Option<&'static str>,
    products: Vec<&'a Product>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let category = load_category(&cli.category)
        .with_context(|| format!("Failed to load category from {}", cli.category.display()))?;
    tracing::debug!("Loaded category in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Filter {
            picks,
            lows,
            highs,
            shared_text_picks,
            json,
        } => {
            let scope = if shared_text_picks {
                TextSelectionScope::Shared
            } else {
                TextSelectionScope::PerCharacteristic
            };
            let selection = build_selection(&category, scope, &picks, &lows, &highs)?;
            handle_filter(&category, &selection, json)?
        }
        Commands::Facets { json } => handle_facets(&category, json)?,
        Commands::Show { id } => handle_show(&category, id)?,
    }

    Ok(())
}

/// Turn the repeated flags into a selection and check it against the category
fn build_selection(
    category: &Category,
    scope: TextSelectionScope,
    picks: &[String],
    lows: &[String],
    highs: &[String],
) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new().with_scope(scope);
    for pick in picks {
        selection.apply_pick(pick)?;
    }
    for low in lows {
        selection.apply_bound(BoundKind::Low, low)?;
    }
    for high in highs {
        selection.apply_bound(BoundKind::High, high)?;
    }
    selection
        .validate_against(category)
        .with_context(|| format!("Selection does not fit category '{}'", category.name))?;
    Ok(selection)
}

/// Handle the 'filter' command
fn handle_filter(category: &Category, selection: &FilterSelection, json: bool) -> Result<()> {
    let engine = CharacteristicFilterEngine::new(category);

    let start = Instant::now();
    let outcome = engine.filter_outcome(selection);
    tracing::info!(
        "Filtered {} products down to {} in {:?}",
        category.products.len(),
        outcome.products.len(),
        start.elapsed()
    );

    let fallback = outcome.fallback.map(|reason| match reason {
        FallbackReason::NoCharacteristics => "category has no characteristics",
        FallbackReason::EmptyIntersection => "no product matches every filter",
    });

    if json {
        let report = FilterReport {
            category: &category.name,
            selection,
            fallback,
            products: outcome.products,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format!("Products in '{}':", category.name).bold().blue());
    if let Some(reason) = fallback {
        println!("{} showing everything ({})", "!".yellow(), reason);
    }
    for (rank, product) in outcome.products.iter().enumerate() {
        println!(
            "{}. {} [id {}] - {:.2}",
            (rank + 1).to_string().green(),
            product.name,
            product.id,
            product.price
        );
    }
    Ok(())
}

/// Handle the 'facets' command
fn handle_facets(category: &Category, json: bool) -> Result<()> {
    let summaries = summarize(category);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{}", format!("Filters for '{}':", category.name).bold().blue());
    if summaries.is_empty() {
        println!("  (no characteristics)");
    }
    for summary in &summaries {
        print_facet(summary);
    }
    Ok(())
}

fn print_facet(summary: &FacetSummary) {
    let unit = if summary.unit.is_empty() {
        String::new()
    } else {
        format!(" ({})", summary.unit)
    };
    println!("{}{}{}", "• ".green(), summary.name.bold(), unit);

    match &summary.detail {
        FacetDetail::Values { values } => {
            for value in values {
                println!("    [ ] {} ({})", value.value, value.product_count);
            }
        }
        FacetDetail::Bounds { .. } => {
            if let Some((low, high)) = summary.bound_placeholders() {
                println!("    [{}] - [{}]", low, high);
            }
        }
    }
}

/// Handle the 'show' command
fn handle_show(category: &Category, id: ProductId) -> Result<()> {
    let product = category
        .get_product(id)
        .ok_or_else(|| anyhow!("Product {} not found in '{}'", id, category.name))?;

    println!("{}", format!("Product {}: {}", product.id, product.name).bold().blue());
    println!("{}Price: {:.2}", "• ".cyan(), product.price);
    if let Some(image) = &product.image {
        println!("{}Image: {}", "• ".cyan(), image);
    }

    println!("Attributes:");
    for attribute in &product.attributes {
        let known = category.characteristic(&attribute.name);
        let unit = known.map(|c| c.unit.as_str()).unwrap_or("");
        let rendered = match &attribute.value {
            AttributeData::Text(text) => text.clone(),
            AttributeData::Number(n) => format!("{} {}", n, unit),
            AttributeData::Range(range) => match range.high {
                Some(high) => format!("{}..{} {}", range.low, high, unit),
                None => format!("{}.. {}", range.low, unit),
            },
            AttributeData::Unrecognized(raw) => format!("{} {}", raw, "(unrecognized)".yellow()),
        };
        let label = if known.is_some() {
            attribute.name.normal()
        } else {
            attribute.name.red()
        };
        println!("  - {}: {}", label, rendered.trim_end());
    }
    Ok(())
}
