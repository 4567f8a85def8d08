use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use fauna::lookup::{AnimalLookup, AnimalRecord};
use fauna::{BuiltinModel, Classifier, ModelManager};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the image to classify
    image: PathBuf,

    /// Force a fresh download of the model files
    #[arg(short, long)]
    fresh: bool,

    /// Look up facts about the predicted animal after classification
    #[arg(short, long)]
    lookup: bool,

    /// API key for the animal facts service
    #[arg(long, env = "FAUNA_API_KEY")]
    api_key: Option<String>,
}

async fn ensure_model_downloaded(fresh: bool) -> Result<()> {
    let manager = ModelManager::new_default()?;
    let model = BuiltinModel::MobileNetV1Quant;

    if fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(model)?;
    }

    if !manager.is_model_downloaded(model) {
        info!("Downloading model...");
        manager.download_model(model).await?;
    }

    Ok(())
}

fn print_record(record: &AnimalRecord) {
    let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| "N/A".to_string());

    println!("\n{}", or_na(&record.name));
    println!(
        "  Scientific Name: {}",
        or_na(&record.taxonomy.scientific_name)
    );
    println!("  Kingdom: {}", or_na(&record.taxonomy.kingdom));
    println!("  Class: {}", or_na(&record.taxonomy.taxonomic_class));
    println!("  Family: {}", or_na(&record.taxonomy.family));
    println!("  Locations: {}", record.locations.join(", "));
    println!("  Habitat: {}", or_na(&record.characteristics.habitat));
    println!("  Diet: {}", or_na(&record.characteristics.diet));
    println!("  Lifespan: {}", or_na(&record.characteristics.lifespan));
    println!("  Top Speed: {}", or_na(&record.characteristics.top_speed));
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Animal Classifier Demo ===");

    // Ensure model is downloaded before proceeding
    ensure_model_downloaded(args.fresh).await?;

    let start_time = Instant::now();
    info!("Building classifier...");
    let classifier = Arc::new(
        Classifier::builder()
            .with_model(BuiltinModel::MobileNetV1Quant)?
            .build()?,
    );
    info!(
        "=== Classifier Built Successfully (took {:.2?}) ===",
        start_time.elapsed()
    );

    // The whole prepare -> invoke -> decode sequence blocks, so it runs
    // off the async main thread.
    let image_path = args.image.clone();
    let worker = Arc::clone(&classifier);
    let result = tokio::task::spawn_blocking(move || worker.classify_path(&image_path)).await?;

    let classification = match result {
        Ok(classification) => classification,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    println!("Predicted class: {}", classification.label);
    println!("Confidence: {:.1}%", classification.confidence * 100.0);

    if args.lookup {
        let Some(api_key) = args.api_key else {
            anyhow::bail!("--lookup requires an API key (--api-key or FAUNA_API_KEY)");
        };

        info!("Looking up facts for '{}'...", classification.label);
        let records = AnimalLookup::new(api_key).search(&classification.label).await;
        match records {
            Ok(records) if records.is_empty() => println!("No results found"),
            Ok(records) => {
                for record in &records {
                    print_record(record);
                }
            }
            Err(err) => eprintln!("Error fetching data: {}", err),
        }
    }

    Ok(())
}
