//! The single top-level command: run the pipeline against a photo and
//! emit the report JSON.

use threadprint_core::{Pipeline, Settings};

use crate::commands::{load_dotenv, print_json};
use crate::image;

pub async fn run(
    image: &str,
    focus: Option<&str>,
    output: Option<&str>,
) -> Result<(), String> {
    // Load .env / .env.local if present (for API keys, etc.)
    load_dotenv();

    let settings = Settings::from_env();
    let pipeline = Pipeline::from_settings(&settings).map_err(|e| e.to_string())?;

    let image_reference = image::to_image_reference(image)?;

    let result = pipeline
        .run(&image_reference, focus)
        .await
        .map_err(|e| e.to_string())?;

    let value =
        serde_json::to_value(&result).map_err(|e| format!("Failed to serialize report: {}", e))?;

    match output {
        Some(path) => {
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| value.to_string());
            std::fs::write(path, pretty)
                .map_err(|e| format!("Failed to write '{}': {}", path, e))?;
            println!("Report written to {}", path);
        }
        None => print_json(&value),
    }

    Ok(())
}
