use std::{env, fs};

use imsc_model::ReaderOptions;
use imsc_reader::read_imsc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let input_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/test_data/real_world.ttml".to_owned());
    let content = fs::read_to_string(&input_path)?;

    let parsed = read_imsc(&content, &ReaderOptions::default())?;

    for diagnostic in &parsed.diagnostics {
        eprintln!("{diagnostic}");
    }
    println!("{}", serde_json::to_string_pretty(&parsed.document)?);

    Ok(())
}
