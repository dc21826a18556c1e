use anyhow::Result;
use extract::Extractor;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let extractor = Extractor::from_defaults()?;

    let sample_text = "Elena sat by the window. She remembered her father teaching her to ride a bike in Madrid when she was seven.";
    let character = "Elena";

    println!("Testing Ollama ({}) with full schema...", extractor.model());
    let outcome = extractor.extract_from_chunk(sample_text, character).await;

    println!("{}", serde_json::to_string_pretty(outcome.result())?);

    if outcome.result().is_empty() {
        match outcome.error() {
            Some(e) => println!("\nNo facts extracted: {:#}", e),
            None => println!("\nModel found no facts for {}", character),
        }
    }

    Ok(())
}
