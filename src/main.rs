use anyhow::Result;

use purchase_classifier::ExperimentConfig;

fn main() -> Result<()> {
    env_logger::init();

    let outcome = purchase_classifier::run(&ExperimentConfig::default())?;
    println!("Model accuracy: {:.2}", outcome.accuracy);

    Ok(())
}
