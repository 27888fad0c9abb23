use anyhow::Result;
use titanic_survival::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_survival=info".into()),
        )
        .init();

    println!("=== Titanic Prediction ===\n");

    let config = Config::load()?;
    let summary = run(&config)?;

    println!("Training rows: {}", summary.train_rows);
    println!("Model features: {}", summary.feature_names.join(", "));
    println!(
        "Solver: {} iterations ({})",
        summary.fit.iterations,
        if summary.fit.converged { "converged" } else { "not converged" }
    );
    println!("[METRIC] TRAIN accuracy = {:.4}", summary.train_accuracy);
    println!("Test rows predicted: {}", summary.test_rows);
    println!("Predictions written to {}", config.output_file.display());
    println!("\n[DONE]");

    Ok(())
}
