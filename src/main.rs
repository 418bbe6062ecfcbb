//! Customer Churn Prediction - Interactive Form
//!
//! Loads the fitted artifacts, then prompts for customer details in a loop
//! and prints the churn probability and verdict for each profile.

use anyhow::{Context, Result};
use churn_prediction_pipeline::{
    config::AppConfig, metrics::SessionMetrics, pipeline::ChurnPipeline,
    types::customer::CustomerProfile, types::prediction::ChurnLabel,
};
use dialoguer::{console::style, theme::ColorfulTheme, Confirm, Input, Select};
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("churn_prediction_pipeline=info".parse()?),
        )
        .init();

    info!("Starting customer churn prediction");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Load all artifacts up front; refuse to serve anything on failure
    let pipeline = match ChurnPipeline::load(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(error = %e, "Artifact loading failed, refusing to serve predictions");
            anyhow::bail!("missing model or preprocessing artifacts: {e}");
        }
    };

    let metrics = SessionMetrics::new();
    let theme = ColorfulTheme::default();

    println!();
    println!("{}", style("Customer Churn Prediction").bold());
    println!("Enter customer details below to predict the likelihood of churn.");
    println!();

    loop {
        let profile = prompt_profile(&pipeline, &theme).context("Form input failed")?;

        let start = Instant::now();
        match pipeline.predict(&profile) {
            Ok(prediction) => {
                metrics.record_prediction(start.elapsed(), prediction.probability, prediction.label);

                println!();
                println!("Churn probability: {:.2}", prediction.probability);
                let verdict = format!("The customer is {}.", prediction.label.verdict());
                match prediction.label {
                    ChurnLabel::Churn => println!("{}", style(verdict).red().bold()),
                    ChurnLabel::NoChurn => println!("{}", style(verdict).green().bold()),
                }
                println!();
            }
            Err(e) => {
                // Log the specific kind, show the user a generic message
                metrics.record_rejected();
                warn!(error = %e, "Prediction request failed");
                println!();
                println!(
                    "{}",
                    style("An error occurred. Please check your input and try again.").red()
                );
                println!();
            }
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Score another customer?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    metrics.print_summary();

    Ok(())
}

/// Prompt for one customer profile, with each field constrained to its
/// declared domain. Categorical options come from the trained encoding
/// tables, so the form cannot produce an unknown category.
fn prompt_profile(pipeline: &ChurnPipeline, theme: &ColorfulTheme) -> Result<CustomerProfile> {
    let geography_options = pipeline.geography_options();
    let geography_idx = Select::with_theme(theme)
        .with_prompt("Geography")
        .items(geography_options)
        .default(0)
        .interact()?;
    let geography = geography_options[geography_idx].clone();

    let gender_options = pipeline.gender_options();
    let gender_idx = Select::with_theme(theme)
        .with_prompt("Gender")
        .items(gender_options)
        .default(0)
        .interact()?;
    let gender = gender_options[gender_idx].clone();

    let age: i64 = Input::with_theme(theme)
        .with_prompt("Age (18-92)")
        .validate_with(|v: &i64| range_validator(*v, 18, 92))
        .interact_text()?;

    let balance: f64 = Input::with_theme(theme)
        .with_prompt("Balance")
        .default(0.0)
        .validate_with(|v: &f64| non_negative_validator(*v))
        .interact_text()?;

    let credit_score: i64 = Input::with_theme(theme)
        .with_prompt("Credit Score (300-850)")
        .validate_with(|v: &i64| range_validator(*v, 300, 850))
        .interact_text()?;

    let estimated_salary: f64 = Input::with_theme(theme)
        .with_prompt("Estimated Salary")
        .default(0.0)
        .validate_with(|v: &f64| non_negative_validator(*v))
        .interact_text()?;

    let tenure: i64 = Input::with_theme(theme)
        .with_prompt("Tenure (0-10)")
        .validate_with(|v: &i64| range_validator(*v, 0, 10))
        .interact_text()?;

    let num_of_products: i64 = Input::with_theme(theme)
        .with_prompt("Number of Products (1-4)")
        .validate_with(|v: &i64| range_validator(*v, 1, 4))
        .interact_text()?;

    // Kept as 0/1 selections, matching the numeric encoding the model
    // was trained on
    let has_credit_card = Select::with_theme(theme)
        .with_prompt("Has Credit Card")
        .items(&["0", "1"])
        .default(1)
        .interact()? as i64;

    let is_active_member = Select::with_theme(theme)
        .with_prompt("Is Active Member")
        .items(&["0", "1"])
        .default(1)
        .interact()? as i64;

    Ok(CustomerProfile {
        credit_score,
        gender,
        age,
        tenure,
        balance,
        num_of_products,
        has_credit_card,
        is_active_member,
        estimated_salary,
        geography,
    })
}

fn range_validator(value: i64, min: i64, max: i64) -> Result<(), String> {
    if value < min || value > max {
        Err(format!("must be between {} and {}", min, max))
    } else {
        Ok(())
    }
}

fn non_negative_validator(value: f64) -> Result<(), String> {
    if value < 0.0 {
        Err("must be non-negative".to_string())
    } else {
        Ok(())
    }
}
