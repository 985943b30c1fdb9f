use clap::Parser;
use harmonia::domain::model::TraitProfile;
use harmonia::utils::{logger, validation::Validate};
use harmonia::{CliConfig, MatchEngine, ScoringSettings, ScoringToml};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    person_a: TraitProfile,
    person_b: TraitProfile,
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting harmonia CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Scoring configuration invalid: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let genetic_a = read_optional(config.genetic_a.as_deref())?;
    let genetic_b = read_optional(config.genetic_b.as_deref())?;

    let (traits_a, traits_b) = match &config.profiles {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let profiles: ProfilesFile = serde_json::from_str(&content)?;
            (profiles.person_a, profiles.person_b)
        }
        None => {
            tracing::warn!("No profiles file; personality traits treated as missing");
            (TraitProfile::new(), TraitProfile::new())
        }
    };

    let engine = MatchEngine::new(settings);
    match engine.compare_raw(
        &genetic_a,
        &genetic_b,
        &traits_a,
        &traits_b,
        config.visual_score,
    ) {
        Ok(outcome) => {
            let json = serde_json::to_string_pretty(&outcome)?;
            match &config.output {
                Some(path) => {
                    std::fs::write(path, &json)?;
                    tracing::info!("Result written to {}", path.display());
                    println!("Result written to {}", path.display());
                }
                None => println!("{}", json),
            }
            println!("Overall compatibility: {:.1}", outcome.overall.rounded());
        }
        Err(e) => {
            tracing::error!("Comparison failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> harmonia::Result<ScoringSettings> {
    let settings = match &config.config {
        Some(path) => {
            let toml = ScoringToml::from_file(path)?;
            ScoringSettings::from_toml(&toml)
        }
        None => ScoringSettings::default(),
    };
    let settings = settings.apply_cli_overrides(config);
    settings.validate_config()?;
    Ok(settings)
}

fn read_optional(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => Ok(String::new()),
    }
}
