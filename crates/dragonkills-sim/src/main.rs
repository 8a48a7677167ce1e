//! Plays one Green Dragon encounter and prints the report as JSON.

use dragonkills_core::character::Character;
use dragonkills_sim::encounter::{self, EncounterReport};
use dragonkills_sim::error::SimError;
use dragonkills_sim::settings::Settings;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let settings = Settings::from_env()?;
    let config = settings.module_config()?;
    tracing::info!(?settings, required_level = config.required_level, "starting simulation");

    let host = encounter::build_host(&settings);
    let village_id = encounter::populate(&host, config).await?;

    let mut hero = Character::new(Uuid::new_v4(), "Violet");
    hero.level = settings.hero_level;
    hero.max_health = settings.hero_level.saturating_mul(12);
    hero.health = hero.max_health;

    let report: EncounterReport = encounter::play(&host, village_id, &mut hero).await?;
    tracing::info!(outcome = ?report.outcome, rounds = report.rounds, "encounter finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
