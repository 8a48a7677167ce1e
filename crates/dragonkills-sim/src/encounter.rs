//! Builds a small world and plays one encounter with the dragon.

use std::sync::Arc;

use chrono::Utc;
use dragonkills_core::character::Character;
use dragonkills_core::clock::SystemClock;
use dragonkills_core::contracts::{forest, village};
use dragonkills_core::repository::SceneRepository;
use dragonkills_core::scene::{ConnectionGroup, Directionality, Scene, SceneConnection};
use dragonkills_core::viewpoint::Viewpoint;
use dragonkills_host::Host;
use dragonkills_host::rng::SeededRng;
use dragonkills_host::time::AcceleratedTimeKeeper;
use dragonkills_module::application::query_handlers::count_dragon_kills;
use dragonkills_module::domain::character_ext::CharacterDragonKillExt;
use dragonkills_module::{DragonKillsConfig, DragonKillsModule};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::SimError;
use crate::settings::Settings;

const OUTSIDE_GROUP: &str = "lotgd/module-village/outside";

/// Upper bound on battle rounds before the simulation gives up.
const MAX_ROUNDS: u32 = 1_000;

/// How the encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The forest offered no way to the dragon.
    NotReady,
    /// The hero slew the dragon.
    Won,
    /// The dragon slew the hero.
    Lost,
}

/// Summary of a played encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterReport {
    /// How the encounter ended.
    pub outcome: Outcome,
    /// Battle rounds fought.
    pub rounds: u32,
    /// The hero's level afterwards.
    pub level: u32,
    /// The hero's dragon kill count afterwards.
    pub dragon_kills: u32,
    /// Kills stored by the host.
    pub recorded_kills: usize,
}

/// Creates a host running on wall time, with game time accelerated and
/// battles driven by the seeded RNG.
#[must_use]
pub fn build_host(settings: &Settings) -> Host {
    let time_keeper = AcceleratedTimeKeeper::new(Box::new(SystemClock), Utc::now(), settings.days_per_day);
    Host::new(
        Box::new(SystemClock),
        Box::new(time_keeper),
        Box::new(SeededRng::from_seed(settings.seed)),
    )
}

/// Adds a village with a forest outside, then registers the module.
///
/// Returns the id of the village.
///
/// # Errors
///
/// Returns `SimError::Engine` if storing the scenes or registering fails.
pub async fn populate(host: &Host, config: DragonKillsConfig) -> Result<Uuid, SimError> {
    let mut village_scene = Scene::new("Village", "The village square hustles and bustles.")
        .with_template(village::TEMPLATE);
    village_scene.add_connection_group(ConnectionGroup::new(OUTSIDE_GROUP, "Outside"));
    let mut forest_scene = Scene::new(
        "Forest",
        "The forest, home to evil creatures and evildoers of all sorts.",
    )
    .with_template(forest::TEMPLATE);
    forest_scene.add_connection_group(ConnectionGroup::new(
        forest::FIGHT_GROUP,
        forest::FIGHT_GROUP_TITLE,
    ));
    let (village_id, forest_id) = (village_scene.id, forest_scene.id);

    host.scenes().save(village_scene).await?;
    host.scenes().save(forest_scene).await?;
    host.scenes()
        .connect(SceneConnection {
            outgoing_scene: village_id,
            outgoing_group: Some(OUTSIDE_GROUP.to_owned()),
            incoming_scene: forest_id,
            incoming_group: None,
            directionality: Directionality::Bidirectional,
        })
        .await?;

    host.register_module(Arc::new(DragonKillsModule::new(config)))
        .await?;
    Ok(village_id)
}

/// Walks `hero` from the village to the dragon and fights it.
///
/// # Errors
///
/// Returns `SimError::MissingAction` if the world does not offer the
/// expected path, or `SimError::Engine` if the engine fails.
pub async fn play(host: &Host, village_id: Uuid, hero: &mut Character) -> Result<EncounterReport, SimError> {
    let viewpoint = host.start(hero, village_id).await?;
    let viewpoint = step(host, hero, &viewpoint, "Continue").await?;
    let forest_view = step(host, hero, &viewpoint, "Forest").await?;

    let Some(seek) = forest_view
        .actions()
        .find(|action| action.title.starts_with("Seek out"))
        .map(|action| action.title.clone())
    else {
        info!(%hero, level = hero.level, "the forest offers no way to the dragon");
        return report(host, hero, Outcome::NotReady, 0).await;
    };

    let lair = step(host, hero, &forest_view, &seek).await?;
    let mut viewpoint = step(host, hero, &lair, "Enter the cave").await?;

    let mut rounds = 0;
    while has_action(&viewpoint, "Attack") && rounds < MAX_ROUNDS {
        viewpoint = step(host, hero, &viewpoint, "Attack").await?;
        rounds += 1;
    }

    if has_action(&viewpoint, "Continue") {
        let epilogue = step(host, hero, &viewpoint, "Continue").await?;
        step(host, hero, &epilogue, "It is a new day").await?;
        report(host, hero, Outcome::Won, rounds).await
    } else {
        step(host, hero, &viewpoint, "Return to the village").await?;
        report(host, hero, Outcome::Lost, rounds).await
    }
}

async fn step(host: &Host, hero: &mut Character, viewpoint: &Viewpoint, title: &str) -> Result<Viewpoint, SimError> {
    let action_id = viewpoint
        .actions()
        .find(|action| action.title == title)
        .map(|action| action.id)
        .ok_or_else(|| SimError::MissingAction {
            title: title.to_owned(),
            scene: viewpoint.title.clone(),
        })?;
    let next = host.take_action(hero, action_id).await?;
    info!(action = title, scene = %next.title, health = hero.health, "step");
    Ok(next)
}

fn has_action(viewpoint: &Viewpoint, title: &str) -> bool {
    viewpoint.actions().any(|action| action.title == title)
}

async fn report(host: &Host, hero: &Character, outcome: Outcome, rounds: u32) -> Result<EncounterReport, SimError> {
    Ok(EncounterReport {
        outcome,
        rounds,
        level: hero.level,
        dragon_kills: hero.dragon_kill_count()?,
        recorded_kills: count_dragon_kills(host.records()).await?,
    })
}
