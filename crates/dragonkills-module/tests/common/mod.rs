//! Shared helpers for end-to-end module tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use dragonkills_core::character::Character;
use dragonkills_core::contracts::{forest, village};
use dragonkills_core::repository::SceneRepository;
use dragonkills_core::scene::{ConnectionGroup, Directionality, Scene, SceneConnection};
use dragonkills_core::viewpoint::Viewpoint;
use dragonkills_host::Host;
use dragonkills_module::{DragonKillsConfig, DragonKillsModule};
use dragonkills_test_support::{FixedClock, MockRng};
use uuid::Uuid;

/// Fixed timestamp used across all flow tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A host with a village and a forest, and the module registered.
pub struct World {
    pub host: Host,
    pub village_id: Uuid,
    pub forest_id: Uuid,
}

/// Builds the world with the default module configuration.
pub async fn world() -> World {
    world_with_config(DragonKillsConfig::default()).await
}

/// Builds the world, then registers the module with `config`.
pub async fn world_with_config(config: DragonKillsConfig) -> World {
    let host = Host::new(
        Box::new(FixedClock(now())),
        Box::new(FixedClock(now())),
        Box::new(MockRng),
    );

    let mut village_scene = Scene::new("Village", "The village square.").with_template(village::TEMPLATE);
    village_scene.add_connection_group(ConnectionGroup::new("lotgd/module-village/outside", "Outside"));
    let mut forest_scene = Scene::new("Forest", "The forest is dark.").with_template(forest::TEMPLATE);
    forest_scene.add_connection_group(ConnectionGroup::new(forest::FIGHT_GROUP, forest::FIGHT_GROUP_TITLE));
    let (village_id, forest_id) = (village_scene.id, forest_scene.id);

    host.scenes().save(village_scene).await.unwrap();
    host.scenes().save(forest_scene).await.unwrap();
    host.scenes()
        .connect(SceneConnection {
            outgoing_scene: village_id,
            outgoing_group: Some("lotgd/module-village/outside".to_owned()),
            incoming_scene: forest_id,
            incoming_group: None,
            directionality: Directionality::Bidirectional,
        })
        .await
        .unwrap();

    host.register_module(Arc::new(DragonKillsModule::new(config)))
        .await
        .unwrap();

    World {
        host,
        village_id,
        forest_id,
    }
}

/// A character of `level` with `health` points.
pub fn hero(level: u32, health: u32) -> Character {
    let mut character = Character::new(Uuid::new_v4(), "Hero");
    character.level = level;
    character.health = health;
    character.max_health = health;
    character
}

/// Titles of every action the viewpoint offers.
pub fn titles(viewpoint: &Viewpoint) -> Vec<String> {
    viewpoint.actions().map(|action| action.title.clone()).collect()
}

/// Takes the first action titled `title` offered by `viewpoint`.
pub async fn take(world: &World, character: &mut Character, viewpoint: &Viewpoint, title: &str) -> Viewpoint {
    let action_id = action_id(viewpoint, title);
    world
        .host
        .take_action(character, action_id)
        .await
        .unwrap()
}

/// Id of the first action titled `title`.
pub fn action_id(viewpoint: &Viewpoint, title: &str) -> Uuid {
    viewpoint
        .actions()
        .find(|action| action.title == title)
        .unwrap_or_else(|| panic!("no action {title:?} in {:?}", titles(viewpoint)))
        .id
}

/// Logs in at the village and walks into the forest.
pub async fn enter_forest(world: &World, character: &mut Character) -> Viewpoint {
    let new_day = world.host.start(character, world.village_id).await.unwrap();
    let village_view = take(world, character, &new_day, "Continue").await;
    take(world, character, &village_view, "Forest").await
}

/// Attacks until the battle is over and returns the final viewpoint.
pub async fn fight_to_the_end(world: &World, character: &mut Character, mut viewpoint: Viewpoint) -> Viewpoint {
    for _ in 0..100 {
        if !titles(&viewpoint).iter().any(|title| title == "Attack") {
            return viewpoint;
        }
        viewpoint = take(world, character, &viewpoint, "Attack").await;
    }
    panic!("battle did not end");
}
