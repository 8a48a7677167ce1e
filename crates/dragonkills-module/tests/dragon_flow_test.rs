//! End-to-end flows of the dragon kills module on the in-memory host.

mod common;

use chrono::Duration;
use dragonkills_core::contracts::{forest, new_day};
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::SceneRepository;
use dragonkills_core::template::TemplateRegistry;
use dragonkills_module::application::query_handlers::{count_dragon_kills, list_dragon_kills};
use dragonkills_module::domain::character_ext::CharacterDragonKillExt;
use dragonkills_module::scenes::dragon_scene::{self, LAIR_GROUP};
use dragonkills_module::{DragonKillsConfig, LIBRARY, MODULE_PROPERTY_GENERATED_SCENES};
use uuid::Uuid;

use common::{action_id, enter_forest, fight_to_the_end, hero, take, titles};

#[tokio::test]
async fn test_registration_adds_a_lair_behind_the_forest() {
    let world = common::world().await;

    let connected = world.host.scenes().connected_scenes(world.forest_id).await.unwrap();

    let lairs: Vec<_> = connected
        .iter()
        .filter(|scene| scene.has_template(dragon_scene::TEMPLATE))
        .collect();
    assert_eq!(lairs.len(), 1);
    assert_eq!(lairs[0].title, "The Green Dragon");
    let record = world.host.module_record(LIBRARY).unwrap();
    let generated: Vec<Uuid> = record.properties.get(MODULE_PROPERTY_GENERATED_SCENES).unwrap().unwrap();
    assert_eq!(generated, [lairs[0].id]);
}

#[tokio::test]
async fn test_low_level_character_sees_no_dragon() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(14, 140);

    // Act
    let forest_view = enter_forest(&world, &mut character).await;

    // Assert
    let fight = forest_view.find_action_group(forest::FIGHT_GROUP).unwrap();
    assert!(fight.actions.is_empty());
}

#[tokio::test]
async fn test_seek_action_disappears_after_visiting_the_lair() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 150);
    let forest_view = enter_forest(&world, &mut character).await;
    assert!(titles(&forest_view).contains(&"Seek out The Green Dragon".to_owned()));

    // Act
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let back_in_forest = take(&world, &mut character, &lair, "Run away like a baby").await;

    // Assert
    assert_eq!(lair.title, "The Green Dragon");
    let lair_group = lair.find_action_group(LAIR_GROUP.id).unwrap();
    assert_eq!(lair_group.actions[0].title, "Enter the cave");
    assert!(character.has_seen_dragon().unwrap());
    assert_eq!(back_in_forest.title, "Forest");
    assert!(!titles(&back_in_forest).contains(&"Seek out The Green Dragon".to_owned()));
}

#[tokio::test]
async fn test_new_day_lets_the_character_seek_the_dragon_again() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 150);
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let forest_view = take(&world, &mut character, &lair, "Run away like a baby").await;
    character
        .set_property(new_day::PROPERTY_LAST_NEW_DAY, &(common::now() - Duration::days(1)))
        .unwrap();

    // Act
    let new_day_view = take(&world, &mut character, &forest_view, "Village").await;
    let village_view = take(&world, &mut character, &new_day_view, "Continue").await;
    let forest_view = take(&world, &mut character, &village_view, "Forest").await;

    // Assert
    assert_eq!(new_day_view.title, "It is a new day!");
    assert!(!character.has_seen_dragon().unwrap());
    assert!(titles(&forest_view).contains(&"Seek out The Green Dragon".to_owned()));
}

#[tokio::test]
async fn test_losing_to_the_dragon_leads_back_to_the_village() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 100);
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let cave = take(&world, &mut character, &lair, "Enter the cave").await;

    // Act
    let outcome = fight_to_the_end(&world, &mut character, cave).await;
    let village_view = take(&world, &mut character, &outcome, "Return to the village").await;

    // Assert
    assert_eq!(outcome.title, "Defeat!");
    assert!(outcome.description.contains("You might challenge him tomorrow again."));
    assert_eq!(village_view.scene_id, world.village_id);
    assert!(!character.is_alive());
    assert_eq!(character.dragon_kill_count().unwrap(), 0);
}

#[tokio::test]
async fn test_slaying_the_dragon_resets_the_character() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 250);
    character.gold = 5_000;
    character.experience = 20_000;
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let cave = take(&world, &mut character, &lair, "Enter the cave").await;
    let outcome = fight_to_the_end(&world, &mut character, cave).await;
    assert_eq!(outcome.title, "Victory!");

    // Act
    let epilogue = take(&world, &mut character, &outcome, "Continue").await;
    let new_day_view = take(&world, &mut character, &epilogue, "It is a new day").await;

    // Assert
    assert_eq!(epilogue.title, "Victory!");
    assert_eq!(titles(&epilogue), ["It is a new day"]);
    assert_eq!(new_day_view.title, "It is a new day!");
    assert_eq!(character.dragon_kill_count().unwrap(), 1);
    assert_eq!(character.level, 1);
    assert_eq!(character.max_health, 10);
    assert_eq!(character.health, 10);
    assert_eq!(character.gold, 0);
    assert_eq!(character.experience, 0);
    assert_eq!(character.required_experience, 100);
    assert!(!character.has_seen_dragon().unwrap());

    let kills = list_dragon_kills(world.host.records(), character.id).await.unwrap();
    assert_eq!(kills.len(), 1);
    assert_eq!(kills[0].killed_at, common::now());
    assert_eq!(count_dragon_kills(world.host.records()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_victory_screen_cannot_be_replayed() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 250);
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let cave = take(&world, &mut character, &lair, "Enter the cave").await;
    let outcome = fight_to_the_end(&world, &mut character, cave).await;
    let epilogue = take(&world, &mut character, &outcome, "Continue").await;
    let new_day_view = take(&world, &mut character, &epilogue, "It is a new day").await;
    take(&world, &mut character, &new_day_view, "Continue").await;

    // Act
    let replayed = action_id(&outcome, "Continue");
    let result = world.host.take_action(&mut character, replayed).await;

    // Assert
    match result.unwrap_err() {
        EngineError::ActionNotFound(id) => assert_eq!(id, replayed),
        other => panic!("expected ActionNotFound, got {other:?}"),
    }
    assert_eq!(character.dragon_kill_count().unwrap(), 1);
    assert_eq!(count_dragon_kills(world.host.records()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_day_change_before_the_epilogue_still_records_the_kill() {
    // Arrange
    let world = common::world().await;
    let mut character = hero(15, 250);
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let cave = take(&world, &mut character, &lair, "Enter the cave").await;
    let outcome = fight_to_the_end(&world, &mut character, cave).await;
    character
        .set_property(new_day::PROPERTY_LAST_NEW_DAY, &(common::now() - Duration::days(1)))
        .unwrap();

    // Act
    let new_day_view = take(&world, &mut character, &outcome, "Continue").await;
    let epilogue = take(&world, &mut character, &new_day_view, "Continue").await;

    // Assert
    assert_eq!(new_day_view.title, "It is a new day!");
    assert_eq!(epilogue.title, "Victory!");
    assert_eq!(titles(&epilogue), ["It is a new day"]);
    assert_eq!(character.dragon_kill_count().unwrap(), 1);
    assert_eq!(character.level, 1);
    assert_eq!(count_dragon_kills(world.host.records()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_configured_gold_survives_the_reset() {
    // Arrange
    let config = DragonKillsConfig::from_yaml_str("reset:\n  keep_gold: true\ndragon:\n  health: 20\n").unwrap();
    let world = common::world_with_config(config).await;
    let mut character = hero(15, 150);
    character.gold = 700;
    let forest_view = enter_forest(&world, &mut character).await;
    let lair = take(&world, &mut character, &forest_view, "Seek out The Green Dragon").await;
    let cave = take(&world, &mut character, &lair, "Enter the cave").await;
    let outcome = fight_to_the_end(&world, &mut character, cave).await;

    // Act
    take(&world, &mut character, &outcome, "Continue").await;

    // Assert
    assert_eq!(character.dragon_kill_count().unwrap(), 1);
    assert_eq!(character.level, 1);
    assert_eq!(character.gold, 700);
}

#[tokio::test]
async fn test_unregister_removes_generated_lairs_only() {
    // Arrange
    let world = common::world().await;
    let hand_made = dragonkills_core::scene::Scene::new("Old Cave", "Quiet.")
        .with_template(dragon_scene::TEMPLATE);
    let hand_made_id = hand_made.id;
    world.host.scenes().save(hand_made).await.unwrap();

    // Act
    world.host.unregister_module(LIBRARY).await.unwrap();

    // Assert
    let remaining = world.host.scenes().connected_scenes(world.forest_id).await.unwrap();
    assert!(remaining.iter().all(|scene| scene.title != "The Green Dragon"));
    let kept = world.host.scenes().find(hand_made_id).await.unwrap().unwrap();
    assert_eq!(kept.template, None);
    assert!(world.host.templates().find(dragon_scene::TEMPLATE).is_none());
    assert!(world.host.module_record(LIBRARY).is_none());
}
