//! In-memory services and a tiny world for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use dragonkills_core::character::Character;
use dragonkills_core::contracts::{forest, village};
use dragonkills_core::game::Game;
use dragonkills_core::repository::{RecordRepository, SceneRepository};
use dragonkills_core::scene::{ConnectionGroup, Directionality, Scene, SceneConnection};
use dragonkills_host::records::InMemoryRecordRepository;
use dragonkills_host::scenes::InMemorySceneRepository;
use dragonkills_host::templates::InMemoryTemplateRegistry;
use dragonkills_test_support::{FixedClock, RecordingEventPublisher, RecordingFightStarter};
use uuid::Uuid;

use crate::config::DragonKillsConfig;
use crate::scenes::dragon_scene::{BACK_GROUP, LAIR_GROUP, TEMPLATE, TITLE};

pub(crate) struct World {
    pub village_id: Uuid,
    pub forest_id: Uuid,
    pub lair_id: Uuid,
}

pub(crate) struct Fixture {
    pub clock: FixedClock,
    pub scenes: InMemorySceneRepository,
    pub records: InMemoryRecordRepository,
    pub templates: InMemoryTemplateRegistry,
    pub events: RecordingEventPublisher,
    pub fights: RecordingFightStarter,
    pub config: DragonKillsConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            clock: FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()),
            scenes: InMemorySceneRepository::new(),
            records: InMemoryRecordRepository::new(),
            templates: InMemoryTemplateRegistry::new(),
            events: RecordingEventPublisher::new(),
            fights: RecordingFightStarter::new(),
            config: DragonKillsConfig::default(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.0
    }

    pub fn game(&self) -> Game<'_> {
        self.game_with(&self.scenes, &self.records)
    }

    pub fn game_with<'a>(
        &'a self,
        scenes: &'a dyn SceneRepository,
        records: &'a dyn RecordRepository,
    ) -> Game<'a> {
        Game {
            clock: &self.clock,
            time_keeper: &self.clock,
            scenes,
            records,
            templates: &self.templates,
            events: &self.events,
            fights: &self.fights,
        }
    }

    pub fn hero(&self, level: u32) -> Character {
        let mut character = Character::new(Uuid::new_v4(), "Hero");
        character.level = level;
        character.max_health = level * 10;
        character.health = character.max_health;
        character
    }

    /// Village, forest and lair, with the lair's back group leading to the
    /// forest.
    pub async fn world(&self) -> World {
        let village = Scene::new("Village", "Houses.").with_template(village::TEMPLATE);
        let village_id = village.id;
        self.scenes.save(village).await.unwrap();

        let mut world = self.world_without_village().await;
        self.scenes
            .connect(SceneConnection {
                outgoing_scene: village_id,
                outgoing_group: None,
                incoming_scene: world.forest_id,
                incoming_group: None,
                directionality: Directionality::Bidirectional,
            })
            .await
            .unwrap();
        world.village_id = village_id;
        world
    }

    pub async fn world_without_village(&self) -> World {
        let forest = Scene::new("Forest", "Trees.").with_template(forest::TEMPLATE);
        let mut lair = Scene::new(TITLE, "A cave.").with_template(TEMPLATE);
        lair.add_connection_group(
            ConnectionGroup::new(LAIR_GROUP.id, LAIR_GROUP.title).with_sort_key(LAIR_GROUP.sort_key),
        );
        lair.add_connection_group(
            ConnectionGroup::new(BACK_GROUP.id, BACK_GROUP.title).with_sort_key(BACK_GROUP.sort_key),
        );
        let (forest_id, lair_id) = (forest.id, lair.id);
        self.scenes.save(forest).await.unwrap();
        self.scenes.save(lair).await.unwrap();
        self.scenes
            .connect(SceneConnection {
                outgoing_scene: lair_id,
                outgoing_group: Some(BACK_GROUP.id.to_owned()),
                incoming_scene: forest_id,
                incoming_group: None,
                directionality: Directionality::Unidirectional,
            })
            .await
            .unwrap();

        World {
            village_id: Uuid::nil(),
            forest_id,
            lair_id,
        }
    }
}
