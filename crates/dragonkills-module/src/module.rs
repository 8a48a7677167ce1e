//! The module facade: event dispatch and the registration lifecycle.

use async_trait::async_trait;
use dragonkills_core::character::Character;
use dragonkills_core::contracts::{core, forest, new_day, res_fight};
use dragonkills_core::error::EngineError;
use dragonkills_core::event::EventContext;
use dragonkills_core::game::Game;
use dragonkills_core::module::{EventHandler, Module};
use dragonkills_core::repository::ModuleRecord;
use dragonkills_core::scene::{Directionality, SceneConnection};
use dragonkills_core::template::SceneTemplate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::command_handlers;
use crate::config::DragonKillsConfig;
use crate::scenes::dragon_scene::{self, BACK_GROUP};
use crate::{DRAGON_KILLED_EVENT, LIBRARY, MODULE_PROPERTY_GENERATED_SCENES};

/// Events the module reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleEvent {
    /// A forest is being rendered.
    ForestNavigation,
    /// A lair is being rendered.
    NavigateToLair,
    /// A battle has ended.
    BattleOver,
    /// A new game day has started for the character.
    NewDay,
    /// The character has slain the dragon.
    DragonKilled,
}

impl ModuleEvent {
    /// Every event, in subscription order.
    pub const ALL: [Self; 5] = [
        Self::ForestNavigation,
        Self::NavigateToLair,
        Self::BattleOver,
        Self::NewDay,
        Self::DragonKilled,
    ];

    /// Event name on the bus.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::ForestNavigation => forest::HOOK_FOREST_NAVIGATION.to_owned(),
            Self::NavigateToLair => core::navigate_to_event(dragon_scene::TEMPLATE),
            Self::BattleOver => res_fight::HOOK_BATTLE_OVER.to_owned(),
            Self::NewDay => new_day::HOOK_AFTER_NEW_DAY.to_owned(),
            Self::DragonKilled => DRAGON_KILLED_EVENT.to_owned(),
        }
    }

    /// Looks up the event with exactly this name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// The Green Dragon kills module.
#[derive(Debug, Clone, Default)]
pub struct DragonKillsModule {
    config: DragonKillsConfig,
}

impl DragonKillsModule {
    /// Creates the module with the given configuration.
    #[must_use]
    pub fn new(config: DragonKillsConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &DragonKillsConfig {
        &self.config
    }

    async fn on_dragon_killed(
        &self,
        game: Game<'_>,
        character: &mut Character,
        context: EventContext,
    ) -> Result<EventContext, EngineError> {
        let subject = context.character()?.character_id;
        if subject != character.id {
            warn!(%character, %subject, "dragon kill reported for another character");
            return Ok(context);
        }
        command_handlers::handle_dragon_killed(game, character, &self.config.reset).await?;
        Ok(context)
    }
}

#[async_trait]
impl EventHandler for DragonKillsModule {
    async fn handle_event(
        &self,
        game: Game<'_>,
        character: &mut Character,
        context: EventContext,
    ) -> Result<EventContext, EngineError> {
        let Some(event) = ModuleEvent::from_name(context.event()) else {
            return Ok(context);
        };

        match event {
            ModuleEvent::ForestNavigation => {
                dragon_scene::forest_navigation(game, character, &self.config, context).await
            }
            ModuleEvent::NavigateToLair => {
                dragon_scene::navigate_to_scene(game, character, &self.config, context).await
            }
            ModuleEvent::BattleOver => dragon_scene::battle_over(game, character, context).await,
            ModuleEvent::NewDay => {
                command_handlers::handle_new_day(character)?;
                Ok(context)
            }
            ModuleEvent::DragonKilled => self.on_dragon_killed(game, character, context).await,
        }
    }
}

#[async_trait]
impl Module for DragonKillsModule {
    fn library(&self) -> &'static str {
        LIBRARY
    }

    fn subscriptions(&self) -> Vec<String> {
        ModuleEvent::ALL.into_iter().map(ModuleEvent::name).collect()
    }

    async fn on_register(&self, game: Game<'_>, module: &mut ModuleRecord) -> Result<(), EngineError> {
        game.templates
            .register(SceneTemplate::new(dragon_scene::TEMPLATE, LIBRARY));

        let mut generated: Vec<Uuid> = module
            .properties
            .get_or(MODULE_PROPERTY_GENERATED_SCENES, Vec::new())?;
        let mut created = Vec::new();
        if let Err(err) = create_lairs(game, &mut created).await {
            remove_lairs(game, &created).await;
            return Err(err);
        }

        info!(generated = created.len(), "dragon lairs created");
        generated.extend(created);
        module
            .properties
            .set(MODULE_PROPERTY_GENERATED_SCENES, &generated)
    }

    async fn on_unregister(&self, game: Game<'_>, module: &mut ModuleRecord) -> Result<(), EngineError> {
        let generated: Vec<Uuid> = module
            .properties
            .get_or(MODULE_PROPERTY_GENERATED_SCENES, Vec::new())?;

        let (mut removed, mut kept) = (0_usize, 0_usize);
        for mut scene in game.scenes.find_by_template(dragon_scene::TEMPLATE).await? {
            if generated.contains(&scene.id) {
                game.scenes.remove(scene.id).await?;
                removed += 1;
            } else {
                scene.template = None;
                game.scenes.save(scene).await?;
                kept += 1;
            }
        }

        module.properties.remove(MODULE_PROPERTY_GENERATED_SCENES);
        game.templates.unregister(dragon_scene::TEMPLATE);
        info!(removed, kept, "dragon lairs removed");
        Ok(())
    }
}

/// Saves one lair per forest, each leading back to its forest. Pushes every
/// saved lair to `created`, connected or not.
async fn create_lairs(game: Game<'_>, created: &mut Vec<Uuid>) -> Result<(), EngineError> {
    for forest_scene in game.scenes.find_by_template(forest::TEMPLATE).await? {
        let lair = dragon_scene::scaffold(game.templates)?;
        let lair_id = lair.id;
        game.scenes.save(lair).await?;
        created.push(lair_id);
        game.scenes
            .connect(SceneConnection {
                outgoing_scene: lair_id,
                outgoing_group: Some(BACK_GROUP.id.to_owned()),
                incoming_scene: forest_scene.id,
                incoming_group: None,
                directionality: Directionality::Unidirectional,
            })
            .await?;
    }
    Ok(())
}

async fn remove_lairs(game: Game<'_>, lairs: &[Uuid]) {
    for &lair_id in lairs {
        if let Err(err) = game.scenes.remove(lair_id).await {
            warn!(%lair_id, %err, "could not remove a lair of a failed registration");
        }
    }
}
