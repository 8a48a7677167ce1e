//! The host: owns the engine services and drives navigation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use dragonkills_core::battle::Battle;
use dragonkills_core::character::Character;
use dragonkills_core::clock::{Clock, TimeKeeper};
use dragonkills_core::contracts::{core, forest, new_day, res_fight};
use dragonkills_core::error::EngineError;
use dragonkills_core::event::{BattleOverData, CharacterData, EventContext, EventData, NavigationData};
use dragonkills_core::game::Game;
use dragonkills_core::module::{EventHandler, Module};
use dragonkills_core::repository::{ModuleRecord, SceneRepository};
use dragonkills_core::rng::DeterministicRng;
use dragonkills_core::viewpoint::{Action, Parameters, Viewpoint};
use uuid::Uuid;

use crate::bus::{EventBus, EventQueue};
use crate::fight::{BattleState, RoundFight, RoundOutcome};
use crate::records::InMemoryRecordRepository;
use crate::render::render_scene;
use crate::scenes::InMemorySceneRepository;
use crate::templates::InMemoryTemplateRegistry;

type Installed = BTreeMap<String, (Arc<dyn Module>, ModuleRecord)>;

/// An in-memory game engine.
pub struct Host {
    clock: Box<dyn Clock>,
    time_keeper: Box<dyn TimeKeeper>,
    scenes: InMemorySceneRepository,
    records: InMemoryRecordRepository,
    templates: InMemoryTemplateRegistry,
    queue: EventQueue,
    fights: RoundFight,
    bus: EventBus,
    modules: Mutex<Installed>,
}

impl Host {
    /// Creates a host with empty stores.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        time_keeper: Box<dyn TimeKeeper>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            clock,
            time_keeper,
            scenes: InMemorySceneRepository::new(),
            records: InMemoryRecordRepository::new(),
            templates: InMemoryTemplateRegistry::new(),
            queue: EventQueue::new(),
            fights: RoundFight::new(rng),
            bus: EventBus::new(),
            modules: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the services handed to module handlers.
    #[must_use]
    pub fn game(&self) -> Game<'_> {
        Game {
            clock: self.clock.as_ref(),
            time_keeper: self.time_keeper.as_ref(),
            scenes: &self.scenes,
            records: &self.records,
            templates: &self.templates,
            events: &self.queue,
            fights: &self.fights,
        }
    }

    /// Returns the scene store.
    #[must_use]
    pub fn scenes(&self) -> &InMemorySceneRepository {
        &self.scenes
    }

    /// Returns the record store.
    #[must_use]
    pub fn records(&self) -> &InMemoryRecordRepository {
        &self.records
    }

    /// Returns the template registry.
    #[must_use]
    pub fn templates(&self) -> &InMemoryTemplateRegistry {
        &self.templates
    }

    /// Subscribes a standalone handler to `event`.
    pub fn subscribe(&self, event: impl Into<String>, library: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.bus.subscribe(event, library, handler);
    }

    /// Installs a module: runs its registration hook, stores its record and
    /// subscribes it to its events.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if registration fails; nothing is installed then.
    pub async fn register_module<M: Module + 'static>(&self, module: Arc<M>) -> Result<(), EngineError> {
        let library = module.library();
        let mut record = ModuleRecord::new(library);
        module.on_register(self.game(), &mut record).await?;

        for event in module.subscriptions() {
            let handler: Arc<dyn EventHandler> = module.clone();
            self.bus.subscribe(event, library, handler);
        }
        let installed: Arc<dyn Module> = module;
        self.installed().insert(library.to_owned(), (installed, record));
        tracing::info!(library, "module registered");
        Ok(())
    }

    /// Removes a module: drops its subscriptions and runs its
    /// unregistration hook. Unknown libraries are ignored.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if unregistration fails.
    pub async fn unregister_module(&self, library: &str) -> Result<(), EngineError> {
        let Some((module, mut record)) = self.installed().remove(library) else {
            return Ok(());
        };
        self.bus.unsubscribe_library(library);
        module.on_unregister(self.game(), &mut record).await?;
        tracing::info!(library, "module unregistered");
        Ok(())
    }

    /// Returns a copy of an installed module's record.
    #[must_use]
    pub fn module_record(&self, library: &str) -> Option<ModuleRecord> {
        self.installed().get(library).map(|(_, record)| record.clone())
    }

    fn installed(&self) -> std::sync::MutexGuard<'_, Installed> {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `event` through its subscribers, then dispatches everything they
    /// published, and returns the context left by the last subscriber.
    ///
    /// # Errors
    ///
    /// Returns the first handler error; later handlers do not run.
    pub async fn publish_hook(
        &self,
        character: &mut Character,
        event: &str,
        data: EventData,
    ) -> Result<EventContext, EngineError> {
        let context = self.dispatch(character, event, data).await?;
        while let Some((queued, queued_data)) = self.queue.pop() {
            self.dispatch(character, &queued, queued_data).await?;
        }
        Ok(context)
    }

    async fn dispatch(
        &self,
        character: &mut Character,
        event: &str,
        data: EventData,
    ) -> Result<EventContext, EngineError> {
        let mut context = EventContext::new(event, event, data);
        for handler in self.bus.handlers_for(event) {
            context = handler.handle_event(self.game(), character, context).await?;
        }
        Ok(context)
    }

    /// Shows the character `scene_id` as if they had just logged in.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the scene is missing or a handler fails.
    pub async fn start(&self, character: &mut Character, scene_id: Uuid) -> Result<Viewpoint, EngineError> {
        let viewpoint = self
            .navigate(character, scene_id, Parameters::new(), None)
            .await?;
        remember(character, viewpoint)
    }

    /// Returns the viewpoint last shown to the character, if any.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored viewpoint is corrupt.
    pub fn current_viewpoint(&self, character: &Character) -> Result<Option<Viewpoint>, EngineError> {
        character.properties.get(core::PROPERTY_VIEWPOINT)
    }

    /// Takes an action offered by the character's current viewpoint and
    /// returns the next viewpoint.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ActionNotFound` if the current viewpoint does not
    /// offer the action, or any error raised while rendering the destination.
    pub async fn take_action(&self, character: &mut Character, action_id: Uuid) -> Result<Viewpoint, EngineError> {
        let current = self
            .current_viewpoint(character)?
            .ok_or(EngineError::ActionNotFound(action_id))?;
        let action = current
            .find_action(action_id)
            .cloned()
            .ok_or(EngineError::ActionNotFound(action_id))?;

        let battle: Option<BattleState> = character.properties.get(res_fight::PROPERTY_BATTLE_STATE)?;
        let viewpoint = if let Some(state) = battle {
            self.fight_round(character, state).await?
        } else {
            self.navigate(
                character,
                action.destination_scene_id,
                action.parameters,
                Some(current.scene_id),
            )
            .await?
        };
        remember(character, viewpoint)
    }

    async fn navigate(
        &self,
        character: &mut Character,
        scene_id: Uuid,
        parameters: Parameters,
        referrer_scene_id: Option<Uuid>,
    ) -> Result<Viewpoint, EngineError> {
        let last_new_day: Option<DateTime<Utc>> = character.properties.get(new_day::PROPERTY_LAST_NEW_DAY)?;
        if self.time_keeper.is_new_day(last_new_day) {
            return self.new_day(character, scene_id, parameters).await;
        }

        let scene = self
            .scenes
            .find(scene_id)
            .await?
            .ok_or(EngineError::SceneNotFound(scene_id))?;
        let connections = self.scenes.connections(scene_id).await?;
        let neighbours = self.scenes.connected_scenes(scene_id).await?;
        let mut viewpoint = render_scene(&scene, &connections, &neighbours);

        if let Some(template) = scene.template.as_deref() {
            let data = EventData::Navigation(NavigationData {
                viewpoint,
                parameters,
                referrer_scene_id,
            });
            let context = self
                .publish_hook(character, &core::navigate_to_event(template), data)
                .await?;
            viewpoint = viewpoint_of(context)?;

            if template == forest::TEMPLATE {
                let data = EventData::Navigation(NavigationData {
                    viewpoint,
                    parameters: Parameters::new(),
                    referrer_scene_id,
                });
                let context = self
                    .publish_hook(character, forest::HOOK_FOREST_NAVIGATION, data)
                    .await?;
                viewpoint = viewpoint_of(context)?;
            }
        }

        Ok(viewpoint)
    }

    /// Applies a new day and shows its screen. "Continue" resumes the
    /// interrupted navigation with its parameters.
    async fn new_day(
        &self,
        character: &mut Character,
        destination: Uuid,
        parameters: Parameters,
    ) -> Result<Viewpoint, EngineError> {
        character.set_property(new_day::PROPERTY_LAST_NEW_DAY, &self.time_keeper.game_time())?;
        character.health = character.max_health;
        tracing::debug!(%character, "new day");

        let data = EventData::Character(CharacterData {
            character_id: character.id,
            value: None,
        });
        self.publish_hook(character, new_day::HOOK_AFTER_NEW_DAY, data)
            .await?;

        let mut viewpoint = Viewpoint::new(
            destination,
            "It is a new day!",
            "You open your eyes to discover that a new day has been bestowed upon you.",
        );
        let mut resume = Action::new(destination, "Continue");
        resume.parameters = parameters;
        viewpoint.default_group_mut().add_action(resume);
        Ok(viewpoint)
    }

    async fn fight_round(&self, character: &mut Character, mut state: BattleState) -> Result<Viewpoint, EngineError> {
        let scene = self
            .scenes
            .find(state.referrer_scene_id)
            .await?
            .ok_or(EngineError::SceneNotFound(state.referrer_scene_id))?;

        match self.fights.round(character, &mut state) {
            RoundOutcome::Ongoing { dealt, taken } => {
                let description = format!(
                    "You hit {} for {dealt} points of damage. {} hits you with its {} for {taken} points of damage.",
                    state.creature.name, state.creature.name, state.creature.weapon
                );
                let mut viewpoint = Viewpoint::new(scene.id, scene.title, description);
                RoundFight::show_fight_actions(&mut viewpoint, state.referrer_scene_id);
                character.set_property(res_fight::PROPERTY_BATTLE_STATE, &state)?;
                Ok(viewpoint)
            }
            RoundOutcome::Finished { winner } => {
                character.properties.remove(res_fight::PROPERTY_BATTLE_STATE);
                let data = EventData::BattleOver(BattleOverData {
                    battle_identifier: state.battle_context,
                    battle: Battle { winner },
                    viewpoint: Viewpoint::new(scene.id, scene.title, String::new()),
                    referrer_scene_id: state.referrer_scene_id,
                });
                let context = self
                    .publish_hook(character, res_fight::HOOK_BATTLE_OVER, data)
                    .await?;
                match context.into_data() {
                    EventData::BattleOver(data) => Ok(data.viewpoint),
                    _ => Err(EngineError::UnexpectedEventData {
                        event: res_fight::HOOK_BATTLE_OVER.to_owned(),
                        expected: "battle over",
                    }),
                }
            }
        }
    }
}

fn remember(character: &mut Character, viewpoint: Viewpoint) -> Result<Viewpoint, EngineError> {
    character.set_property(core::PROPERTY_VIEWPOINT, &viewpoint)?;
    Ok(viewpoint)
}

fn viewpoint_of(context: EventContext) -> Result<Viewpoint, EngineError> {
    let event = context.event().to_owned();
    match context.into_data() {
        EventData::Navigation(data) => Ok(data.viewpoint),
        _ => Err(EngineError::UnexpectedEventData {
            event,
            expected: "navigation",
        }),
    }
}
