//! The Green Dragon's lair.
//!
//! The lair is reached from the forest once a character is strong enough.
//! It renders in three stages selected by the `subAction` parameter: the
//! intro at the cave mouth, the fight inside the cave, and the epilogue after
//! the dragon has been slain.

use chrono::Duration;
use dragonkills_core::character::Character;
use dragonkills_core::contracts::{forest, new_day, village};
use dragonkills_core::error::EngineError;
use dragonkills_core::event::{CharacterData, EventContext, EventData};
use dragonkills_core::game::Game;
use dragonkills_core::repository::SceneRepository;
use dragonkills_core::scene::{ConnectionGroup, Scene};
use dragonkills_core::template::TemplateRegistry;
use dragonkills_core::viewpoint::{Action, ActionGroup, Parameters, Viewpoint};
use tracing::debug;
use uuid::Uuid;

use crate::DRAGON_KILLED_EVENT;
use crate::config::DragonKillsConfig;
use crate::domain::character_ext::CharacterDragonKillExt;

/// Template class of the lair.
pub const TEMPLATE: &str = "lotgd/module-dragon-kills/dragon";

/// Battle context identifying fights against the dragon.
pub const BATTLE_CONTEXT: &str = "lotgd/module-dragon-kills/greenDragonFight";

/// Navigation parameter selecting the lair stage.
pub const SUB_ACTION_PARAMETER: &str = "subAction";

/// Title of the lair scene.
pub const TITLE: &str = "The Green Dragon";

/// An action group the lair always offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LairGroup {
    /// Group id.
    pub id: &'static str,
    /// Group title.
    pub title: &'static str,
    /// Sort key of the group.
    pub sort_key: i32,
}

/// Group holding the way deeper into the cave.
pub const LAIR_GROUP: LairGroup = LairGroup {
    id: "lotgd/module-dragon-kills/dragon/dragon",
    title: "Dragon's Lair",
    sort_key: 0,
};

/// Group holding the way back to the forest.
pub const BACK_GROUP: LairGroup = LairGroup {
    id: "lotgd/module-dragon-kills/dragon/back",
    title: "Back",
    sort_key: 100,
};

const DESCRIPTION: &str = "\
Deep in the forest the trees give way to a ring of charred stumps, and in \
its middle gapes the black mouth of a cave. A thin thread of smoke curls out \
of it and is torn away by a wind that is suddenly cold. The entrance sits a \
dozen feet up a cliff face, and a slope of rubble leads to it. Rows of pointed \
rock frame the opening like the teeth of some enormous leech.

As you creep closer you hear, or perhaps feel, a low rumble that lasts half a \
minute before it fades into a breath of sulphur. Then it starts again, and \
stops again, slow and steady.

The rubble crunches under your boots as you climb. Much of it looks like what \
is left of earlier heroes. Or of earlier snacks.

Every instinct you have tells you to turn around and run back to the warmer \
parts of the forest. What do you do?";

const CAVE_DESCRIPTION: &str = "\
Swallowing the urge to flee, you slip into the cave, hoping to catch the \
great green dragon asleep and end this quickly. It is not to be. Around the \
first bend you find the beast wide awake, squatting on a mountain of gold and \
picking its teeth with a rib.";

const VICTORY_DESCRIPTION: &str =
    "With one last mighty blow the Green Dragon gives a thunderous bellow and collapses at your feet, dead at last.";

const EPILOGUE_DESCRIPTION: &str = "\
The dragon lies still before you, each of its rasping breaths burning in your \
lungs. You are soaked from head to toe in its thick black blood. Then its jaws \
begin to move. You leap back, cursing yourself for falling for the oldest \
trick there is, and wait for the tail to come sweeping at you. It never does. \
The dragon speaks instead.

\"Why did you come here, mortal? What harm have I ever done you?\" it asks, \
every word an effort. \"Your kind always hunts mine. Because of tales from far \
away about dragons that prey on the weak? Those tales are born of fear, not of \
anything we have done.\" It pauses for breath. \"Hear a secret. Behind me lie \
my eggs. The young will fight one another when they hatch, and only the \
strongest will live. She will grow quickly, and she will be as mighty as I \
am.\"

\"Why tell me this? I will simply smash your eggs,\" you say.

\"You will not. There is one more secret you do not know.\"

\"Then tell it, great beast!\"

The dragon gathers the last of its strength. \"Your kind cannot bear the \
blood of mine. Should you live, you will be a feeble thing, barely able to \
lift a blade, everything you have learned gone from your mind. You are no \
danger to my children. You are already dead.\"

Already the edges of your sight are growing dim. You stagger out of the cave, \
desperate to reach the healer before it is too late. Somewhere along the way \
your weapon slips from your grasp, and at last you trip over a stone in a \
shallow stream. Your sight has shrunk to a small circle that drifts about \
your head. Lying there, staring up through the branches, you think you hear \
the sounds of the village nearby. Your last thought is that you beat the \
dragon, and yet the dragon beat you.

As the light fades, far away in the lair, an egg rolls onto its side, and a \
small crack opens in its leathery shell.";

/// Stage of the lair selected by the `subAction` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubAction {
    /// At the cave mouth.
    Intro,
    /// Inside the cave, facing the dragon.
    Enter,
    /// After the dragon has been slain.
    Epilogue,
}

impl SubAction {
    /// Parameter value of the stage; the intro has none.
    #[must_use]
    pub fn value(self) -> Option<&'static str> {
        match self {
            Self::Intro => None,
            Self::Enter => Some("enter"),
            Self::Epilogue => Some("epilogue"),
        }
    }

    /// Reads the stage from navigation parameters. A missing or empty
    /// parameter means the intro; an unknown value yields `None`.
    #[must_use]
    pub fn from_parameters(parameters: &Parameters) -> Option<Self> {
        match parameters.get(SUB_ACTION_PARAMETER).map(String::as_str) {
            None | Some("") => Some(Self::Intro),
            Some("enter") => Some(Self::Enter),
            Some("epilogue") => Some(Self::Epilogue),
            Some(_) => None,
        }
    }
}

/// Builds a new lair scene from the registered template.
///
/// # Errors
///
/// Returns `EngineError::TemplateNotRegistered` if the lair template has not
/// been registered yet.
pub fn scaffold(templates: &dyn TemplateRegistry) -> Result<Scene, EngineError> {
    let template = templates.resolve(TEMPLATE)?;
    let mut scene = Scene::new(TITLE, DESCRIPTION).with_template(template.class);
    for group in [LAIR_GROUP, BACK_GROUP] {
        scene.add_connection_group(
            ConnectionGroup::new(group.id, group.title).with_sort_key(group.sort_key),
        );
    }
    Ok(scene)
}

/// Whether `character` may seek out the dragon right now.
///
/// # Errors
///
/// Returns `EngineError::Property` if the seen flag is corrupt.
pub fn can_seek_dragon(character: &Character, config: &DragonKillsConfig) -> Result<bool, EngineError> {
    if character.level < config.required_level {
        return Ok(false);
    }
    if character.has_seen_dragon()? {
        return Ok(false);
    }
    Ok(character.is_alive())
}

/// Offers a "Seek out" action in the forest's fight group for every lair
/// connected to the forest, if the character is ready.
///
/// # Errors
///
/// Returns `EngineError::UnexpectedEventData` if the context carries no
/// viewpoint, `EngineError::ActionGroupNotFound` if the forest has no fight
/// group, or any repository error.
pub async fn forest_navigation(
    game: Game<'_>,
    character: &Character,
    config: &DragonKillsConfig,
    mut context: EventContext,
) -> Result<EventContext, EngineError> {
    if !can_seek_dragon(character, config)? {
        return Ok(context);
    }
    debug!(%character, "character can seek out the dragon");

    let navigation = context.navigation_mut()?;
    let lairs: Vec<Scene> = game
        .scenes
        .connected_scenes(navigation.viewpoint.scene_id)
        .await?
        .into_iter()
        .filter(|scene| scene.has_template(TEMPLATE))
        .collect();
    if lairs.is_empty() {
        return Ok(context);
    }

    let fight_group = navigation
        .viewpoint
        .find_action_group_mut(forest::FIGHT_GROUP)
        .ok_or_else(|| EngineError::ActionGroupNotFound(forest::FIGHT_GROUP.to_owned()))?;
    for lair in lairs {
        fight_group.add_action(Action::new(lair.id, format!("Seek out {}", lair.title)));
    }

    Ok(context)
}

/// Renders the lair stage requested by the navigation parameters.
///
/// Unknown stages leave the context untouched.
///
/// # Errors
///
/// Returns `EngineError::UnexpectedEventData` if the context carries no
/// viewpoint, or any error raised by the battle system or the repositories.
pub async fn navigate_to_scene(
    game: Game<'_>,
    character: &mut Character,
    config: &DragonKillsConfig,
    mut context: EventContext,
) -> Result<EventContext, EngineError> {
    let navigation = context.navigation_mut()?;
    let Some(stage) = SubAction::from_parameters(&navigation.parameters) else {
        debug!(parameters = ?navigation.parameters, "unknown lair stage");
        return Ok(context);
    };

    let viewpoint = &mut navigation.viewpoint;
    match stage {
        SubAction::Intro => show_intro(character, viewpoint)?,
        SubAction::Enter => enter_cave(game, character, config, viewpoint)?,
        SubAction::Epilogue => show_epilogue(game, character, viewpoint).await?,
    }

    Ok(context)
}

fn show_intro(character: &mut Character, viewpoint: &mut Viewpoint) -> Result<(), EngineError> {
    if let Some(back) = viewpoint
        .find_action_group_mut(BACK_GROUP.id)
        .and_then(|group| group.actions.first_mut())
    {
        back.title = "Run away like a baby".to_owned();
    }

    let enter = Action::new(viewpoint.scene_id, "Enter the cave")
        .with_parameter(SUB_ACTION_PARAMETER, "enter");
    if let Some(lair) = viewpoint.find_action_group_mut(LAIR_GROUP.id) {
        lair.add_action(enter);
    } else {
        let mut lair = ActionGroup::new(LAIR_GROUP.id, LAIR_GROUP.title, LAIR_GROUP.sort_key);
        lair.add_action(enter);
        viewpoint.add_action_group(lair);
    }

    character.set_seen_dragon(true)
}

fn enter_cave(
    game: Game<'_>,
    character: &mut Character,
    config: &DragonKillsConfig,
    viewpoint: &mut Viewpoint,
) -> Result<(), EngineError> {
    viewpoint.description = CAVE_DESCRIPTION.to_owned();
    let dragon = config.dragon.to_creature();
    let lair_id = viewpoint.scene_id;
    game.fights
        .start(character, dragon, lair_id, BATTLE_CONTEXT, viewpoint)
}

async fn show_epilogue(
    game: Game<'_>,
    character: &mut Character,
    viewpoint: &mut Viewpoint,
) -> Result<(), EngineError> {
    viewpoint.title = "Victory!".to_owned();
    viewpoint.description = EPILOGUE_DESCRIPTION.to_owned();

    game.events.publish(
        DRAGON_KILLED_EVENT,
        EventData::Character(CharacterData {
            character_id: character.id,
            value: None,
        }),
    );

    let last_new_day = game.time_keeper.game_time() - Duration::days(365);
    character.set_property(new_day::PROPERTY_LAST_NEW_DAY, &last_new_day)?;

    viewpoint.clear_action_groups();
    let lair_id = viewpoint.scene_id;
    add_action_to_village(game.scenes, viewpoint, lair_id, "It is a new day").await
}

/// Renders the outcome of a fight against the dragon. Other battles are
/// left untouched.
///
/// # Errors
///
/// Returns `EngineError::UnexpectedEventData` if the context carries no
/// battle, or the errors of the village lookup after a defeat.
pub async fn battle_over(
    game: Game<'_>,
    character: &Character,
    mut context: EventContext,
) -> Result<EventContext, EngineError> {
    let data = context.battle_over_mut()?;
    if data.battle_identifier != BATTLE_CONTEXT {
        return Ok(context);
    }

    let lair_id = data.referrer_scene_id;
    if data.battle.is_won_by(character) {
        data.viewpoint.title = "Victory!".to_owned();
        data.viewpoint.description = VICTORY_DESCRIPTION.to_owned();
        data.viewpoint.default_group_mut().add_action(
            Action::new(lair_id, "Continue").with_parameter(SUB_ACTION_PARAMETER, "epilogue"),
        );
        debug!(%character, "character battled a dragon, and won");
    } else {
        data.viewpoint.title = "Defeat!".to_owned();
        data.viewpoint.description = "You have been slain by the Green Dragon!!!".to_owned();
        data.viewpoint
            .add_description_paragraph("You might challenge him tomorrow again.");
        add_action_to_village(game.scenes, &mut data.viewpoint, lair_id, "Return to the village").await?;
        debug!(%character, "character battled a dragon, and lost");
    }

    Ok(context)
}

/// Adds an action leading from the lair to the village behind its forest.
async fn add_action_to_village(
    scenes: &dyn SceneRepository,
    viewpoint: &mut Viewpoint,
    lair_id: Uuid,
    title: &str,
) -> Result<(), EngineError> {
    if scenes.find(lair_id).await?.is_none() {
        return Err(EngineError::SceneNotFound(lair_id));
    }
    let forest = first_connected(scenes, lair_id, forest::TEMPLATE).await?;
    let village = first_connected(scenes, forest.id, village::TEMPLATE).await?;
    viewpoint
        .default_group_mut()
        .add_action(Action::new(village.id, title));
    Ok(())
}

async fn first_connected(
    scenes: &dyn SceneRepository,
    scene_id: Uuid,
    template: &str,
) -> Result<Scene, EngineError> {
    scenes
        .connected_scenes(scene_id)
        .await?
        .into_iter()
        .find(|scene| scene.has_template(template))
        .ok_or_else(|| EngineError::NoConnectedScene {
            scene_id,
            template: template.to_owned(),
        })
}
