//! What the player currently sees: a rendered scene with its actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contracts::core::DEFAULT_ACTION_GROUP;

/// String parameters attached to an action and handed back on navigation.
pub type Parameters = BTreeMap<String, String>;

/// A player-selectable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action identifier.
    pub id: Uuid,
    /// Scene the action navigates to.
    pub destination_scene_id: Uuid,
    /// Title shown to the player.
    pub title: String,
    /// Parameters handed to the destination's navigation event.
    pub parameters: Parameters,
}

impl Action {
    /// Creates an action without parameters.
    #[must_use]
    pub fn new(destination_scene_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination_scene_id,
            title: title.into(),
            parameters: Parameters::new(),
        }
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// A named, ordered cluster of actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroup {
    /// Group identifier.
    pub id: String,
    /// Title shown to the player.
    pub title: String,
    /// Groups are displayed in ascending sort key order.
    pub sort_key: i32,
    /// Actions in display order.
    pub actions: Vec<Action>,
}

impl ActionGroup {
    /// Creates an empty action group.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, sort_key: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sort_key,
            actions: Vec::new(),
        }
    }

    /// Creates the empty default group.
    #[must_use]
    pub fn default_group() -> Self {
        Self::new(DEFAULT_ACTION_GROUP, "", 0)
    }

    /// Appends an action.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }
}

/// A rendered scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// The scene this viewpoint renders.
    pub scene_id: Uuid,
    /// Title shown to the player.
    pub title: String,
    /// Body text shown to the player.
    pub description: String,
    action_groups: Vec<ActionGroup>,
}

impl Viewpoint {
    /// Creates a viewpoint without actions.
    #[must_use]
    pub fn new(scene_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            scene_id,
            title: title.into(),
            description: description.into(),
            action_groups: Vec::new(),
        }
    }

    /// Appends a paragraph to the description.
    pub fn add_description_paragraph(&mut self, paragraph: &str) {
        if self.description.is_empty() {
            self.description = paragraph.to_owned();
        } else {
            self.description.push_str("\n\n");
            self.description.push_str(paragraph);
        }
    }

    /// Returns the action groups in display order.
    #[must_use]
    pub fn action_groups(&self) -> &[ActionGroup] {
        &self.action_groups
    }

    /// Inserts a group, keeping groups ordered by sort key. Groups with
    /// equal keys keep insertion order.
    pub fn add_action_group(&mut self, group: ActionGroup) {
        let position = self.insertion_point(group.sort_key);
        self.action_groups.insert(position, group);
    }

    fn insertion_point(&self, sort_key: i32) -> usize {
        self.action_groups
            .iter()
            .position(|existing| existing.sort_key > sort_key)
            .unwrap_or(self.action_groups.len())
    }

    /// Removes all action groups.
    pub fn clear_action_groups(&mut self) {
        self.action_groups.clear();
    }

    /// Returns the group with the given id.
    #[must_use]
    pub fn find_action_group(&self, id: &str) -> Option<&ActionGroup> {
        self.action_groups.iter().find(|group| group.id == id)
    }

    /// Returns the group with the given id, mutably.
    pub fn find_action_group_mut(&mut self, id: &str) -> Option<&mut ActionGroup> {
        self.action_groups.iter_mut().find(|group| group.id == id)
    }

    /// Returns the default group, creating it if missing.
    pub fn default_group_mut(&mut self) -> &mut ActionGroup {
        let existing = self
            .action_groups
            .iter()
            .position(|group| group.id == DEFAULT_ACTION_GROUP);
        let index = match existing {
            Some(index) => index,
            None => {
                let group = ActionGroup::default_group();
                let index = self.insertion_point(group.sort_key);
                self.action_groups.insert(index, group);
                index
            }
        };
        &mut self.action_groups[index]
    }

    /// Returns the action with the given id.
    #[must_use]
    pub fn find_action(&self, id: Uuid) -> Option<&Action> {
        self.actions().find(|action| action.id == id)
    }

    /// Iterates over all actions of all groups.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.action_groups.iter().flat_map(|group| group.actions.iter())
    }
}
