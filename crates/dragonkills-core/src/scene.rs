//! Scenes and the connections between them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named slot on a scene that outgoing connections attach to. Rendered
/// as an action group in the viewpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGroup {
    /// Group identifier, unique within the scene.
    pub id: String,
    /// Title shown to the player.
    pub title: String,
    /// Sort key of the rendered action group. Unset groups follow the
    /// scene's group order.
    #[serde(default)]
    pub sort_key: Option<i32>,
}

impl ConnectionGroup {
    /// Creates a connection group without an explicit sort key.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sort_key: None,
        }
    }

    /// Sets the sort key, builder style.
    #[must_use]
    pub fn with_sort_key(mut self, sort_key: i32) -> Self {
        self.sort_key = Some(sort_key);
        self
    }
}

/// A node in the navigable content graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier.
    pub id: Uuid,
    /// Scene title.
    pub title: String,
    /// Scene body text.
    pub description: String,
    /// Class of the template this scene was built from, if any.
    pub template: Option<String>,
    /// Connection groups, in display order.
    pub connection_groups: Vec<ConnectionGroup>,
}

impl Scene {
    /// Creates a scene without template or connection groups.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            template: None,
            connection_groups: Vec::new(),
        }
    }

    /// Sets the template class, builder style.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Adds a connection group.
    pub fn add_connection_group(&mut self, group: ConnectionGroup) {
        self.connection_groups.push(group);
    }

    /// Returns the connection group with the given id.
    #[must_use]
    pub fn connection_group(&self, id: &str) -> Option<&ConnectionGroup> {
        self.connection_groups.iter().find(|group| group.id == id)
    }

    /// Returns `true` if the scene was built from the given template class.
    #[must_use]
    pub fn has_template(&self, template: &str) -> bool {
        self.template.as_deref() == Some(template)
    }
}

/// Whether a connection can be travelled both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directionality {
    /// Only from the outgoing scene to the incoming scene.
    Unidirectional,
    /// Both ways.
    Bidirectional,
}

/// An edge of the scene graph.
///
/// Both ends see each other as connected scenes, but only traversable
/// directions are rendered as actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneConnection {
    /// The scene the connection starts from.
    pub outgoing_scene: Uuid,
    /// Connection group on the outgoing scene, if any.
    pub outgoing_group: Option<String>,
    /// The scene the connection leads to.
    pub incoming_scene: Uuid,
    /// Connection group on the incoming scene, if any.
    pub incoming_group: Option<String>,
    /// Traversal direction.
    pub directionality: Directionality,
}

impl SceneConnection {
    /// Returns the other end of the connection, if `scene_id` is one end.
    #[must_use]
    pub fn other_end(&self, scene_id: Uuid) -> Option<Uuid> {
        if self.outgoing_scene == scene_id {
            Some(self.incoming_scene)
        } else if self.incoming_scene == scene_id {
            Some(self.outgoing_scene)
        } else {
            None
        }
    }

    /// Returns `true` if `scene_id` is one end of the connection.
    #[must_use]
    pub fn touches(&self, scene_id: Uuid) -> bool {
        self.other_end(scene_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_end_resolves_both_directions() {
        // Arrange
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let connection = SceneConnection {
            outgoing_scene: a,
            outgoing_group: None,
            incoming_scene: b,
            incoming_group: None,
            directionality: Directionality::Unidirectional,
        };

        // Act / Assert
        assert_eq!(connection.other_end(a), Some(b));
        assert_eq!(connection.other_end(b), Some(a));
        assert_eq!(connection.other_end(Uuid::new_v4()), None);
    }

    #[test]
    fn test_has_template_matches_class() {
        let scene = Scene::new("Forest", "Trees.").with_template("lotgd/module-forest/forest");

        assert!(scene.has_template("lotgd/module-forest/forest"));
        assert!(!scene.has_template("lotgd/module-village/village"));
    }
}
