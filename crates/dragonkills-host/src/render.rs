//! Renders stored scenes into viewpoints.

use dragonkills_core::scene::{Directionality, Scene, SceneConnection};
use dragonkills_core::viewpoint::{Action, ActionGroup, Viewpoint};

/// Sort key distance between consecutive connection groups.
const GROUP_SORT_STEP: i32 = 10;

/// Builds the viewpoint of `scene`.
///
/// Every connection group becomes an action group, sorted by its own sort
/// key or, when it has none, by its position. Every traversable
/// connection becomes an action titled after its destination, placed in
/// the connection's group or, failing that, the default group. Connections
/// to scenes missing from `neighbours` are skipped.
#[must_use]
pub fn render_scene(scene: &Scene, connections: &[SceneConnection], neighbours: &[Scene]) -> Viewpoint {
    let mut viewpoint = Viewpoint::new(scene.id, scene.title.clone(), scene.description.clone());

    for (position, group) in (1..).zip(&scene.connection_groups) {
        viewpoint.add_action_group(ActionGroup::new(
            group.id.clone(),
            group.title.clone(),
            group.sort_key.unwrap_or(position * GROUP_SORT_STEP),
        ));
    }

    for connection in connections {
        let Some((destination, group)) = traversal(scene, connection) else {
            continue;
        };
        let Some(destination_scene) = neighbours.iter().find(|candidate| candidate.id == destination)
        else {
            continue;
        };
        let action = Action::new(destination, destination_scene.title.clone());

        if let Some(group) = group.and_then(|id| viewpoint.find_action_group_mut(id)) {
            group.add_action(action);
        } else {
            viewpoint.default_group_mut().add_action(action);
        }
    }

    viewpoint
}

/// Returns the destination and the local group of a connection, if it can
/// be travelled from `scene`.
fn traversal<'c>(scene: &Scene, connection: &'c SceneConnection) -> Option<(uuid::Uuid, Option<&'c str>)> {
    if connection.outgoing_scene == scene.id {
        Some((connection.incoming_scene, connection.outgoing_group.as_deref()))
    } else if connection.incoming_scene == scene.id
        && connection.directionality == Directionality::Bidirectional
    {
        Some((connection.outgoing_scene, connection.incoming_group.as_deref()))
    } else {
        None
    }
}
