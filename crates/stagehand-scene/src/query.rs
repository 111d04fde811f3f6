//! Which connections a player can currently take.

use stagehand_expression::Evaluator;
use tracing::trace;

use crate::domain::connection::SceneConnection;
use crate::domain::scene::Scene;
use crate::store::SceneGraphStore;

/// Connections leaving `scene` whose direction allows it and whose gate, read
/// from the side the player stands on, is open for `evaluator`'s context.
pub fn traversable_connections(
    store: &dyn SceneGraphStore,
    scene: &Scene,
    evaluator: &Evaluator,
) -> Vec<SceneConnection> {
    store
        .connections(scene, true)
        .into_iter()
        .filter(|connection| {
            let open = evaluator.evaluate(connection.expression_from(scene.id));
            if !open {
                trace!(connection_id = %connection.id, scene_id = %scene.id, "connection gated");
            }
            open
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::connection::{ConnectionSide, ConnectionType};
    use crate::domain::ids::{ConnectionId, SceneId};
    use crate::in_memory::InMemorySceneGraph;
    use stagehand_expression::ExpressionContext;

    fn graph() -> InMemorySceneGraph {
        let mut graph = InMemorySceneGraph::new();
        graph
            .add_scene(Scene::new(SceneId(1), "Gate", "").as_default())
            .unwrap();
        graph.add_scene(Scene::new(SceneId(2), "Keep", "")).unwrap();
        graph
            .add_connection(SceneConnection {
                id: ConnectionId(7),
                source_scene: SceneId(1),
                target_scene: SceneId(2),
                forward: ConnectionSide::gated("Enter the keep", "character.level >= 5"),
                reverse: ConnectionSide::new("Leave"),
                connection_type: ConnectionType::ForwardOnly,
            })
            .unwrap();
        graph
    }

    fn evaluator(level: i64) -> Evaluator {
        Evaluator::new(
            ExpressionContext::new().with_namespace("character", [("level", level)]),
        )
    }

    #[test]
    fn test_gate_closed_below_level() {
        let graph = graph();
        let gate = graph.find_by_id(SceneId(1)).unwrap();

        assert!(traversable_connections(&graph, &gate, &evaluator(3)).is_empty());
    }

    #[test]
    fn test_gate_open_at_level() {
        let graph = graph();
        let gate = graph.find_by_id(SceneId(1)).unwrap();

        let open = traversable_connections(&graph, &gate, &evaluator(5));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, ConnectionId(7));
    }

    #[test]
    fn test_direction_still_applies_on_far_side() {
        let graph = graph();
        let keep = graph.find_by_id(SceneId(2)).unwrap();

        assert!(traversable_connections(&graph, &keep, &evaluator(10)).is_empty());
    }
}
