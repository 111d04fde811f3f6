//! Rebuilds a character's stage from a scene.

use std::collections::HashSet;

use stagehand_character::Character;
use stagehand_core::error::DomainError;
use stagehand_core::rng::DeterministicRng;
use stagehand_dice::DiceBag;
use stagehand_expression::Evaluator;
use stagehand_scene::query::traversable_connections;
use stagehand_scene::{ConnectionId, Scene, SceneConnection, SceneGraphStore};
use stagehand_stage::{Action, ActionGroup, Attachment, Stage};
use tracing::{debug, error};

/// Length of the random handle given to each action.
pub const ACTION_ID_LENGTH: usize = 8;

/// Renders scenes into stages.
///
/// Every render produces a brand-new [`Stage`]; nothing from the previous
/// stage survives.
pub struct SceneRenderer<'a> {
    store: &'a dyn SceneGraphStore,
}

impl<'a> SceneRenderer<'a> {
    #[must_use]
    pub fn new(store: &'a dyn SceneGraphStore) -> Self {
        Self { store }
    }

    /// Gives a character without a stage one bound to the default scene.
    /// A character that already has a stage keeps it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the graph has no default scene.
    pub fn render_default<'c>(
        &self,
        character: &'c mut Character,
        rng: &mut dyn DeterministicRng,
    ) -> Result<&'c Stage, DomainError> {
        let stage = match character.stage.take() {
            Some(stage) => stage,
            None => {
                let scene = self.store.default_scene()?;
                self.build(character, &scene, rng)?
            }
        };
        Ok(character.stage.insert(stage))
    }

    /// Renders `scene` and swaps the result in as the character's stage.
    ///
    /// # Errors
    ///
    /// Propagates failures from the dice bag.
    pub fn render<'c>(
        &self,
        character: &'c mut Character,
        scene: &Scene,
        rng: &mut dyn DeterministicRng,
    ) -> Result<&'c Stage, DomainError> {
        let stage = self.build(character, scene, rng)?;
        Ok(character.stage.insert(stage))
    }

    /// Builds the stage `scene` presents to `character` without touching the
    /// character.
    ///
    /// # Errors
    ///
    /// Propagates failures from the dice bag.
    pub fn build(
        &self,
        character: &Character,
        scene: &Scene,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Stage, DomainError> {
        let mut dice = DiceBag::new(rng);
        let mut stage = Stage::blank(character.id);
        stage.scene_id = Some(scene.id);
        stage.title.clone_from(&scene.title);
        stage.description.clone_from(&scene.description);
        stage.attachments = scene.attachments.iter().map(Attachment::from).collect();

        let mut added: HashSet<ConnectionId> = HashSet::new();

        for authored in self.store.action_groups(scene) {
            let mut group = ActionGroup::new(
                ActionGroup::authored_id(authored.id),
                authored.title.clone(),
                authored.sorting,
            );
            // Grouped connections are placed as authored: no direction or
            // gate check. Only the catch-all pass below applies them.
            for connection_id in &authored.connections {
                if added.contains(connection_id) {
                    continue;
                }
                let Some(connection) = self.store.find_connection(*connection_id) else {
                    error!(
                        connection_id = %connection_id,
                        group_id = %authored.id,
                        "action group references unknown connection"
                    );
                    continue;
                };
                group.push(synthesize(&mut dice, &connection, scene)?);
                added.insert(connection.id);
            }
            stage.action_groups.push(group);
        }

        let evaluator = Evaluator::new(character.expression_context());
        for connection in traversable_connections(self.store, scene, &evaluator) {
            if !added.insert(connection.id) {
                continue;
            }
            let action = synthesize(&mut dice, &connection, scene)?;
            stage.add_action(ActionGroup::EMPTY, action);
        }

        debug!(
            scene_id = %scene.id,
            character_id = %character.id,
            actions = stage.action_count(),
            "stage rendered"
        );
        Ok(stage)
    }
}

/// One action for `connection` as seen from `scene`.
///
/// A connection that does not touch `scene` still yields an action, titled
/// with an error naming the connection and pointing back at `scene`.
fn synthesize(
    dice: &mut DiceBag<'_>,
    connection: &SceneConnection,
    scene: &Scene,
) -> Result<Action, DomainError> {
    let id = dice.random_string(ACTION_ID_LENGTH)?;
    let action = match connection.leaving(scene.id) {
        Some((side, target)) => Action::new(id, side.label.clone(), target),
        None => {
            error!(
                connection_id = %connection.id,
                scene_id = %scene.id,
                "connection does not touch the scene it is rendered on"
            );
            Action::new(
                id,
                format!("Error: connection {} is not attached to this scene", connection.id),
                scene.id,
            )
        }
    };
    Ok(action.from_connection(connection.id))
}
