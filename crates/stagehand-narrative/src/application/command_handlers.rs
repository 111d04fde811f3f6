//! Command handlers for the Narrative Orchestration context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the character, render, persist.

use std::sync::Mutex;

use stagehand_character::CharacterRepository;
use stagehand_core::clock::Clock;
use stagehand_core::command::Command;
use stagehand_core::error::DomainError;
use stagehand_core::rng::DeterministicRng;
use stagehand_scene::SceneGraphStore;
use stagehand_stage::Stage;
use tracing::{debug, instrument};

use crate::domain::commands::{GetStage, TakeAction};
use crate::domain::new_day::NewDayRule;
use crate::domain::renderer::SceneRenderer;

/// Handles the `GetStage` command: returns the character's current stage,
/// rendering and persisting the default scene if the character has none yet.
///
/// Calling it again returns the stored stage without saving.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character or the default scene is
/// missing, and propagates repository failures.
#[instrument(
    skip_all,
    fields(
        command = command.command_type(),
        character_id = %command.character_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_get_stage(
    command: &GetStage,
    store: &dyn SceneGraphStore,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn CharacterRepository,
) -> Result<Stage, DomainError> {
    let mut character = repo.load(command.character_id).await?;
    if let Some(stage) = &character.stage {
        return Ok(stage.clone());
    }

    // Lock RNG only for the synchronous render, never across an await.
    let stage = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        SceneRenderer::new(store)
            .render_default(&mut character, &mut *rng_guard)?
            .clone()
    };

    repo.save(&character).await?;
    debug!("first stage created");
    Ok(stage)
}

/// Handles the `TakeAction` command: finds the chosen action on the current
/// stage, renders its target scene (or the new-day interstitial when
/// `new_day` says one is due) and persists the character.
///
/// # Errors
///
/// Returns `DomainError::InvalidAction` if the action is not on the current
/// stage; nothing is saved in that case. Returns `DomainError::NotFound` if
/// the character or target scene is missing, and propagates repository
/// failures.
#[instrument(
    skip_all,
    fields(
        command = command.command_type(),
        character_id = %command.character_id,
        correlation_id = %command.correlation_id,
        action_id = %command.action_id
    )
)]
pub async fn handle_take_action(
    command: &TakeAction,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn SceneGraphStore,
    repo: &dyn CharacterRepository,
    new_day: Option<&NewDayRule>,
) -> Result<Stage, DomainError> {
    let mut character = repo.load(command.character_id).await?;

    let action = character
        .stage
        .as_ref()
        .and_then(|stage| stage.find_action(&command.action_id))
        .cloned()
        .ok_or_else(|| {
            DomainError::InvalidAction(format!(
                "action {} is not on the current stage",
                command.action_id
            ))
        })?;

    let scene = store.find_by_id(action.target_scene).ok_or_else(|| {
        DomainError::NotFound(format!("scene {}", action.target_scene))
    })?;

    // Lock RNG only for the synchronous render, never across an await.
    let stage = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        match new_day {
            Some(rule) if rule.is_new_day(&character, clock) => rule
                .render(&mut character, &action, &scene, clock, &mut *rng_guard)?
                .clone(),
            _ => SceneRenderer::new(store)
                .render(&mut character, &scene, &mut *rng_guard)?
                .clone(),
        }
    };

    repo.save(&character).await?;
    debug!(scene_id = %scene.id, "action taken");
    Ok(stage)
}

/// The game loop's collaborators bundled for callers that drive many
/// requests against the same graph.
pub struct GameLoop<'a> {
    store: &'a dyn SceneGraphStore,
    repo: &'a dyn CharacterRepository,
    clock: &'a dyn Clock,
    rng: &'a Mutex<dyn DeterministicRng + Send>,
    new_day: Option<NewDayRule>,
}

impl<'a> GameLoop<'a> {
    /// A game loop without the new-day rule.
    #[must_use]
    pub fn new(
        store: &'a dyn SceneGraphStore,
        repo: &'a dyn CharacterRepository,
        clock: &'a dyn Clock,
        rng: &'a Mutex<dyn DeterministicRng + Send>,
    ) -> Self {
        Self {
            store,
            repo,
            clock,
            rng,
            new_day: None,
        }
    }

    /// Interposes the new-day interstitial according to `rule`.
    #[must_use]
    pub fn with_new_day(mut self, rule: NewDayRule) -> Self {
        self.new_day = Some(rule);
        self
    }

    /// See [`handle_get_stage`].
    ///
    /// # Errors
    ///
    /// As [`handle_get_stage`].
    pub async fn get_stage(&self, command: &GetStage) -> Result<Stage, DomainError> {
        handle_get_stage(command, self.store, self.rng, self.repo).await
    }

    /// See [`handle_take_action`].
    ///
    /// # Errors
    ///
    /// As [`handle_take_action`].
    pub async fn take_action(&self, command: &TakeAction) -> Result<Stage, DomainError> {
        handle_take_action(
            command,
            self.clock,
            self.rng,
            self.store,
            self.repo,
            self.new_day.as_ref(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use stagehand_character::Character;
    use stagehand_core::error::DomainError;
    use stagehand_core::rng::SeededRng;
    use stagehand_scene::{
        ConnectionId, ConnectionSide, ConnectionType, InMemorySceneGraph, Scene, SceneConnection,
        SceneGraphStore, SceneId,
    };
    use stagehand_stage::ActionGroup;
    use stagehand_test_support::{
        FailingCharacterRepository, FixedClock, InMemoryCharacterRepository,
    };
    use uuid::Uuid;

    use super::{handle_get_stage, handle_take_action};
    use crate::domain::commands::{GetStage, TakeAction};

    fn graph() -> InMemorySceneGraph {
        let mut graph = InMemorySceneGraph::new();
        graph
            .add_scene(Scene::new(SceneId(1), "A", "Start").as_default())
            .unwrap();
        graph.add_scene(Scene::new(SceneId(2), "B", "")).unwrap();
        graph
            .add_connection(SceneConnection {
                id: ConnectionId(1),
                source_scene: SceneId(1),
                target_scene: SceneId(2),
                forward: ConnectionSide::new("Go to B"),
                reverse: ConnectionSide::new("Back to A"),
                connection_type: ConnectionType::BothWays,
            })
            .unwrap();
        graph
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_handle_get_stage_renders_default_scene_once() {
        // Arrange
        let graph = graph();
        let character = Character::new(Uuid::new_v4(), "Alaric");
        let repo = InMemoryCharacterRepository::with_character(character.clone());
        let rng = Mutex::new(SeededRng::from_seed(1));
        let command = GetStage {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
        };

        // Act
        let first = handle_get_stage(&command, &graph, &rng, &repo).await.unwrap();
        let second = handle_get_stage(&command, &graph, &rng, &repo).await.unwrap();

        // Assert
        assert_eq!(first.scene_id, Some(SceneId(1)));
        assert_eq!(first, second);
        assert_eq!(repo.save_count(), 1);
        assert_eq!(repo.get(character.id).unwrap().stage, Some(first));
    }

    #[tokio::test]
    async fn test_handle_get_stage_unknown_character_is_not_found() {
        let graph = graph();
        let repo = InMemoryCharacterRepository::new();
        let rng = Mutex::new(SeededRng::from_seed(1));
        let command = GetStage {
            correlation_id: Uuid::new_v4(),
            character_id: Uuid::new_v4(),
        };

        let result = handle_get_stage(&command, &graph, &rng, &repo).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_handle_take_action_unknown_id_leaves_stage_untouched() {
        // Arrange
        let graph = graph();
        let character = Character::new(Uuid::new_v4(), "Alaric");
        let repo = InMemoryCharacterRepository::with_character(character.clone());
        let rng = Mutex::new(SeededRng::from_seed(1));
        let before = handle_get_stage(
            &GetStage {
                correlation_id: Uuid::new_v4(),
                character_id: character.id,
            },
            &graph,
            &rng,
            &repo,
        )
        .await
        .unwrap();
        let command = TakeAction {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
            action_id: "nope".to_owned(),
        };

        // Act
        let result = handle_take_action(&command, &clock(), &rng, &graph, &repo, None).await;

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidAction(_))));
        assert!(result.unwrap_err().is_recoverable());
        assert_eq!(repo.save_count(), 1);
        assert_eq!(repo.get(character.id).unwrap().stage, Some(before));
    }

    #[tokio::test]
    async fn test_handle_take_action_moves_to_target_scene() {
        // Arrange
        let graph = graph();
        let character = Character::new(Uuid::new_v4(), "Alaric");
        let repo = InMemoryCharacterRepository::with_character(character.clone());
        let rng = Mutex::new(SeededRng::from_seed(1));
        let stage = handle_get_stage(
            &GetStage {
                correlation_id: Uuid::new_v4(),
                character_id: character.id,
            },
            &graph,
            &rng,
            &repo,
        )
        .await
        .unwrap();
        let go = &stage.action_group(ActionGroup::EMPTY).unwrap().actions[0];
        let command = TakeAction {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
            action_id: go.id.clone(),
        };

        // Act
        let stage = handle_take_action(&command, &clock(), &rng, &graph, &repo, None)
            .await
            .unwrap();

        // Assert
        assert_eq!(stage.scene_id, Some(SceneId(2)));
        assert_eq!(stage.title, "B");
        assert_eq!(repo.save_count(), 2);
    }

    #[tokio::test]
    async fn test_handle_take_action_propagates_save_failure() {
        // Arrange
        let graph = graph();
        let mut character = Character::new(Uuid::new_v4(), "Alaric");
        let mut rng = SeededRng::from_seed(1);
        let scene = graph.find_by_id(SceneId(1)).unwrap();
        crate::SceneRenderer::new(&graph)
            .render(&mut character, &scene, &mut rng)
            .unwrap();
        let action_id = character.stage.as_ref().unwrap().action_ids()[0].to_owned();
        let repo = FailingCharacterRepository::with_character(character.clone());
        let rng = Mutex::new(rng);
        let command = TakeAction {
            correlation_id: Uuid::new_v4(),
            character_id: character.id,
            action_id,
        };

        // Act
        let result = handle_take_action(&command, &clock(), &rng, &graph, &repo, None).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
