//! Query handlers for the Narrative Orchestration context.
//!
//! Read-only views of a character's stage for presentation layers.

use serde::Serialize;
use stagehand_character::CharacterRepository;
use stagehand_core::error::DomainError;
use stagehand_scene::SceneId;
use stagehand_stage::{ActionGroup, Attachment, Stage};
use uuid::Uuid;

/// Read-only view of one action.
#[derive(Debug, Serialize)]
pub struct ActionView {
    /// Handle to submit back with `TakeAction`.
    pub id: String,
    pub title: String,
}

/// Read-only view of one action group.
#[derive(Debug, Serialize)]
pub struct ActionGroupView {
    pub id: String,
    pub title: String,
    pub weight: i32,
    pub actions: Vec<ActionView>,
}

/// Read-only view of a character's stage.
#[derive(Debug, Serialize)]
pub struct StageView {
    /// The owning character.
    pub character_id: Uuid,
    /// The scene shown, `None` on interstitials.
    pub scene_id: Option<SceneId>,
    pub title: String,
    pub description: String,
    /// Listed groups, lightest weight first. The hidden group and empty
    /// groups are left out.
    pub action_groups: Vec<ActionGroupView>,
    pub attachments: Vec<Attachment>,
}

impl From<&Stage> for StageView {
    fn from(stage: &Stage) -> Self {
        let mut groups: Vec<&ActionGroup> = stage
            .action_groups
            .iter()
            .filter(|g| !g.is_hidden() && !g.actions.is_empty())
            .collect();
        groups.sort_by_key(|g| g.weight);

        Self {
            character_id: stage.owner,
            scene_id: stage.scene_id,
            title: stage.title.clone(),
            description: stage.description.clone(),
            action_groups: groups
                .into_iter()
                .map(|g| ActionGroupView {
                    id: g.id.clone(),
                    title: g.title.clone(),
                    weight: g.weight,
                    actions: g
                        .actions
                        .iter()
                        .map(|a| ActionView {
                            id: a.id.clone(),
                            title: a.title.clone(),
                        })
                        .collect(),
                })
                .collect(),
            attachments: stage.attachments.clone(),
        }
    }
}

/// Retrieves the view of a character's current stage.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character is unknown or has not
/// been shown a stage yet, and propagates repository failures.
pub async fn get_stage_view(
    character_id: Uuid,
    repo: &dyn CharacterRepository,
) -> Result<StageView, DomainError> {
    let character = repo.load(character_id).await?;
    character
        .stage
        .as_ref()
        .map(StageView::from)
        .ok_or_else(|| DomainError::NotFound(format!("stage for character {character_id}")))
}

#[cfg(test)]
mod tests {
    use stagehand_character::Character;
    use stagehand_core::error::DomainError;
    use stagehand_scene::SceneId;
    use stagehand_stage::{Action, ActionGroup, Stage};
    use stagehand_test_support::{FailingCharacterRepository, InMemoryCharacterRepository};
    use uuid::Uuid;

    use crate::application::query_handlers::get_stage_view;

    #[tokio::test]
    async fn test_get_stage_view_sorts_by_weight_and_skips_hidden() {
        // Arrange
        let mut character = Character::new(Uuid::new_v4(), "Alaric");
        let mut stage = Stage::blank(character.id);
        stage.scene_id = Some(SceneId(1));
        let mut shops = ActionGroup::new("scene-action-group/1", "Shops", 5);
        shops.push(Action::new("s1", "Smithy", SceneId(2)));
        stage.action_groups.push(shops);
        stage.add_action(ActionGroup::EMPTY, Action::new("o1", "Leave", SceneId(3)));
        stage.add_action(ActionGroup::HIDDEN, Action::new("h1", "Secret", SceneId(4)));
        character.replace_stage(stage);
        let repo = InMemoryCharacterRepository::with_character(character.clone());

        // Act
        let view = get_stage_view(character.id, &repo).await.unwrap();

        // Assert
        let ids: Vec<&str> = view.action_groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["scene-action-group/1", ActionGroup::EMPTY]);
        assert_eq!(view.scene_id, Some(SceneId(1)));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["action_groups"][0]["actions"][0]["title"], "Smithy");
    }

    #[tokio::test]
    async fn test_get_stage_view_without_stage_is_not_found() {
        let character = Character::new(Uuid::new_v4(), "Alaric");
        let repo = InMemoryCharacterRepository::with_character(character.clone());

        let result = get_stage_view(character.id, &repo).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_stage_view_propagates_repository_failure() {
        let repo = FailingCharacterRepository::new();

        let result = get_stage_view(Uuid::new_v4(), &repo).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
