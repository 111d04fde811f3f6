//! The stage: a character's current view of the game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stagehand_scene::SceneId;
use uuid::Uuid;

use crate::action::{Action, ActionGroup};
use crate::attachment::Attachment;

/// Everything a character currently sees and can do.
///
/// Stages are never patched: each render produces a new value that replaces
/// the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// The character this stage belongs to.
    pub owner: Uuid,
    /// The scene being shown, or `None` for interstitials.
    pub scene_id: Option<SceneId>,
    /// Heading.
    pub title: String,
    /// Narrative text.
    pub description: String,
    /// Action groups in creation order; the reserved groups come first.
    pub action_groups: Vec<ActionGroup>,
    /// Free-form values for templates and attachments.
    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,
    /// Components rendered alongside the stage.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Stage {
    /// A blank stage carrying only the reserved action groups.
    #[must_use]
    pub fn blank(owner: Uuid) -> Self {
        Self {
            owner,
            scene_id: None,
            title: String::new(),
            description: String::new(),
            action_groups: ActionGroup::defaults(),
            context: BTreeMap::new(),
            attachments: Vec::new(),
        }
    }

    /// Finds an action by handle, searching groups in stored order.
    #[must_use]
    pub fn find_action(&self, action_id: &str) -> Option<&Action> {
        self.action_groups
            .iter()
            .find_map(|group| group.find(action_id))
    }

    /// Looks up a group by id.
    #[must_use]
    pub fn action_group(&self, group_id: &str) -> Option<&ActionGroup> {
        self.action_groups.iter().find(|g| g.id == group_id)
    }

    /// Appends an action to the group `group_id`. Returns `false` (and drops
    /// the action) if the group does not exist.
    pub fn add_action(&mut self, group_id: &str, action: Action) -> bool {
        match self.action_groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.push(action);
                true
            }
            None => false,
        }
    }

    /// Every action handle on the stage, in group order.
    #[must_use]
    pub fn action_ids(&self) -> Vec<&str> {
        self.action_groups
            .iter()
            .flat_map(|g| g.actions.iter().map(|a| a.id.as_str()))
            .collect()
    }

    /// Total number of actions across all groups.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.action_groups.iter().map(|g| g.actions.len()).sum()
    }
}
