//! Actions and the groups that hold them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stagehand_scene::{ConnectionId, SceneActionGroupId, SceneId};

/// A clickable choice on a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Short random handle the client submits back.
    pub id: String,
    /// Button text.
    pub title: String,
    /// Where the action leads.
    pub target_scene: SceneId,
    /// Free-form parameters, e.g. an item picked in a shop.
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// The connection this action was built from, if any.
    #[serde(default)]
    pub source_connection: Option<ConnectionId>,
}

impl Action {
    /// An action with no parameters and no source connection.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, target_scene: SceneId) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            target_scene,
            parameters: BTreeMap::new(),
            source_connection: None,
        }
    }

    /// Records the connection the action was built from.
    #[must_use]
    pub fn from_connection(mut self, connection: ConnectionId) -> Self {
        self.source_connection = Some(connection);
        self
    }

    /// Sets one parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: BTreeMap<String, serde_json::Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A heading with the actions listed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionGroup {
    /// Reserved sentinel or id derived from an authored group.
    pub id: String,
    /// Heading text.
    pub title: String,
    /// Sort weight; lower sorts first.
    pub weight: i32,
    /// Actions in insertion order.
    pub actions: Vec<Action>,
}

impl ActionGroup {
    /// Id of the catch-all group present on every stage.
    pub const EMPTY: &'static str = "empty";
    /// Id of the group whose actions are reachable but not listed.
    pub const HIDDEN: &'static str = "hidden";

    const EMPTY_TITLE: &'static str = "Others";
    const HIDDEN_TITLE: &'static str = "Hidden";
    const EMPTY_WEIGHT: i32 = 100;
    const HIDDEN_WEIGHT: i32 = 1000;

    /// An empty group.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, weight: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            weight,
            actions: Vec::new(),
        }
    }

    /// The reserved groups every stage starts with, in order.
    #[must_use]
    pub fn defaults() -> Vec<ActionGroup> {
        vec![
            Self::new(Self::EMPTY, Self::EMPTY_TITLE, Self::EMPTY_WEIGHT),
            Self::new(Self::HIDDEN, Self::HIDDEN_TITLE, Self::HIDDEN_WEIGHT),
        ]
    }

    /// The id an authored scene action group is rendered under.
    #[must_use]
    pub fn authored_id(group: SceneActionGroupId) -> String {
        format!("scene-action-group/{group}")
    }

    /// Whether this is the hidden group.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.id == Self::HIDDEN
    }

    /// Appends an action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Finds an action by handle.
    #[must_use]
    pub fn find(&self, action_id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == action_id)
    }
}
