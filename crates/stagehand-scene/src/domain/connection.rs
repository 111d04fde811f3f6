//! Edges of the scene graph.

use serde::{Deserialize, Serialize};

use super::ids::{ConnectionId, SceneId};

/// Which directions a connection can be travelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Source to target and back.
    #[default]
    BothWays,
    /// Source to target only.
    ForwardOnly,
    /// Target to source only.
    ReverseOnly,
}

/// What one direction of a connection looks like to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionSide {
    /// Button text.
    pub label: String,
    /// Gating expression; `None` or empty means always open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl ConnectionSide {
    /// An ungated side.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expression: None,
        }
    }

    /// A side gated by `expression`.
    #[must_use]
    pub fn gated(label: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expression: Some(expression.into()),
        }
    }
}

/// An authored edge between two scenes.
///
/// `forward` is what a player standing on the source scene sees (leading to
/// the target); `reverse` is what a player on the target scene sees (leading
/// back to the source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneConnection {
    /// Connection identifier.
    pub id: ConnectionId,
    /// The scene the connection starts at.
    pub source_scene: SceneId,
    /// The scene the connection ends at.
    pub target_scene: SceneId,
    /// Label and gate shown on the source scene.
    pub forward: ConnectionSide,
    /// Label and gate shown on the target scene.
    #[serde(default)]
    pub reverse: ConnectionSide,
    /// Traversal directions.
    #[serde(default)]
    pub connection_type: ConnectionType,
}

impl SceneConnection {
    /// Whether either endpoint is `scene`.
    #[must_use]
    pub fn touches(&self, scene: SceneId) -> bool {
        self.source_scene == scene || self.target_scene == scene
    }

    /// Whether a player on `scene` may travel along this connection.
    #[must_use]
    pub fn is_traversable_from(&self, scene: SceneId) -> bool {
        if self.source_scene == scene
            && matches!(
                self.connection_type,
                ConnectionType::BothWays | ConnectionType::ForwardOnly
            )
        {
            return true;
        }
        self.target_scene == scene
            && matches!(
                self.connection_type,
                ConnectionType::BothWays | ConnectionType::ReverseOnly
            )
    }

    /// The side shown on `scene` and the scene it leads to, or `None` if the
    /// connection does not touch `scene`.
    ///
    /// A self-loop (source equals target) is read from the source side.
    #[must_use]
    pub fn leaving(&self, scene: SceneId) -> Option<(&ConnectionSide, SceneId)> {
        if self.source_scene == scene {
            Some((&self.forward, self.target_scene))
        } else if self.target_scene == scene {
            Some((&self.reverse, self.source_scene))
        } else {
            None
        }
    }

    /// The gating expression that applies when leaving `scene`.
    #[must_use]
    pub fn expression_from(&self, scene: SceneId) -> Option<&str> {
        self.leaving(scene)
            .and_then(|(side, _)| side.expression.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(kind: ConnectionType) -> SceneConnection {
        SceneConnection {
            id: ConnectionId(1),
            source_scene: SceneId(10),
            target_scene: SceneId(20),
            forward: ConnectionSide::new("Go to B"),
            reverse: ConnectionSide::gated("Back to A", "gold > 0"),
            connection_type: kind,
        }
    }

    #[test]
    fn test_both_ways_is_traversable_from_either_end() {
        let c = connection(ConnectionType::BothWays);
        assert!(c.is_traversable_from(SceneId(10)));
        assert!(c.is_traversable_from(SceneId(20)));
        assert!(!c.is_traversable_from(SceneId(30)));
    }

    #[test]
    fn test_forward_only_is_traversable_from_source_only() {
        let c = connection(ConnectionType::ForwardOnly);
        assert!(c.is_traversable_from(SceneId(10)));
        assert!(!c.is_traversable_from(SceneId(20)));
    }

    #[test]
    fn test_reverse_only_is_traversable_from_target_only() {
        let c = connection(ConnectionType::ReverseOnly);
        assert!(!c.is_traversable_from(SceneId(10)));
        assert!(c.is_traversable_from(SceneId(20)));
    }

    #[test]
    fn test_leaving_picks_side_and_opposite_endpoint() {
        let c = connection(ConnectionType::BothWays);

        let (side, target) = c.leaving(SceneId(10)).unwrap();
        assert_eq!(side.label, "Go to B");
        assert_eq!(target, SceneId(20));

        let (side, target) = c.leaving(SceneId(20)).unwrap();
        assert_eq!(side.label, "Back to A");
        assert_eq!(target, SceneId(10));

        assert!(c.leaving(SceneId(99)).is_none());
    }

    #[test]
    fn test_expression_from_follows_direction() {
        let c = connection(ConnectionType::BothWays);
        assert_eq!(c.expression_from(SceneId(10)), None);
        assert_eq!(c.expression_from(SceneId(20)), Some("gold > 0"));
    }
}
