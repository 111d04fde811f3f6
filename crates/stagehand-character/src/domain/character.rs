//! The character entity.

use serde::{Deserialize, Serialize};
use stagehand_expression::{ExpressionContext, Value};
use stagehand_stage::Stage;
use uuid::Uuid;

use super::properties::CharacterProperties;

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current level, starting at 1.
    pub level: i64,
    /// Current hit points.
    pub health: i64,
    /// Hit points when fully healed.
    pub max_health: i64,
    /// Experience gathered toward the next level.
    pub experience: i64,
    /// Experience needed for the next level.
    pub required_experience: i64,
    /// Coins carried.
    pub gold: i64,
    /// Name of the equipped weapon, if any.
    #[serde(default)]
    pub weapon: Option<String>,
    /// Name of the equipped armor, if any.
    #[serde(default)]
    pub armor: Option<String>,
    /// Engine bookkeeping and author values.
    #[serde(default)]
    pub properties: CharacterProperties,
    /// What the character currently sees. `None` until the first render.
    #[serde(default)]
    pub stage: Option<Stage>,
}

impl Character {
    const STARTING_HEALTH: i64 = 10;
    const FIRST_LEVEL_EXPERIENCE: i64 = 100;

    /// A level-one character with no stage.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            health: Self::STARTING_HEALTH,
            max_health: Self::STARTING_HEALTH,
            experience: 0,
            required_experience: Self::FIRST_LEVEL_EXPERIENCE,
            gold: 0,
            weapon: None,
            armor: None,
            properties: CharacterProperties::default(),
            stage: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold;
        self
    }

    /// Swaps in a freshly rendered stage, returning the one it replaces.
    pub fn replace_stage(&mut self, stage: Stage) -> Option<Stage> {
        self.stage.replace(stage)
    }

    /// The read-only snapshot gating expressions are evaluated against.
    ///
    /// Exposes `character.{name,level}`, `health.{health,maxHealth}`,
    /// `stats.{experience,required}`, `gold` and `equipment.{weapon,armor}`.
    #[must_use]
    pub fn expression_context(&self) -> ExpressionContext {
        ExpressionContext::new()
            .with_namespace(
                "character",
                [
                    ("name", Value::from(self.name.as_str())),
                    ("level", Value::from(self.level)),
                ],
            )
            .with_namespace(
                "health",
                [("health", self.health), ("maxHealth", self.max_health)],
            )
            .with_namespace(
                "stats",
                [
                    ("experience", self.experience),
                    ("required", self.required_experience),
                ],
            )
            .with_value("gold", self.gold)
            .with_namespace(
                "equipment",
                [
                    ("weapon", Value::from(self.weapon.clone())),
                    ("armor", Value::from(self.armor.clone())),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use stagehand_expression::Evaluator;
    use stagehand_scene::SceneId;

    use super::*;

    #[test]
    fn test_new_character_has_no_stage() {
        let character = Character::new(Uuid::new_v4(), "Alaric");

        assert!(character.stage.is_none());
        assert_eq!(character.level, 1);
        assert!(character.properties.last_new_day.is_none());
    }

    #[test]
    fn test_expression_context_exposes_namespaces() {
        // Arrange
        let mut character = Character::new(Uuid::new_v4(), "Alaric")
            .with_level(5)
            .with_gold(30);
        character.weapon = Some("Sword".to_owned());
        let evaluator = Evaluator::new(character.expression_context());

        // Act / Assert
        assert_eq!(
            evaluator.try_evaluate(Some("character.level >= 5 and gold > 20")),
            Ok(true)
        );
        assert_eq!(
            evaluator.try_evaluate(Some("health.health == health.maxHealth")),
            Ok(true)
        );
        assert_eq!(
            evaluator.try_evaluate(Some("equipment.weapon == \"Sword\"")),
            Ok(true)
        );
        assert_eq!(
            evaluator.try_evaluate(Some("equipment.armor == null")),
            Ok(true)
        );
        assert_eq!(
            evaluator.try_evaluate(Some("stats.required - stats.experience == 100")),
            Ok(true)
        );
    }

    #[test]
    fn test_replace_stage_returns_previous() {
        let mut character = Character::new(Uuid::new_v4(), "Alaric");
        let first = Stage::blank(character.id);
        let mut second = Stage::blank(character.id);
        second.scene_id = Some(SceneId(2));

        assert!(character.replace_stage(first.clone()).is_none());
        assert_eq!(character.replace_stage(second), Some(first));
        assert_eq!(
            character.stage.as_ref().and_then(|s| s.scene_id),
            Some(SceneId(2))
        );
    }
}
