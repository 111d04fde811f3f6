//! The new-day interstitial.

use chrono::TimeDelta;
use stagehand_character::Character;
use stagehand_core::clock::Clock;
use stagehand_core::error::DomainError;
use stagehand_core::rng::DeterministicRng;
use stagehand_dice::DiceBag;
use stagehand_scene::Scene;
use stagehand_stage::{Action, ActionGroup, Stage, parameters};
use tracing::info;

use super::renderer::ACTION_ID_LENGTH;

/// Value of [`parameters::INTERSTITIAL`] on the continuation action.
pub const INTERSTITIAL_NAME: &str = "new_day";

const TITLE: &str = "It is a new day!";
const DESCRIPTION: &str = "You open your eyes and find yourself rested. The world has moved on while you slept.";
const CONTINUE_TITLE: &str = "Continue";

/// Decides when a character's day has turned over and renders the
/// interstitial shown when it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDayRule {
    interval: TimeDelta,
}

impl Default for NewDayRule {
    fn default() -> Self {
        Self {
            interval: TimeDelta::seconds(60),
        }
    }
}

impl NewDayRule {
    /// A rule that starts a new day once `interval` has passed since the
    /// last one.
    #[must_use]
    pub fn new(interval: TimeDelta) -> Self {
        Self { interval }
    }

    /// True if the character never had a new day or the last one lies more
    /// than the interval in the past.
    #[must_use]
    pub fn is_new_day(&self, character: &Character, clock: &dyn Clock) -> bool {
        character
            .properties
            .last_new_day
            .is_none_or(|last| clock.elapsed_since(last) > self.interval)
    }

    /// Replaces the character's stage with the interstitial and stamps the
    /// new day.
    ///
    /// The interstitial shows no scene and offers a single action toward
    /// `scene` that carries `action`'s parameters through.
    ///
    /// # Errors
    ///
    /// Propagates failures from the dice bag.
    pub fn render<'c>(
        &self,
        character: &'c mut Character,
        action: &Action,
        scene: &Scene,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<&'c Stage, DomainError> {
        let mut stage = Stage::blank(character.id);
        stage.title = TITLE.to_owned();
        stage.description = DESCRIPTION.to_owned();

        let id = DiceBag::new(rng).random_string(ACTION_ID_LENGTH)?;
        let continuation = Action::new(id, CONTINUE_TITLE, scene.id)
            .with_parameters(action.parameters.clone())
            .with_parameter(parameters::INTERSTITIAL, INTERSTITIAL_NAME);
        stage.add_action(ActionGroup::EMPTY, continuation);

        let now = clock.now();
        character.properties.set_last_new_day(now);
        info!(character_id = %character.id, scene_id = %scene.id, at = %now, "new day");
        Ok(character.stage.insert(stage))
    }
}
