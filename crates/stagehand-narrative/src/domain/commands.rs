//! Commands for the Narrative Orchestration context.

use stagehand_core::command::Command;
use uuid::Uuid;

/// Command to fetch a character's stage, rendering the default scene on the
/// first visit.
#[derive(Debug, Clone)]
pub struct GetStage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character whose stage is requested.
    pub character_id: Uuid,
}

impl Command for GetStage {
    fn command_type(&self) -> &'static str {
        "narrative.get_stage"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn character_id(&self) -> Uuid {
        self.character_id
    }
}

/// Command to take one of the actions on the character's current stage.
#[derive(Debug, Clone)]
pub struct TakeAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting character.
    pub character_id: Uuid,
    /// Handle of the chosen action.
    pub action_id: String,
}

impl Command for TakeAction {
    fn command_type(&self) -> &'static str {
        "narrative.take_action"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn character_id(&self) -> Uuid {
        self.character_id
    }
}

#[cfg(test)]
mod tests {
    use stagehand_core::command::Command;
    use uuid::Uuid;

    use super::{GetStage, TakeAction};

    #[test]
    fn test_commands_name_themselves_for_spans() {
        let character_id = Uuid::new_v4();
        let get = GetStage {
            correlation_id: Uuid::new_v4(),
            character_id,
        };
        let take = TakeAction {
            correlation_id: Uuid::new_v4(),
            character_id,
            action_id: "abcd1234".to_owned(),
        };

        assert_eq!(get.command_type(), "narrative.get_stage");
        assert_eq!(take.command_type(), "narrative.take_action");
        assert_eq!(Command::character_id(&take), character_id);
    }
}
