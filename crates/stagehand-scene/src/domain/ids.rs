//! Strongly typed identifiers for authored graph entities.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! graph_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

graph_id!(
    /// Identifier of a [`Scene`](crate::Scene).
    SceneId
);

graph_id!(
    /// Identifier of a [`SceneConnection`](crate::SceneConnection).
    ConnectionId
);

graph_id!(
    /// Identifier of a [`SceneActionGroup`](crate::SceneActionGroup).
    SceneActionGroupId
);
