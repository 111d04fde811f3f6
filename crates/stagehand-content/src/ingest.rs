//! Turning authored YAML into a playable scene graph.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};
use stagehand_core::error::DomainError;
use stagehand_scene::{ConnectionId, InMemorySceneGraph, SceneConnection};
use tracing::{info, instrument, warn};

use crate::document::ContentDocument;

/// A validated scene graph and the version of the source it came from.
#[derive(Debug, Clone)]
pub struct ContentGraph {
    pub graph: InMemorySceneGraph,
    /// Hex SHA-256 of the source text.
    pub version_hash: String,
}

/// Parses and validates an authored scene graph.
///
/// Every problem found is reported, not just the first, joined with `; `.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the YAML is malformed, scene ids
/// repeat, there is not exactly one default scene, a connection points at a
/// missing scene, an action group lists a connection that does not belong to
/// its scene or that another group of the scene already lists, or a gating
/// expression does not parse.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn ingest(source: &str) -> Result<ContentGraph, DomainError> {
    let document: ContentDocument = serde_yaml::from_str(source)
        .map_err(|e| DomainError::Validation(format!("malformed content: {e}")))?;

    let mut problems = Vec::new();
    let graph = build_graph(&document, &mut problems);
    check_action_groups(&document, &mut problems);
    check_expressions(&document.connections, &mut problems);

    if !problems.is_empty() {
        warn!(problems = problems.len(), "content rejected");
        return Err(DomainError::Validation(problems.join("; ")));
    }

    let version_hash = format!("{:x}", Sha256::digest(source.as_bytes()));
    info!(
        scenes = graph.scene_count(),
        connections = graph.connection_count(),
        version = %version_hash,
        "content ingested"
    );
    Ok(ContentGraph {
        graph,
        version_hash,
    })
}

fn build_graph(document: &ContentDocument, problems: &mut Vec<String>) -> InMemorySceneGraph {
    let defaults = document.scenes.iter().filter(|s| s.is_default).count();
    match defaults {
        1 => {}
        0 => problems.push("no default scene".to_owned()),
        n => problems.push(format!("{n} default scenes, expected exactly one")),
    }

    let mut graph = InMemorySceneGraph::new();
    for scene in &document.scenes {
        // A surplus default is already reported above.
        if let Err(e) = graph.add_scene(scene.clone()) {
            if defaults <= 1 || !scene.is_default {
                problems.push(validation_message(e));
            }
        }
    }
    for connection in &document.connections {
        if let Err(e) = graph.add_connection(connection.clone()) {
            problems.push(validation_message(e));
        }
    }
    graph
}

fn check_action_groups(document: &ContentDocument, problems: &mut Vec<String>) {
    let connections: HashMap<ConnectionId, &SceneConnection> =
        document.connections.iter().map(|c| (c.id, c)).collect();

    for scene in &document.scenes {
        let mut group_ids = HashSet::new();
        let mut grouped = HashSet::new();
        for group in &scene.action_groups {
            if !group_ids.insert(group.id) {
                problems.push(format!(
                    "scene {} has duplicate action group id {}",
                    scene.id, group.id
                ));
            }
            for connection_id in &group.connections {
                match connections.get(connection_id) {
                    None => problems.push(format!(
                        "action group {} of scene {} lists unknown connection {connection_id}",
                        group.id, scene.id
                    )),
                    Some(connection) if !connection.touches(scene.id) => {
                        problems.push(format!(
                            "action group {} of scene {} lists connection {connection_id}, \
                             which does not touch the scene",
                            group.id, scene.id
                        ));
                    }
                    Some(_) => {}
                }
                if !grouped.insert(*connection_id) {
                    problems.push(format!(
                        "connection {connection_id} is listed more than once in the action \
                         groups of scene {}",
                        scene.id
                    ));
                }
            }
        }
    }
}

fn check_expressions(connections: &[SceneConnection], problems: &mut Vec<String>) {
    for connection in connections {
        for (side_name, side) in [("forward", &connection.forward), ("reverse", &connection.reverse)] {
            let Some(expression) = side.expression.as_deref() else {
                continue;
            };
            if expression.trim().is_empty() {
                continue;
            }
            if let Err(e) = stagehand_expression::parse(expression) {
                problems.push(format!(
                    "connection {} {side_name} expression `{expression}`: {e}",
                    connection.id
                ));
            }
        }
    }
}

fn validation_message(error: DomainError) -> String {
    match error {
        DomainError::Validation(message) => message,
        other => other.to_string(),
    }
}
