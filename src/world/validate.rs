//! Referential integrity checks for world documents.
//!
//! Structural problems (a missing or malformed section) abort with a
//! [`StructureError`]. Everything else is a soft [`Finding`]: collected into
//! a [`Report`], never fatal.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::StructureError;
use crate::world::item::{HOLDS, ITEM_FIELDS};
use crate::world::loader::check_structure;
use crate::world::npc::NPC_FIELDS;
use crate::world::Direction;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Describes the world; nothing to fix.
    Info,
    /// Something is missing but the game still works.
    Warning,
    /// A reference points nowhere; the game will misbehave.
    Error,
}

/// One line of a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// An exit leads to an existing room.
    Link {
        /// Room holding the exit.
        room: String,
        /// Exit direction.
        direction: Direction,
        /// Destination room.
        target: String,
    },
    /// An exit is present but null.
    NoExit {
        /// Room holding the exit.
        room: String,
        /// Exit direction.
        direction: Direction,
    },
    /// A room's `paths` lacks a direction key.
    MissingDirection {
        /// Room missing the key.
        room: String,
        /// Missing direction.
        direction: Direction,
    },
    /// A room has no `paths` mapping at all.
    MissingPaths {
        /// Room missing its paths.
        room: String,
    },
    /// An exit names a room that does not exist.
    Dangling {
        /// Room holding the exit.
        room: String,
        /// Exit direction.
        direction: Direction,
    },
    /// An item or NPC lacks a field.
    MissingField {
        /// Item or NPC name.
        name: String,
        /// Missing field.
        field: &'static str,
    },
    /// An item or NPC field is null.
    NullField {
        /// Item or NPC name.
        name: String,
        /// Null field.
        field: &'static str,
    },
    /// An item's `holds` is null.
    HoldsNothing {
        /// Item name.
        name: String,
    },
    /// An item holds something.
    Holds {
        /// Item name.
        name: String,
        /// What it holds.
        other: String,
    },
    /// The player starts in a room that does not exist.
    UnknownLocation {
        /// The location named by the player record.
        location: String,
    },
    /// The player record names no location.
    NoLocation,
}

impl Finding {
    /// Severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Finding::Link { .. }
            | Finding::NoExit { .. }
            | Finding::HoldsNothing { .. }
            | Finding::Holds { .. } => Severity::Info,
            Finding::MissingDirection { .. }
            | Finding::MissingPaths { .. }
            | Finding::MissingField { .. }
            | Finding::NullField { .. } => Severity::Warning,
            Finding::Dangling { .. } | Finding::UnknownLocation { .. } | Finding::NoLocation => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Link {
                room,
                direction,
                target,
            } => write!(f, "{target} is {direction} of {room}."),
            Finding::NoExit { room, direction } => {
                write!(f, "There is nothing {direction} of {room}.")
            }
            Finding::MissingDirection { room, direction } => {
                write!(f, "{room} does not have {direction} as a key.")
            }
            Finding::MissingPaths { room } => write!(f, "{room} does not have paths as a key."),
            Finding::Dangling { room, direction } => {
                write!(f, "Going {direction} from {room} will lead to an error.")
            }
            Finding::MissingField { name, field } => {
                write!(f, "{name} does not have {field} as a key.")
            }
            Finding::NullField { name, field } => write!(f, "{name} has no {field}."),
            Finding::HoldsNothing { name } => write!(f, "There are no items in {name}."),
            Finding::Holds { name, other } => write!(f, "{other} is in {name}."),
            Finding::UnknownLocation { location } => {
                write!(f, "The player starts in {location}, which is not a room.")
            }
            Finding::NoLocation => write!(f, "The player has no starting location."),
        }
    }
}

/// All findings for a world, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Findings, rooms first, then items, NPCs and the player.
    pub findings: Vec<Finding>,
}

impl Report {
    /// Findings at or above a severity.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.severity() >= severity)
    }

    /// Number of findings with exactly this severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity() == severity)
            .count()
    }

    /// Check if any finding is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// Validate an untyped world document.
///
/// # Errors
///
/// Returns a [`StructureError`] if the document cannot be checked at all.
pub fn validate(document: &Value) -> Result<Report, StructureError> {
    check_structure(document)?;

    let mut report = Report::default();
    let section = |name: &str| document.get(name).and_then(Value::as_mapping);

    if let Some(rooms) = section("rooms") {
        for (name, room) in rooms {
            if let Some(name) = name.as_str() {
                check_room(rooms, name, room, &mut report.findings);
            }
        }
    }

    for (key, fields) in [("items", &ITEM_FIELDS[..]), ("npc", &NPC_FIELDS[..])] {
        if let Some(entries) = section(key) {
            for (name, entry) in entries {
                if let Some(name) = name.as_str() {
                    check_fields(name, entry, fields, &mut report.findings);
                    if key == "items" {
                        check_holds(name, entry, &mut report.findings);
                    }
                }
            }
        }
    }

    let location = document
        .get("player")
        .and_then(|p| p.get("position"))
        .and_then(|p| p.get("location"))
        .and_then(Value::as_str);
    match location {
        None => report.findings.push(Finding::NoLocation),
        Some(location) if !section("rooms").is_some_and(|r| r.contains_key(location)) => {
            report.findings.push(Finding::UnknownLocation {
                location: location.to_string(),
            });
        }
        Some(_) => {}
    }

    for finding in report.at_least(Severity::Error) {
        tracing::warn!("{finding}");
    }

    Ok(report)
}

fn check_room(rooms: &Mapping, name: &str, room: &Value, findings: &mut Vec<Finding>) {
    let Some(paths) = room.get("paths").and_then(Value::as_mapping) else {
        findings.push(Finding::MissingPaths {
            room: name.to_string(),
        });
        return;
    };

    for direction in Direction::ALL {
        let room = name.to_string();
        let finding = match paths.get(direction.key()) {
            None => Finding::MissingDirection { room, direction },
            Some(Value::Null) => Finding::NoExit { room, direction },
            Some(Value::String(target)) if rooms.contains_key(target.as_str()) => {
                Finding::Link {
                    room,
                    direction,
                    target: target.clone(),
                }
            }
            Some(_) => Finding::Dangling { room, direction },
        };
        findings.push(finding);
    }
}

fn check_fields(name: &str, entry: &Value, fields: &[&'static str], findings: &mut Vec<Finding>) {
    for &field in fields {
        match entry.get(field) {
            None => findings.push(Finding::MissingField {
                name: name.to_string(),
                field,
            }),
            Some(Value::Null) => findings.push(Finding::NullField {
                name: name.to_string(),
                field,
            }),
            Some(_) => {}
        }
    }
}

fn check_holds(name: &str, item: &Value, findings: &mut Vec<Finding>) {
    let contents = match item.get(HOLDS) {
        None => {
            findings.push(Finding::MissingField {
                name: name.to_string(),
                field: HOLDS,
            });
            return;
        }
        Some(Value::Sequence(contents)) => contents.iter().collect(),
        Some(Value::Null) => Vec::new(),
        Some(other) => vec![other],
    };

    if contents.is_empty() {
        findings.push(Finding::HoldsNothing {
            name: name.to_string(),
        });
    }
    for other in contents {
        findings.push(Finding::Holds {
            name: name.to_string(),
            other: scalar_text(other),
        });
    }
}

/// Short text for a value named in a report line.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(yaml: &str) -> Report {
        validate(&serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    fn lines(report: &Report) -> Vec<String> {
        report.findings.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_dangling_exit_is_reported() {
        let report = report(
            "player: {position: {location: A}}\nrooms:\n  A:\n    paths: {right: Ghost}\nitems: {}\n",
        );
        let lines = lines(&report);
        assert!(lines.contains(&"Going right from A will lead to an error.".to_string()));
        assert!(report.has_errors());
    }

    #[test]
    fn test_link_null_and_missing() {
        let report = report(
            "player: {position: {location: A}}
rooms:
  A:
    paths: {right: B, up: null}
  B:
    paths: {left: A}
items: {}
",
        );
        let lines = lines(&report);
        assert!(lines.contains(&"B is right of A.".to_string()));
        assert!(lines.contains(&"There is nothing up of A.".to_string()));
        assert!(lines.contains(&"A does not have north as a key.".to_string()));
        assert!(!report.has_errors());
        // Eight directions per room.
        assert_eq!(report.findings.len(), 16);
    }

    #[test]
    fn test_missing_paths() {
        let report = report("player: {position: {location: A}}\nrooms:\n  A: {}\nitems: {}\n");
        assert_eq!(
            report.findings,
            vec![Finding::MissingPaths {
                room: "A".to_string()
            }]
        );
    }

    #[test]
    fn test_item_and_npc_fields() {
        let report = report(
            "player: {position: {location: A}}
rooms:
  A: {paths: {}}
items:
  lamp: {description: null}
npc:
  goblin: {health: 3, attack: 1, points: 5}
",
        );
        let lines = lines(&report);
        assert!(lines.contains(&"lamp has no description.".to_string()));
        assert!(lines.contains(&"lamp does not have damage as a key.".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("goblin")));
    }

    #[test]
    fn test_item_holds() {
        let report = report(
            "player: {position: {location: A}}
rooms:
  A: {paths: {}}
items:
  chest: {description: Oak, damage: 0, holds: [coin, map]}
  jar: {description: Glass, damage: 0, holds: null}
  rock: {description: Grey, damage: 2}
  box: {description: Tin, damage: 0, holds: key}
",
        );
        let lines = lines(&report);
        assert!(lines.contains(&"coin is in chest.".to_string()));
        assert!(lines.contains(&"map is in chest.".to_string()));
        assert!(lines.contains(&"There are no items in jar.".to_string()));
        assert!(lines.contains(&"rock does not have holds as a key.".to_string()));
        assert!(lines.contains(&"key is in box.".to_string()));
        assert_eq!(report.count(Severity::Warning), 1);
    }

    #[test]
    fn test_npcs_are_not_containers() {
        let report = report(
            "player: {position: {location: A}}
rooms:
  A: {paths: {}}
items: {}
npc:
  goblin: {health: 3, attack: 1, points: 5}
",
        );
        assert!(report.findings.iter().all(|f| !matches!(
            f,
            Finding::MissingField { field: "holds", .. } | Finding::HoldsNothing { .. }
        )));
    }

    #[test]
    fn test_player_location_checks() {
        let unknown = report("player: {position: {location: Nowhere}}\nrooms: {}\nitems: {}\n");
        assert_eq!(
            unknown.findings,
            vec![Finding::UnknownLocation {
                location: "Nowhere".to_string()
            }]
        );

        let none = report("player: {}\nrooms: {}\nitems: {}\n");
        assert_eq!(none.findings, vec![Finding::NoLocation]);
    }

    #[test]
    fn test_structure_error_aborts() {
        let value: Value = serde_yaml::from_str("player: {}\nitems: {}\n").unwrap();
        assert_eq!(
            validate(&value),
            Err(StructureError::MissingSection("rooms"))
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
