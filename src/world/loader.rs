//! Reading world files.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{StructureError, WorldError, WorldResult};
use crate::world::WorldDocument;

/// Sections a world must have, each a mapping.
pub const REQUIRED_SECTIONS: [&str; 3] = ["player", "rooms", "items"];

/// Sections whose entries are named records.
const ENTITY_SECTIONS: [&str; 3] = ["rooms", "items", "npc"];

/// Read a world file into an untyped document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not YAML.
pub fn read_value(path: &Path) -> WorldResult<Value> {
    let text = fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Load a world file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not YAML, or has the
/// wrong structure.
pub fn load_path(path: &Path) -> WorldResult<WorldDocument> {
    let document = from_value(read_value(path)?)?;
    tracing::info!(
        path = %path.display(),
        rooms = document.rooms.len(),
        items = document.items.len(),
        npc = document.npc.len(),
        "loaded world"
    );
    Ok(document)
}

/// Load a world from YAML text.
///
/// # Errors
///
/// Returns an error if the text is not YAML or has the wrong structure.
pub fn load_str(text: &str) -> WorldResult<WorldDocument> {
    from_value(serde_yaml::from_str(text)?)
}

/// Build a world from an untyped document.
///
/// # Errors
///
/// Returns an error if the structure check fails or a record has fields of
/// the wrong type.
pub fn from_value(mut value: Value) -> WorldResult<WorldDocument> {
    check_structure(&value)?;

    // A null `npc` section means no NPCs.
    if let Some(mapping) = value.as_mapping_mut()
        && mapping.get("npc").is_some_and(Value::is_null)
    {
        mapping.remove("npc");
    }

    Ok(serde_yaml::from_value(value)?)
}

/// Check the shape of a world document.
///
/// `player`, `rooms` and `items` must be mappings; `npc` may be absent or
/// null, otherwise it must be a mapping too. Every room, item and NPC must
/// be a mapping with a string name.
///
/// # Errors
///
/// Returns the first structural problem found.
pub fn check_structure(value: &Value) -> Result<(), StructureError> {
    let document = value.as_mapping().ok_or(StructureError::NotAMapping)?;

    for section in REQUIRED_SECTIONS {
        match document.get(section) {
            None => return Err(StructureError::MissingSection(section)),
            Some(v) if !v.is_mapping() => {
                return Err(StructureError::SectionNotAMapping(section));
            }
            Some(_) => {}
        }
    }

    for section in ENTITY_SECTIONS {
        match document.get(section) {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(entries)) => check_entries(section, entries)?,
            Some(_) => return Err(StructureError::SectionNotAMapping(section)),
        }
    }

    Ok(())
}

fn check_entries(section: &'static str, entries: &Mapping) -> Result<(), StructureError> {
    for (key, entry) in entries {
        let Some(name) = key.as_str() else {
            return Err(StructureError::EntryName {
                section,
                name: format!("{key:?}"),
            });
        };
        if !entry.is_mapping() {
            return Err(StructureError::EntryNotAMapping {
                section,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimap::{Minimap, TraversalOrder};
    use crate::world::{Direction, Exit};

    const WORLD: &str = "
player:
  position:
    location: Foyer
  inventory: []
  stats:
    health: 10
rooms:
  Foyer:
    messages: [Welcome.]
    paths:
      right: Hall
      up: null
  Hall:
    paths:
      left: Foyer
items:
  lamp:
    description: A brass lamp.
    damage: 1
npc:
  goblin:
    health: 5
    attack: 2
    points: 10
";

    #[test]
    fn test_load_str() {
        let doc = load_str(WORLD).unwrap();
        assert_eq!(doc.player.location(), Some("Foyer"));
        assert_eq!(doc.rooms.len(), 2);
        assert_eq!(doc.rooms["Foyer"].exit(Direction::Right), Exit::To("Hall"));
        assert_eq!(doc.rooms["Foyer"].exit(Direction::Up), Exit::Nothing);
        assert_eq!(
            doc.items["lamp"].description.as_ref().and_then(Value::as_str),
            Some("A brass lamp.")
        );
        assert_eq!(doc.npc.len(), 1);
    }

    #[test]
    fn test_missing_rooms_aborts() {
        let err = load_str("player: {}\nitems: {}\n").unwrap_err();
        assert!(matches!(
            err,
            WorldError::Structure(StructureError::MissingSection("rooms"))
        ));
    }

    #[test]
    fn test_items_not_a_mapping_aborts() {
        let err = load_str("player: {}\nrooms: {}\nitems: [lamp]\n").unwrap_err();
        assert!(matches!(
            err,
            WorldError::Structure(StructureError::SectionNotAMapping("items"))
        ));
    }

    #[test]
    fn test_room_entry_not_a_mapping_aborts() {
        let err = load_str("player: {}\nrooms:\n  Foyer: 3\nitems: {}\n").unwrap_err();
        assert!(matches!(
            err,
            WorldError::Structure(StructureError::EntryNotAMapping { section: "rooms", .. })
        ));
    }

    #[test]
    fn test_null_npc_section_is_empty() {
        let doc = load_str("player: {}\nrooms: {}\nitems: {}\nnpc: null\n").unwrap();
        assert!(doc.npc.is_empty());

        let doc = load_str("player: {}\nrooms: {}\nitems: {}\n").unwrap();
        assert!(doc.npc.is_empty());
    }

    #[test]
    fn test_not_a_mapping() {
        assert_eq!(
            check_structure(&Value::from("hello")),
            Err(StructureError::NotAMapping)
        );
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = load_path(Path::new("/nonexistent/dork.yml")).unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }

    #[test]
    fn test_malformed_exit_loads_and_lays_out() {
        let text = "player: {position: {location: A}}
rooms:
  A: {paths: {right: B, up: 3}}
  B: {paths: {left: A}}
items: {}
";
        let doc = load_str(text).unwrap();
        assert!(matches!(doc.rooms["A"].exit(Direction::Up), Exit::Invalid(_)));

        let map = Minimap::build(&doc.rooms, &TraversalOrder::Sorted);
        assert_eq!(map.len(), 2);
        assert_eq!(map.edges().collect::<Vec<_>>(), vec![(0, 1)]);

        let report = crate::world::validate(&serde_yaml::from_str(text).unwrap()).unwrap();
        assert!(report
            .findings
            .iter()
            .any(|f| f.to_string() == "Going up from A will lead to an error."));
    }

    #[test]
    fn test_non_string_item_fields_load() {
        let doc = load_str(
            "player: {}\nrooms: {}\nitems:\n  lamp: {description: 42, damage: 1, holds: [oil]}\n",
        )
        .unwrap();
        assert_eq!(doc.items["lamp"].description, Some(Value::from(42_u64)));
        assert!(doc.to_yaml().unwrap().contains("description: 42"));
    }
}
