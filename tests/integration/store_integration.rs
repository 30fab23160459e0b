//! Treant state files on disk

use super::test_utils::{group, treant, workspace};
use arbor::store::parse_statefile_name;
use arbor::{Treant, TreantError, TreantInit};
use std::sync::Arc;

#[test]
fn test_state_file_layout() {
    let (_dir, ws) = workspace();
    let t = treant(&ws, "sprout");

    let file = t.statefile().path();
    assert_eq!(file.parent().unwrap(), t.path());
    let (treanttype, uuid) = parse_statefile_name(file).unwrap();
    assert_eq!(treanttype, "Treant");
    assert_eq!(uuid, t.uuid());

    let raw = std::fs::read_to_string(file).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(json["tags"].as_array().unwrap().is_empty());
}

#[test]
fn test_regenerate_keeps_identity_and_seeds() {
    let (_dir, ws) = workspace();
    let first = treant(&ws, "sprout");

    let again = Treant::init(
        first.path(),
        TreantInit::default().tag("green").category("height", 3),
    )
    .unwrap();
    assert_eq!(again, first);
    assert!(first.tags().contains("green").unwrap());

    let fresh =
        Treant::init(first.path().join("child"), TreantInit::default().force_new()).unwrap();
    assert_ne!(fresh.uuid(), first.uuid());
}

#[test]
fn test_open_ambiguous_and_missing() {
    let (dir, ws) = workspace();
    let t = treant(&ws, "twin");
    Treant::init(t.path(), TreantInit::default().force_new()).unwrap();

    assert!(matches!(
        Treant::open(t.path()),
        Err(TreantError::AmbiguousMember { count: 2, .. })
    ));
    assert!(Treant::open(t.statefile().path()).is_ok());
    assert!(matches!(
        Treant::open(dir.path().join("nowhere")),
        Err(TreantError::MemberNotFound(_))
    ));
}

#[test]
fn test_rename_keeps_uuid() {
    let (_dir, ws) = workspace();
    let mut t = treant(&ws, "sapling");
    t.tags().add(["young"]).unwrap();
    let uuid = t.uuid().to_string();

    t.rename("tree").unwrap();
    assert_eq!(t.name(), "tree");
    assert_eq!(t.uuid(), uuid);
    assert!(t.tags().contains("young").unwrap());
    assert_eq!(ws.discover("tree").unwrap().len(), 1);
    assert!(ws.discover("sapling").unwrap().is_empty());
}

#[test]
fn test_group_records_members_in_state() {
    let (_dir, ws) = workspace();
    let g = group(&ws, "grove");
    let oak = treant(&ws, "oak");
    g.members().unwrap().add(&oak).unwrap();

    let state = g.state().unwrap();
    assert_eq!(state.members.len(), 1);
    assert_eq!(state.members[0].uuid, oak.uuid());
    assert_eq!(state.members[0].treanttype, "Treant");

    let reopened = arbor::Group::open(g.statefile().path(), Arc::clone(&ws)).unwrap();
    assert_eq!(reopened, g);
}
