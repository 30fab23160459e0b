//! Flattening nested and self-containing Groups

use super::test_utils::{bundle, group, treant, workspace};
use arbor::Member;

#[test]
fn test_flatten_self_containing_group() {
    let (_dir, ws) = workspace();
    let names = ["lark", "mark", "bark"];
    let bork = group(&ws, "bork");
    for name in names {
        treant(&ws, name);
    }

    bork.members()
        .unwrap()
        .add(vec!["bork", "lark", "mark", "bark"])
        .unwrap();
    assert!(bork.members().unwrap().contains(&Member::from(&bork)));

    let mut c = bundle(&ws);
    c.add(&bork).unwrap();
    assert_eq!(c.len(), 1);

    let flat = c.flatten().unwrap();
    assert!(!flat.contains(&Member::from(&bork)));
    assert!(flat.iter().all(|m| !m.is_group()));
    assert_eq!(flat.len(), 3);
    for name in names {
        assert!(flat.contains_name(name));
    }

    assert_eq!(c.flatten_excluding([bork.uuid()]).unwrap().len(), 0);

    c.add("mark").unwrap();
    let flat = c.flatten_excluding([bork.uuid()]).unwrap();
    assert_eq!(flat.names(), vec!["mark"]);
}

#[test]
fn test_flatten_mutual_cycle_and_shared_leaves() {
    let (_dir, ws) = workspace();
    let north = group(&ws, "north");
    let south = group(&ws, "south");
    let fir = treant(&ws, "fir");
    let ash = treant(&ws, "ash");

    north
        .members()
        .unwrap()
        .add(vec![Member::from(&south), Member::from(&fir)])
        .unwrap();
    south
        .members()
        .unwrap()
        .add(vec![
            Member::from(&north),
            Member::from(&fir),
            Member::from(&ash),
        ])
        .unwrap();

    let mut c = bundle(&ws);
    c.add(vec![Member::from(&north), Member::from(&fir)]).unwrap();

    let flat = c.flatten().unwrap();
    assert_eq!(flat.names(), vec!["fir", "ash"]);
}

#[test]
fn test_flatten_keeps_plain_treants_and_returns_fresh_bundle() {
    let (_dir, ws) = workspace();
    let g = group(&ws, "g");
    let g_members = g.members().unwrap();
    assert!(g_members.is_group_members());

    let flat = g_members.flatten().unwrap();
    assert!(flat.is_empty());
    assert!(!flat.is_group_members());
}
