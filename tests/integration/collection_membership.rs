//! Adding, removing and indexing collection members

use super::test_utils::{bundle, group, treant, workspace};
use arbor::collection::Removable;
use arbor::{Collection, Member, TreantError};
use std::sync::Arc;

#[test]
fn test_add_members_nested_lists() {
    let (_dir, ws) = workspace();
    let lark = treant(&ws, "lark");
    let hark = treant(&ws, "hark");
    let linus = group(&ws, "linus");

    let mut c = bundle(&ws);
    c.add(vec![Member::from(&lark)]).unwrap();
    c.add(vec![Member::from(&linus), Member::from(&hark)]).unwrap();

    for m in [Member::from(&lark), Member::from(&hark), Member::from(&linus)] {
        assert!(c.contains(&m));
    }

    let snoopy = treant(&ws, "snoopy");
    c.add(vec![vec![Member::from(&snoopy)], vec![Member::from(&hark)]])
        .unwrap();
    assert!(c.contains(&Member::from(&snoopy)));
    // ordered set: hark was already present
    assert_eq!(c.len(), 4);
    assert_eq!(c.names(), vec!["lark", "linus", "hark", "snoopy"]);
}

#[test]
fn test_add_members_glob() {
    let (_dir, ws) = workspace();
    let lark = treant(&ws, "lark");
    let hark = treant(&ws, "hark");
    let linus = group(&ws, "linus");

    let mut c = bundle(&ws);
    c.add("*ark").unwrap();

    assert!(c.contains(&Member::from(&lark)));
    assert!(c.contains(&Member::from(&hark)));
    assert!(!c.contains(&Member::from(&linus)));
    assert_eq!(c.len(), 2);
}

#[test]
fn test_add_pattern_matching_nothing_is_not_an_error() {
    let (_dir, ws) = workspace();
    treant(&ws, "lark");

    let mut c = bundle(&ws);
    c.add("zebra*").unwrap();
    c.add("zebra").unwrap();
    assert!(c.is_empty());
}

#[test]
fn test_add_invalid_glob_is_invalid_argument() {
    let (_dir, ws) = workspace();
    let mut c = bundle(&ws);
    assert!(matches!(c.add("[oops"), Err(TreantError::InvalidArgument(_))));
}

#[test]
fn test_get_members_by_index_and_slice() {
    let (_dir, ws) = workspace();
    let larry = treant(&ws, "larry");
    let curly = group(&ws, "curly");
    let moe = treant(&ws, "moe");

    let mut c = bundle(&ws);
    c.add(vec![vec![vec![Member::from(&larry)], vec![Member::from(&curly), Member::from(&moe)]]])
        .unwrap();
    assert_eq!(c[1], curly);

    let shemp = treant(&ws, "shemp");
    c.add(&shemp).unwrap();

    let head = c.slice(..3);
    for m in [Member::from(&larry), Member::from(&curly), Member::from(&moe)] {
        assert!(head.contains(&m));
    }
    assert!(!head.contains(&Member::from(&shemp)));
    assert_eq!(*c.get(-1).unwrap(), shemp);
}

#[test]
fn test_select_by_name_and_uuid() {
    let (_dir, ws) = workspace();
    let a = treant(&ws, "a");
    let b = treant(&ws, "b");
    let c_ = treant(&ws, "c");
    let c = Collection::from_members(Arc::clone(&ws), vec![&a, &b, &c_]);

    assert!(c.contains_name("b"));
    assert!(c.contains_uuid(b.uuid()));
    assert!(!c.contains_name("d"));

    let picked = c.select(&["c", a.uuid()]);
    assert_eq!(picked.names(), vec!["a", "c"]);
}

#[test]
fn test_remove_members_by_index_and_value() {
    let (_dir, ws) = workspace();
    let lion_o = group(&ws, "lion-o");
    let cheetara = treant(&ws, "cheetara");
    let snarf = treant(&ws, "snarf");

    let mut c = bundle(&ws);
    c.add(vec![Member::from(&snarf), Member::from(&lion_o), Member::from(&cheetara)])
        .unwrap();

    c.remove(1).unwrap();
    assert!(!c.contains(&Member::from(&lion_o)));

    c.remove(&cheetara).unwrap();
    assert!(!c.contains(&Member::from(&cheetara)));
    assert_eq!(c.names(), vec!["snarf"]);
}

#[test]
fn test_remove_members_by_name_and_glob() {
    let (_dir, ws) = workspace();
    let t1 = treant(&ws, "lark");
    let t2 = treant(&ws, "elsewhere/lark");
    let t3 = treant(&ws, "hark");
    let g = group(&ws, "linus");
    let stuff = vec![
        Member::from(&t1),
        Member::from(&t2),
        Member::from(&t3),
        Member::from(&g),
    ];

    let mut c = bundle(&ws);
    c.add(stuff.clone()).unwrap();
    assert_eq!(c.len(), 4);

    // both Treants named 'lark' go
    c.remove("lark").unwrap();
    assert_eq!(c.names(), vec!["hark", "linus"]);

    c.add(stuff.clone()).unwrap();
    c.remove("*ark").unwrap();
    assert_eq!(c.names(), vec!["linus"]);
}

#[test]
fn test_remove_several_indices_in_one_call() {
    let (_dir, ws) = workspace();
    let mut c = bundle(&ws);
    for name in ["a", "b", "c", "d"] {
        c.add(treant(&ws, name)).unwrap();
    }

    c.remove(vec![Removable::Index(2), Removable::Index(0)]).unwrap();
    assert_eq!(c.names(), vec!["b", "d"]);
}

#[test]
fn test_member_attributes() {
    let (_dir, ws) = workspace();
    let bigger = treant(&ws, "bigger");
    let faster = group(&ws, "faster");
    let stronger = treant(&ws, "stronger");

    let mut c = bundle(&ws);
    c.add(vec![Member::from(&bigger), Member::from(&faster), Member::from(&stronger)])
        .unwrap();

    assert_eq!(c.uuids(), vec![bigger.uuid(), faster.uuid(), stronger.uuid()]);
    assert_eq!(c.names(), vec!["bigger", "faster", "stronger"]);
    assert_eq!(c.treanttypes(), vec!["Treant", "Group", "Treant"]);
}

#[test]
fn test_set_algebra() {
    let (_dir, ws) = workspace();
    let a = treant(&ws, "a");
    let b = treant(&ws, "b");
    let c_ = treant(&ws, "c");

    let left = Collection::from_members(Arc::clone(&ws), vec![&a, &b]);
    let right = Collection::from_members(Arc::clone(&ws), vec![&b, &c_]);

    assert_eq!(left.union(&right).names(), vec!["a", "b", "c"]);
    assert_eq!((&left + &right).names(), vec!["a", "b", "c"]);
    assert_eq!(left.intersection(&right).names(), vec!["b"]);
    assert_eq!(left.difference(&right).names(), vec!["a"]);
    assert_eq!(left.symmetric_difference(&right).names(), vec!["a", "c"]);
    assert!(left.intersection(&right).is_subset(&left));
    assert!(left.union(&right).is_superset(&right));
    assert_eq!((&left + &Member::from(&c_)).len(), 3);
    assert_eq!((&left + &Member::from(&a)).len(), 2);
}

#[test]
fn test_group_members_persist_across_handles() {
    let (_dir, ws) = workspace();
    let g = group(&ws, "grove");
    let oak = treant(&ws, "oak");
    let elm = treant(&ws, "elm");

    g.members().unwrap().add(vec![&oak, &elm]).unwrap();

    let reopened = arbor::Group::open(g.path(), Arc::clone(&ws)).unwrap();
    assert_eq!(reopened.members().unwrap().names(), vec!["oak", "elm"]);

    reopened.members().unwrap().remove(0).unwrap();
    assert_eq!(g.members().unwrap().names(), vec!["elm"]);
}

#[test]
fn test_group_member_survives_relocation() {
    let (dir, ws) = workspace();
    let g = group(&ws, "grove");
    let mut oak = treant(&ws, "oak");
    g.members().unwrap().add(&oak).unwrap();

    std::fs::create_dir_all(dir.path().join("moved")).unwrap();
    oak.relocate(ws.root().join("moved")).unwrap();

    let members = g.members().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].path(), oak.path());
}
