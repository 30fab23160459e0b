//! Partitioning collections by category values

use super::test_utils::{bundle, treant, workspace};
use arbor::{CategoryValue, Collection, Member, Treant};
use std::collections::{BTreeMap, BTreeSet};
use tempfile::TempDir;

struct Forest {
    _dir: TempDir,
    maple: Treant,
    sequoia: Treant,
    elm: Treant,
    oak: Treant,
    all: Collection,
}

fn forest() -> Forest {
    let (dir, ws) = workspace();
    let maple = treant(&ws, "maple");
    let sequoia = treant(&ws, "sequoia");
    let elm = treant(&ws, "elm");
    let oak = treant(&ws, "oak");

    maple
        .categories()
        .add([("age", "young"), ("bark", "smooth"), ("type", "deciduous")])
        .unwrap();
    sequoia
        .categories()
        .add([
            ("age", "adult"),
            ("bark", "fibrous"),
            ("type", "evergreen"),
            ("nickname", "redwood"),
        ])
        .unwrap();
    elm.categories()
        .add([("age", "old"), ("bark", "mossy"), ("type", "deciduous"), ("health", "poor")])
        .unwrap();
    oak.categories()
        .add([("age", "young"), ("bark", "mossy"), ("type", "deciduous"), ("health", "good")])
        .unwrap();

    let mut all = bundle(&ws);
    all.add(vec![&maple, &sequoia, &elm, &oak]).unwrap();
    Forest {
        _dir: dir,
        maple,
        sequoia,
        elm,
        oak,
        all,
    }
}

fn uuids(c: &Collection) -> BTreeSet<String> {
    c.uuids().into_iter().collect()
}

fn of(treants: &[&Treant]) -> BTreeSet<String> {
    treants.iter().map(|t| t.uuid().to_string()).collect()
}

fn key(values: &[&str]) -> Vec<CategoryValue> {
    values.iter().map(|v| CategoryValue::from(*v)).collect()
}

#[test]
fn test_groupby_single_key() {
    let f = forest();
    let cats = f.all.categories();

    let age = cats.groupby("age").unwrap();
    assert_eq!(age.len(), 3);
    assert_eq!(uuids(&age[&CategoryValue::from("young")]), of(&[&f.maple, &f.oak]));
    assert_eq!(uuids(&age[&CategoryValue::from("adult")]), of(&[&f.sequoia]));
    assert_eq!(uuids(&age[&CategoryValue::from("old")]), of(&[&f.elm]));

    let bark = cats.groupby("bark").unwrap();
    assert_eq!(uuids(&bark[&CategoryValue::from("mossy")]), of(&[&f.elm, &f.oak]));

    // members lacking the key are left out
    let nick = cats.groupby("nickname").unwrap();
    assert_eq!(nick.len(), 1);
    assert_eq!(uuids(&nick[&CategoryValue::from("redwood")]), of(&[&f.sequoia]));

    let health = cats.groupby("health").unwrap();
    let grouped: BTreeSet<String> = health.values().flat_map(uuids).collect();
    assert_eq!(grouped, of(&[&f.elm, &f.oak]));
}

#[test]
fn test_groupby_key_list_follows_input_order() {
    let f = forest();
    let cats = f.all.categories();

    let age_bark = cats.groupby_keys(&["age", "bark"]).unwrap();
    assert_eq!(age_bark.len(), 4);
    assert_eq!(uuids(&age_bark[&key(&["young", "smooth"])]), of(&[&f.maple]));
    assert_eq!(uuids(&age_bark[&key(&["young", "mossy"])]), of(&[&f.oak]));

    let type_health = cats.groupby_keys(&["type", "health"]).unwrap();
    assert_eq!(type_health.len(), 2);
    assert_eq!(uuids(&type_health[&key(&["deciduous", "poor"])]), of(&[&f.elm]));
    assert!(!type_health.contains_key(&key(&["poor", "deciduous"])));

    let health_type = cats.groupby_keys(&["health", "type"]).unwrap();
    assert_eq!(uuids(&health_type[&key(&["poor", "deciduous"])]), of(&[&f.elm]));
    assert_eq!(uuids(&health_type[&key(&["good", "deciduous"])]), of(&[&f.oak]));
    assert!(!health_type.contains_key(&key(&["deciduous", "poor"])));

    let abtn = cats
        .groupby_keys(&["bark", "nickname", "type", "age"])
        .unwrap();
    assert_eq!(abtn.len(), 1);
    assert_eq!(
        uuids(&abtn[&key(&["fibrous", "redwood", "evergreen", "adult"])]),
        of(&[&f.sequoia])
    );

    let none = cats.groupby_keys(&["health", "nickname"]).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_groupby_set_uses_sorted_keys() {
    let f = forest();
    let keys: BTreeSet<String> = ["nickname", "age", "type", "bark"]
        .iter()
        .map(|k| k.to_string())
        .collect();

    let grouped = f.all.categories().groupby_set(&keys).unwrap();
    assert_eq!(grouped.len(), 1);
    // age, bark, nickname, type
    let only = &grouped[&key(&["adult", "fibrous", "redwood", "evergreen"])];
    assert_eq!(only.names(), vec!["sequoia"]);

    let again = f.all.categories().groupby_set(&keys).unwrap();
    assert_eq!(
        again.keys().collect::<Vec<_>>(),
        grouped.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_groupby_distinguishes_value_types() {
    let (_dir, ws) = workspace();
    let a = treant(&ws, "a");
    let b = treant(&ws, "b");
    let c_ = treant(&ws, "c");
    a.categories().set("size", 1).unwrap();
    b.categories().set("size", 1.0).unwrap();
    c_.categories().set("size", "1").unwrap();

    let mut c = bundle(&ws);
    c.add(vec![&a, &b, &c_]).unwrap();

    let groups: BTreeMap<CategoryValue, Collection> = c.categories().groupby("size").unwrap();
    assert_eq!(groups.len(), 3);
    assert!(groups[&CategoryValue::Int(1)].contains(&Member::from(&a)));
}
