//! Collection membership and aggregation properties

use arbor::collection::Removable;
use arbor::{CategoryValue, Collection, Treant, Workspace};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;

fn pool(size: usize) -> (TempDir, Arc<Workspace>, Vec<Treant>) {
    let temp_dir = TempDir::new().unwrap();
    let ws = Arc::new(Workspace::new(temp_dir.path()));
    let treants = (0..size)
        .map(|i| ws.treant(&format!("t{}", i)).unwrap())
        .collect();
    (temp_dir, ws, treants)
}

/// Adding any sequence of members never produces duplicates, and adding a
/// member twice grows the collection by at most one.
#[test]
fn test_add_is_idempotent_property() {
    let (_dir, ws, treants) = pool(6);
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(48));

    runner
        .run(&proptest::collection::vec(0usize..6, 0..20), |picks| {
            let mut c = ws.bundle();
            for &i in &picks {
                let before = c.len();
                c.add(&treants[i]).unwrap();
                c.add(&treants[i]).unwrap();
                prop_assert!(c.len() <= before + 1);
                prop_assert!(c.contains_uuid(treants[i].uuid()));
            }

            let distinct: BTreeSet<usize> = picks.iter().copied().collect();
            prop_assert_eq!(c.len(), distinct.len());
            let uuids: BTreeSet<String> = c.uuids().into_iter().collect();
            prop_assert_eq!(uuids.len(), c.len());
            Ok(())
        })
        .unwrap();
}

/// Removing several indices in one call removes exactly the members at those
/// positions at call time, whatever order the indices are given in.
#[test]
fn test_multi_index_remove_property() {
    let (_dir, ws, treants) = pool(8);
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(48));

    let strategy = (1usize..=8).prop_flat_map(|len| {
        (
            Just(len),
            proptest::collection::vec(0..len, 0..len).prop_shuffle(),
        )
    });

    runner
        .run(&strategy, |(len, indices)| {
            let mut c = Collection::from_members(Arc::clone(&ws), &treants[..len]);
            let names = c.names();

            let removable: Vec<Removable> = indices.iter().map(|&i| Removable::from(i)).collect();
            c.remove(removable).unwrap();

            let targets: BTreeSet<usize> = indices.into_iter().collect();
            let expected: Vec<String> = names
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !targets.contains(i))
                .map(|(_, n)| n)
                .collect();
            prop_assert_eq!(c.names(), expected);
            Ok(())
        })
        .unwrap();
}

/// The `all` keys are exactly the keys whose `any` value list has no gaps.
#[test]
fn test_all_keys_match_gapless_any_keys_property() {
    let (_dir, ws, treants) = pool(4);
    let keys = ["age", "bark", "kind"];
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    // for each member, which of the three keys it carries
    let strategy = proptest::collection::vec(proptest::collection::vec(any::<bool>(), 3), 1..=4);

    runner
        .run(&strategy, |presence| {
            let c = Collection::from_members(Arc::clone(&ws), &treants[..presence.len()]);
            for (member, flags) in c.iter().zip(&presence) {
                member.categories().clear().unwrap();
                let entries = keys
                    .iter()
                    .zip(flags)
                    .filter(|(_, on)| **on)
                    .map(|(k, _)| (*k, CategoryValue::Int(1)));
                member.categories().add(entries).unwrap();
            }

            let cats = c.categories();
            let all: BTreeSet<String> = cats.all().unwrap().into_keys().collect();
            let gapless: BTreeSet<String> = cats
                .any()
                .unwrap()
                .into_iter()
                .filter(|(_, values)| values.iter().all(Option::is_some))
                .map(|(k, _)| k)
                .collect();
            prop_assert_eq!(&all, &gapless);

            for column in cats.any().unwrap().values() {
                prop_assert_eq!(column.len(), c.len());
            }
            Ok(())
        })
        .unwrap();
}
