//! Property tests for the roster model
//!
//! Drives random sequences of operations and checks the pool invariants
//! after every step.

use std::collections::BTreeSet;

use matchmakin_core::{PlayerId, Roster, RosterError};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Fight(u8),
    Undo,
    Delete(u8),
    Reset,
    Rename(u8, String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u8..=7).prop_map(Op::Fight),
        2 => Just(Op::Undo),
        1 => (1u8..=7).prop_map(Op::Delete),
        1 => Just(Op::Reset),
        1 => ((1u8..=7), "[a-z]{0,6}").prop_map(|(id, name)| Op::Rename(id, name)),
    ]
}

fn id(raw: u8) -> PlayerId {
    PlayerId::new(raw).unwrap()
}

fn fresh() -> Roster {
    Roster::initialize(["A", "B", "C", "D", "E", "F", "G"]).unwrap()
}

fn apply(roster: &mut Roster, op: &Op) {
    match op {
        Op::Fight(raw) => {
            let _ = roster.fight(id(*raw));
        }
        Op::Undo => {
            roster.undo();
        }
        Op::Delete(raw) => {
            roster.delete_player(id(*raw));
        }
        Op::Reset => roster.reset(),
        Op::Rename(raw, name) => roster.rename(id(*raw), name.clone()),
    }
}

fn check_invariants(roster: &Roster, deleted: &BTreeSet<u8>) -> Result<(), TestCaseError> {
    let opponents: BTreeSet<u8> = roster.opponents().iter().map(|p| p.get()).collect();
    let history: BTreeSet<u8> = roster.history().iter().map(|p| p.get()).collect();

    prop_assert_eq!(opponents.len(), roster.opponents().len(), "duplicate in opponents");
    prop_assert_eq!(history.len(), roster.history().len(), "duplicate in history");
    prop_assert!(opponents.is_disjoint(&history));

    let union: BTreeSet<u8> = opponents.union(&history).copied().collect();
    let expected: BTreeSet<u8> = (1..=7).filter(|raw| !deleted.contains(raw)).collect();
    prop_assert_eq!(union, expected);
    prop_assert_eq!(roster.alive(), 8 - deleted.len());
    prop_assert_eq!(roster.names().count(), 7);
    Ok(())
}

proptest! {
    #[test]
    fn proptest_pools_stay_partitioned(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut roster = fresh();
        let mut deleted = BTreeSet::new();

        for op in &ops {
            apply(&mut roster, op);
            if let Op::Delete(raw) = op {
                deleted.insert(*raw);
            }
            check_invariants(&roster, &deleted)?;
        }
    }

    #[test]
    fn proptest_fight_then_undo_restores(
        ops in prop::collection::vec(op_strategy(), 0..30),
        target in 1u8..=7,
    ) {
        let mut roster = fresh();
        for op in &ops {
            apply(&mut roster, op);
        }

        let before = (roster.opponents().to_vec(), roster.history().to_vec());
        match roster.fight(id(target)) {
            Ok(()) => {
                prop_assert!(roster.undo());
                prop_assert_eq!(roster.opponents(), before.0.as_slice());
                prop_assert_eq!(roster.history(), before.1.as_slice());

                // Second undo has nothing left to restore
                prop_assert!(!roster.undo());
                prop_assert_eq!(roster.opponents(), before.0.as_slice());
            }
            Err(err) => {
                prop_assert_eq!(err, RosterError::NotInPool(id(target)));
                prop_assert_eq!(roster.opponents(), before.0.as_slice());
                prop_assert_eq!(roster.history(), before.1.as_slice());
            }
        }
    }

    #[test]
    fn proptest_delete_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..30),
        target in 1u8..=7,
    ) {
        let mut roster = fresh();
        for op in &ops {
            apply(&mut roster, op);
        }

        roster.delete_player(id(target));
        let once = roster.clone();
        prop_assert!(!roster.delete_player(id(target)));
        prop_assert_eq!(roster, once);
    }

    #[test]
    fn proptest_reset_appends_history(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut roster = fresh();
        for op in &ops {
            apply(&mut roster, op);
        }

        let mut expected = roster.opponents().to_vec();
        expected.extend_from_slice(roster.history());
        let alive = roster.alive();

        roster.reset();
        prop_assert_eq!(roster.opponents(), expected.as_slice());
        prop_assert!(roster.history().is_empty());
        prop_assert_eq!(roster.alive(), alive);
    }
}

#[test]
fn test_recycle_scenario_from_full_roster() {
    let mut roster = fresh();
    for raw in [3, 1, 7, 2] {
        roster.fight(id(raw)).unwrap();
    }
    assert_eq!(roster.opponents(), &[id(4), id(5), id(6)]);
    assert_eq!(roster.history(), &[id(3), id(1), id(7), id(2)]);

    roster.fight(id(5)).unwrap();
    assert_eq!(roster.opponents(), &[id(3), id(4), id(6)]);
    assert_eq!(roster.history(), &[id(1), id(7), id(2), id(5)]);
}
