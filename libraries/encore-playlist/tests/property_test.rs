//! Property-based tests for the history reducer
//!
//! Uses proptest to drive the reducer through random command sequences and
//! checks the undo/redo invariants on every reachable state.

use encore_playlist::{apply, apply_with_limit, HistoryState, PlaylistCommand, PlaylistError};
use proptest::prelude::*;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    /// Remove the track at this index modulo the playlist length (or a missing id)
    Remove(usize),
    Clear,
    Undo,
    Redo,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[A-Za-z ]{0,12}".prop_map(Op::Add),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::Clear),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn to_command(state: &HistoryState, op: &Op) -> PlaylistCommand {
    match op {
        Op::Add(title) => PlaylistCommand::add_with_cover(title.clone(), "cover"),
        Op::Remove(index) => match state.present.len() {
            0 => PlaylistCommand::remove("missing"),
            len => PlaylistCommand::remove(state.present[index % len].id.clone()),
        },
        Op::Clear => PlaylistCommand::Clear,
        Op::Undo => PlaylistCommand::Undo,
        Op::Redo => PlaylistCommand::Redo,
    }
}

/// Run ops, skipping blank adds the same way the UI would
fn run(ops: &[Op], limit: Option<usize>) -> HistoryState {
    let mut state = HistoryState::new();
    for op in ops {
        let command = to_command(&state, op);
        if let Ok(next) = apply_with_limit(&state, command, limit) {
            state = next;
        }
    }
    state
}

fn reachable_state() -> impl Strategy<Value = HistoryState> {
    prop::collection::vec(arbitrary_op(), 0..40).prop_map(|ops| run(&ops, None))
}

// ===== Property Tests =====

proptest! {
    /// Property: undoing an add restores the previous present and past
    #[test]
    fn undo_reverts_add(state in reachable_state(), title in "[A-Za-z]{1,10}") {
        let added = apply(&state, PlaylistCommand::add(title)).unwrap();
        let undone = apply(&added, PlaylistCommand::Undo).unwrap();

        prop_assert_eq!(&undone.present, &state.present);
        prop_assert_eq!(&undone.past, &state.past);
        if state.future.is_empty() {
            // The only redo entry is the add itself
            prop_assert_eq!(undone.future, vec![added.present]);
        }
    }

    /// Property: undoing a remove restores the exact present, order included
    #[test]
    fn undo_reverts_remove(state in reachable_state(), index in any::<usize>()) {
        prop_assume!(!state.present.is_empty());
        let id = state.present[index % state.present.len()].id.clone();

        let removed = apply(&state, PlaylistCommand::remove(id.clone())).unwrap();
        prop_assert!(removed.present.iter().all(|t| t.id != id));

        let undone = apply(&removed, PlaylistCommand::Undo).unwrap();
        prop_assert_eq!(undone.present, state.present);
    }

    /// Property: redo exactly reverses a real undo
    #[test]
    fn redo_after_undo_is_identity(state in reachable_state()) {
        prop_assume!(state.can_undo());
        let undone = apply(&state, PlaylistCommand::Undo).unwrap();
        let redone = apply(&undone, PlaylistCommand::Redo).unwrap();
        prop_assert_eq!(redone, state);
    }

    /// Property: undo/redo at the edges return the state unchanged
    #[test]
    fn edge_undo_redo_are_no_ops(state in reachable_state()) {
        if !state.can_undo() {
            prop_assert_eq!(&apply(&state, PlaylistCommand::Undo).unwrap(), &state);
        }
        if !state.can_redo() {
            prop_assert_eq!(&apply(&state, PlaylistCommand::Redo).unwrap(), &state);
        }
    }

    /// Property: any mutation after an undo discards the redo branch
    #[test]
    fn mutation_after_undo_clears_future(
        state in reachable_state(),
        op in prop_oneof![
            "[A-Za-z]{1,8}".prop_map(Op::Add),
            any::<usize>().prop_map(Op::Remove),
            Just(Op::Clear),
        ]
    ) {
        prop_assume!(state.can_undo());
        let undone = apply(&state, PlaylistCommand::Undo).unwrap();
        prop_assert!(undone.can_redo());

        let mutated = apply(&undone, to_command(&undone, &op)).unwrap();
        prop_assert!(mutated.future.is_empty());
        prop_assert_eq!(mutated.past.len(), undone.past.len() + 1);

        let redone = apply(&mutated, PlaylistCommand::Redo).unwrap();
        prop_assert_eq!(redone, mutated);
    }

    /// Property: blank titles are always rejected without touching state
    #[test]
    fn blank_titles_rejected(state in reachable_state(), blank in "[ \t]{0,6}") {
        let before = state.clone();
        let result = apply(&state, PlaylistCommand::add(blank));
        prop_assert!(matches!(result, Err(PlaylistError::InvalidInput(_))));
        prop_assert_eq!(state, before);
    }

    /// Property: track ids are unique within every present snapshot
    #[test]
    fn ids_unique_in_present(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let state = run(&ops, None);
        let mut ids: Vec<_> = state.present.iter().map(|t| t.id.as_str()).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
    }

    /// Property: titles are stored trimmed and non-empty
    #[test]
    fn titles_stored_trimmed(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let state = run(&ops, None);
        for track in state.present.iter().chain(state.past.iter().flatten()) {
            prop_assert!(!track.title.is_empty());
            prop_assert_eq!(track.title.trim(), track.title.as_str());
        }
    }

    /// Property: JSON snapshot loads back to the same state
    #[test]
    fn snapshot_round_trip(state in reachable_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let parsed: HistoryState = serde_json::from_str(&json).unwrap();
        let loaded = apply(&HistoryState::new(), PlaylistCommand::Load(parsed)).unwrap();
        prop_assert_eq!(loaded, state);
    }

    /// Property: a history limit bounds both sides and never loses present
    #[test]
    fn history_limit_respected(
        max in 0usize..6,
        ops in prop::collection::vec(arbitrary_op(), 0..60)
    ) {
        let limited = run(&ops, Some(max));
        prop_assert!(limited.past.len() <= max);
        prop_assert!(limited.future.len() <= max);

        // Without any undo/redo, the present matches the unbounded run
        let no_nav: Vec<Op> = ops
            .into_iter()
            .filter(|op| !matches!(op, Op::Undo | Op::Redo))
            .collect();
        let a = run(&no_nav, Some(max));
        let b = run(&no_nav, None);
        let titles = |s: &HistoryState| s.present.iter().map(|t| t.title.clone()).collect::<Vec<_>>();
        prop_assert_eq!(titles(&a), titles(&b));
    }
}
