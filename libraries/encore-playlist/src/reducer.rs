//! Pure history reducer
//!
//! Every function here takes the current state by reference and returns a
//! new one; the input is never modified. A rejected command returns an
//! error and no state at all.

use crate::command::{placeholder_cover_url, PlaylistCommand};
use crate::error::{PlaylistError, Result};
use crate::types::HistoryState;
use encore_core::{Track, TrackId};

/// Apply `command` to `state` with unbounded history
pub fn apply(state: &HistoryState, command: PlaylistCommand) -> Result<HistoryState> {
    apply_with_limit(state, command, None)
}

/// Apply `command` to `state`, keeping at most `max_history` snapshots on
/// each side of `present`
pub fn apply_with_limit(
    state: &HistoryState,
    command: PlaylistCommand,
    max_history: Option<usize>,
) -> Result<HistoryState> {
    let mut next = match command {
        PlaylistCommand::AddTrack { title, cover_url } => {
            let title = title.trim();
            if title.is_empty() {
                return Err(PlaylistError::InvalidInput(
                    "Please enter a song name".to_string(),
                ));
            }

            let track = Track::new(
                TrackId::generate(),
                title,
                cover_url.unwrap_or_else(placeholder_cover_url),
            );

            let mut present = state.present.clone();
            present.push(track);
            record(state, present)
        }

        PlaylistCommand::RemoveTrack { id } => {
            let present = state
                .present
                .iter()
                .filter(|track| track.id != id)
                .cloned()
                .collect();
            record(state, present)
        }

        PlaylistCommand::Clear => record(state, Vec::new()),

        PlaylistCommand::Undo => {
            let Some((previous, rest)) = state.past.split_last() else {
                return Ok(state.clone());
            };

            let mut future = Vec::with_capacity(state.future.len() + 1);
            future.push(state.present.clone());
            future.extend(state.future.iter().cloned());

            HistoryState {
                past: rest.to_vec(),
                present: previous.clone(),
                future,
            }
        }

        PlaylistCommand::Redo => {
            let Some((next, rest)) = state.future.split_first() else {
                return Ok(state.clone());
            };

            let mut past = state.past.clone();
            past.push(state.present.clone());

            HistoryState {
                past,
                present: next.clone(),
                future: rest.to_vec(),
            }
        }

        PlaylistCommand::Load(snapshot) => snapshot,
    };

    next.enforce_limit(max_history);
    Ok(next)
}

/// New state for a mutating command: old present onto `past`, redo branch discarded
fn record(state: &HistoryState, present: Vec<Track>) -> HistoryState {
    let mut past = Vec::with_capacity(state.past.len() + 1);
    past.extend(state.past.iter().cloned());
    past.push(state.present.clone());

    HistoryState {
        past,
        present,
        future: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    fn add(state: &HistoryState, title: &str) -> HistoryState {
        apply(state, PlaylistCommand::add(title)).unwrap()
    }

    #[test]
    fn add_trims_title_and_records_history() {
        let s0 = HistoryState::new();
        let s1 = add(&s0, "  Blinding Lights  ");

        assert_eq!(titles(&s1.present), vec!["Blinding Lights"]);
        assert_eq!(s1.past, vec![Vec::<Track>::new()]);
        assert!(s1.future.is_empty());
        assert!(s1.present[0].cover_url.starts_with("https://picsum.photos/200?random="));
    }

    #[test]
    fn add_keeps_explicit_cover() {
        let s1 = apply(
            &HistoryState::new(),
            PlaylistCommand::add_with_cover("Song", "https://covers.example/1.jpg"),
        )
        .unwrap();
        assert_eq!(s1.present[0].cover_url, "https://covers.example/1.jpg");
    }

    #[test]
    fn add_rejects_blank_titles() {
        let s1 = add(&HistoryState::new(), "A");
        for blank in ["", "   ", "\t\n"] {
            let err = apply(&s1, PlaylistCommand::add(blank)).unwrap_err();
            assert!(matches!(err, PlaylistError::InvalidInput(_)));
        }
        // Input state untouched
        assert_eq!(titles(&s1.present), vec!["A"]);
        assert_eq!(s1.past.len(), 1);
    }

    #[test]
    fn scenario_undo_then_add_discards_redo() {
        let s0 = HistoryState::new();
        let s1 = add(&s0, "A");
        let a = s1.present.clone();
        assert_eq!(s1.past, vec![Vec::<Track>::new()]);

        let s2 = add(&s1, "B");
        let ab = s2.present.clone();
        assert_eq!(titles(&s2.present), vec!["A", "B"]);
        assert_eq!(s2.past, vec![vec![], a.clone()]);

        let s3 = apply(&s2, PlaylistCommand::Undo).unwrap();
        assert_eq!(s3.present, a);
        assert_eq!(s3.past, vec![Vec::<Track>::new()]);
        assert_eq!(s3.future, vec![ab]);

        let s4 = add(&s3, "C");
        assert_eq!(titles(&s4.present), vec!["A", "C"]);
        assert_eq!(s4.past, vec![vec![], a]);
        assert!(s4.future.is_empty());

        // Redo after the branch is a no-op
        assert_eq!(apply(&s4, PlaylistCommand::Redo).unwrap(), s4);
    }

    #[test]
    fn remove_preserves_order_and_undo_restores() {
        let s = add(&add(&add(&HistoryState::new(), "A"), "B"), "C");
        let b_id = s.present[1].id.clone();

        let removed = apply(&s, PlaylistCommand::remove(b_id)).unwrap();
        assert_eq!(titles(&removed.present), vec!["A", "C"]);

        let undone = apply(&removed, PlaylistCommand::Undo).unwrap();
        assert_eq!(undone.present, s.present);
    }

    #[test]
    fn remove_unknown_id_still_records_history() {
        let s = add(&HistoryState::new(), "A");
        let next = apply(&s, PlaylistCommand::remove("does-not-exist")).unwrap();

        assert_eq!(next.present, s.present);
        assert_eq!(next.past.len(), s.past.len() + 1);
        assert_eq!(next.past.last(), Some(&s.present));
    }

    #[test]
    fn clear_twice_on_empty_records_two_entries() {
        let s0 = HistoryState::new();
        let s1 = apply(&s0, PlaylistCommand::Clear).unwrap();
        let s2 = apply(&s1, PlaylistCommand::Clear).unwrap();

        assert!(s2.present.is_empty());
        assert_eq!(s2.past, vec![Vec::<Track>::new(), Vec::new()]);
    }

    #[test]
    fn undo_and_redo_are_no_ops_at_the_edges() {
        let s0 = HistoryState::new();
        assert_eq!(apply(&s0, PlaylistCommand::Undo).unwrap(), s0);
        assert_eq!(apply(&s0, PlaylistCommand::Redo).unwrap(), s0);

        let s1 = add(&s0, "A");
        assert_eq!(apply(&s1, PlaylistCommand::Redo).unwrap(), s1);
    }

    #[test]
    fn redo_reverses_undo() {
        let s = add(&add(&HistoryState::new(), "A"), "B");
        let undone = apply(&s, PlaylistCommand::Undo).unwrap();
        assert_eq!(apply(&undone, PlaylistCommand::Redo).unwrap(), s);
    }

    #[test]
    fn multiple_undos_stack_future_most_recent_first() {
        let s = add(&add(&add(&HistoryState::new(), "A"), "B"), "C");
        let u1 = apply(&s, PlaylistCommand::Undo).unwrap();
        let u2 = apply(&u1, PlaylistCommand::Undo).unwrap();

        assert_eq!(titles(&u2.present), vec!["A"]);
        assert_eq!(titles(&u2.future[0]), vec!["A", "B"]);
        assert_eq!(titles(&u2.future[1]), vec!["A", "B", "C"]);

        let r1 = apply(&u2, PlaylistCommand::Redo).unwrap();
        assert_eq!(r1, u1);
    }

    #[test]
    fn load_replaces_state_wholesale() {
        let saved = add(&add(&HistoryState::new(), "X"), "Y");
        let current = add(&HistoryState::new(), "Z");
        assert_eq!(
            apply(&current, PlaylistCommand::Load(saved.clone())).unwrap(),
            saved
        );
    }

    #[test]
    fn limited_history_stays_consistent() {
        let mut s = HistoryState::new();
        for title in ["A", "B", "C", "D", "E"] {
            s = apply_with_limit(&s, PlaylistCommand::add(title), Some(2)).unwrap();
        }
        assert_eq!(s.past.len(), 2);
        assert_eq!(titles(&s.past[0]), vec!["A", "B", "C"]);

        let u1 = apply_with_limit(&s, PlaylistCommand::Undo, Some(2)).unwrap();
        let u2 = apply_with_limit(&u1, PlaylistCommand::Undo, Some(2)).unwrap();
        let u3 = apply_with_limit(&u2, PlaylistCommand::Undo, Some(2)).unwrap();

        assert_eq!(titles(&u2.present), vec!["A", "B", "C"]);
        assert_eq!(u3, u2);
        assert_eq!(u2.future.len(), 2);

        let r1 = apply_with_limit(&u2, PlaylistCommand::Redo, Some(2)).unwrap();
        let r2 = apply_with_limit(&r1, PlaylistCommand::Redo, Some(2)).unwrap();
        assert_eq!(r2.present, s.present);
    }
}
