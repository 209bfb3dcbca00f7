//! The publication status state machine.
//!
//! Legal transitions are held as data in [`TRANSITIONS`]. `DRAFT` is the
//! initial state; `PUBLISHED` and `REJECTED` are terminal. A transition into
//! the current state is never implicitly allowed.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  publication::{Publication, PublicationStatus},
};

use crate::publication::PublicationStatus::{Approved, Draft, InReview, Published, Rejected};

// ─── Table ───────────────────────────────────────────────────────────────────

/// `(current, allowed next states)` for every status.
pub const TRANSITIONS: &[(PublicationStatus, &[PublicationStatus])] = &[
  (Draft, &[InReview]),
  (InReview, &[Approved, Rejected, Draft]),
  (Approved, &[Published, Rejected]),
  (Published, &[]),
  (Rejected, &[]),
];

/// Statuses reachable in one step from `current`.
pub fn allowed_targets(current: PublicationStatus) -> &'static [PublicationStatus] {
  TRANSITIONS
    .iter()
    .find(|(from, _)| *from == current)
    .map(|(_, targets)| *targets)
    .unwrap_or(&[])
}

pub fn can_transition(current: PublicationStatus, target: PublicationStatus) -> bool {
  allowed_targets(current).contains(&target)
}

pub fn is_terminal(status: PublicationStatus) -> bool {
  allowed_targets(status).is_empty()
}

// ─── Apply ───────────────────────────────────────────────────────────────────

/// Move `publication` to `target`, applying the transition's side effects.
///
/// Entering `IN_REVIEW` increments `review_count` by one. `updated_at` is set
/// to `now`. On error the publication is left untouched.
pub fn apply_transition(
  publication: &mut Publication,
  target: PublicationStatus,
  now: DateTime<Utc>,
) -> Result<()> {
  let current = publication.status;
  if !can_transition(current, target) {
    return Err(Error::InvalidTransition {
      from: current,
      to:   target,
    });
  }

  if target == InReview {
    publication.review_count += 1;
  }
  publication.status = target;
  publication.updated_at = now;
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::Duration;
  use strum::IntoEnumIterator;
  use uuid::Uuid;

  use super::*;
  use crate::publication::PublicationKind;

  fn publication(status: PublicationStatus) -> Publication {
    let at = Utc::now() - Duration::hours(1);
    Publication {
      publication_id: Uuid::new_v4(),
      kind: PublicationKind::LiteraryWork,
      title: "Short Story".into(),
      description: None,
      content: None,
      author_id: 42,
      status,
      category: None,
      review_count: 0,
      version: 0,
      created_at: at,
      updated_at: at,
    }
  }

  #[test]
  fn table_covers_every_status_once() {
    for status in PublicationStatus::iter() {
      let rows = TRANSITIONS.iter().filter(|(from, _)| *from == status).count();
      assert_eq!(rows, 1, "{status} should appear exactly once");
    }
  }

  #[test]
  fn legal_pairs_match_the_editorial_workflow() {
    let legal = [
      (Draft, InReview),
      (InReview, Approved),
      (InReview, Rejected),
      (InReview, Draft),
      (Approved, Published),
      (Approved, Rejected),
    ];
    for from in PublicationStatus::iter() {
      for to in PublicationStatus::iter() {
        assert_eq!(
          can_transition(from, to),
          legal.contains(&(from, to)),
          "{from} -> {to}"
        );
      }
    }
  }

  #[test]
  fn apply_succeeds_exactly_for_legal_pairs() {
    let now = Utc::now();
    for from in PublicationStatus::iter() {
      for to in PublicationStatus::iter() {
        let mut p = publication(from);
        let before = p.clone();
        match apply_transition(&mut p, to, now) {
          Ok(()) => {
            assert!(can_transition(from, to));
            assert_eq!(p.status, to);
            assert_eq!(p.updated_at, now);
          }
          Err(Error::InvalidTransition { from: f, to: t }) => {
            assert!(!can_transition(from, to));
            assert_eq!((f, t), (from, to));
            assert_eq!(p, before, "failed transition must not mutate");
          }
          Err(other) => panic!("unexpected error: {other}"),
        }
      }
    }
  }

  #[test]
  fn same_state_is_never_allowed() {
    for status in PublicationStatus::iter() {
      assert!(!can_transition(status, status), "{status} -> {status}");
    }
  }

  #[test]
  fn terminal_states_reject_everything() {
    assert!(is_terminal(Published));
    assert!(is_terminal(Rejected));
    for terminal in [Published, Rejected] {
      for to in PublicationStatus::iter() {
        let mut p = publication(terminal);
        assert!(apply_transition(&mut p, to, Utc::now()).is_err());
      }
    }
  }

  #[test]
  fn entering_review_increments_review_count_once_per_entry() {
    let mut p = publication(Draft);
    apply_transition(&mut p, InReview, Utc::now()).unwrap();
    assert_eq!(p.review_count, 1);
    apply_transition(&mut p, Draft, Utc::now()).unwrap();
    assert_eq!(p.review_count, 1, "leaving review must not decrement");
    apply_transition(&mut p, InReview, Utc::now()).unwrap();
    assert_eq!(p.review_count, 2);
    apply_transition(&mut p, Approved, Utc::now()).unwrap();
    apply_transition(&mut p, Published, Utc::now()).unwrap();
    assert_eq!(p.review_count, 2);
  }

  #[test]
  fn invalid_transition_message_names_both_states() {
    let mut p = publication(Draft);
    let err = apply_transition(&mut p, Published, Utc::now()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("DRAFT") && msg.contains("PUBLISHED"), "{msg}");
  }
}
