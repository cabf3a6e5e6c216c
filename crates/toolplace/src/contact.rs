//! Consolidation of raw contact events into debounced contact intervals.
//!
//! Purpose
//! - Physics engines report pairwise begin/end contact callbacks with
//!   jitter: brief spurious separations, ids in arbitrary order, and
//!   contacts that were already touching when recording started (no `begin`
//!   ever arrives for them). `consolidate` turns such a stream into clean,
//!   time-ordered intervals per canonical object pair.
//!
//! Model
//! - An `end` followed by a `begin` within `slop_time` is treated as noise:
//!   the contact is considered to have never broken. A longer gap finalizes
//!   the prior interval and opens a new one.
//! - Contacts with no observed `begin` get `BeginTime::BeforeObservation`
//!   rather than a sentinel time; contacts still touching at stream end get
//!   `end = None`.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use tracing::trace;

/// Raw contact transition kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Begin,
    End,
}

/// One raw event from the engine's contact callback. Id order within the
/// pair is arbitrary; normals are opaque beyond their sign.
#[derive(Clone, Debug)]
pub struct ContactEvent {
    pub first: String,
    pub second: String,
    pub kind: ContactKind,
    /// Simulation time of the transition.
    pub time: f64,
    /// Contact normals recorded at the transition.
    pub normals: Vec<Vector2<f64>>,
}

/// Begin time of a consolidated interval. `BeforeObservation` marks a
/// contact that was already touching when the stream started; it sorts
/// below every finite time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeginTime {
    BeforeObservation,
    At(f64),
}

impl BeginTime {
    /// Finite begin time, if one was observed.
    pub fn time(self) -> Option<f64> {
        match self {
            BeginTime::BeforeObservation => None,
            BeginTime::At(t) => Some(t),
        }
    }

    #[inline]
    fn sort_key(self) -> f64 {
        match self {
            BeginTime::BeforeObservation => f64::NEG_INFINITY,
            BeginTime::At(t) => t,
        }
    }
}

/// A resolved span during which two objects were continuously in contact.
/// `first` ≤ `second` lexicographically; normals are those recorded at the
/// resolving transition. Immutable once emitted.
#[derive(Clone, Debug)]
pub struct ContactInterval {
    pub first: String,
    pub second: String,
    pub begin: BeginTime,
    /// `None` means still in contact at stream end.
    pub end: Option<f64>,
    pub normals: Vec<Vector2<f64>>,
}

#[derive(Default)]
struct Pending {
    /// Most recent unresolved `begin` (time, normals).
    began_at: Option<(f64, Vec<Vector2<f64>>)>,
    /// Most recent `end` not yet matched by a later `begin` (time, normals).
    open_since: Option<(f64, Vec<Vector2<f64>>)>,
}

/// Canonical pair order (lexicographically smaller id first); normals are
/// sign-flipped when a swap was needed to stay physically consistent.
fn canonicalize(ev: &ContactEvent) -> (String, String, Vec<Vector2<f64>>) {
    if ev.second < ev.first {
        let flipped = ev.normals.iter().map(|n| -n).collect();
        (ev.second.clone(), ev.first.clone(), flipped)
    } else {
        (ev.first.clone(), ev.second.clone(), ev.normals.clone())
    }
}

/// Merge a raw event stream into contact intervals, sorted ascending by
/// begin time (`BeforeObservation` first, ties in emission order).
///
/// Never fails: malformed streams are absorbed into state or emitted with
/// explicit markers instead of raising.
pub fn consolidate(events: &[ContactEvent], slop_time: f64) -> Vec<ContactInterval> {
    let mut state: BTreeMap<(String, String), Pending> = BTreeMap::new();
    let mut out: Vec<ContactInterval> = Vec::new();

    for ev in events {
        let (first, second, normals) = canonicalize(ev);
        let pending = state.entry((first.clone(), second.clone())).or_default();
        match ev.kind {
            ContactKind::Begin => {
                if let Some((end_t, end_normals)) = pending.open_since.take() {
                    if ev.time - end_t > slop_time {
                        // Genuine break: finalize the prior interval and
                        // open a new one at this begin.
                        let begin = match pending.began_at.take() {
                            Some((t, _)) => BeginTime::At(t),
                            None => BeginTime::BeforeObservation,
                        };
                        trace!(%first, %second, ?begin, end = end_t, "interval finalized");
                        out.push(ContactInterval {
                            first,
                            second,
                            begin,
                            end: Some(end_t),
                            normals: end_normals,
                        });
                        pending.began_at = Some((ev.time, normals));
                    }
                    // Within slop: jitter, the contact never broke.
                } else {
                    pending.began_at = Some((ev.time, normals));
                }
            }
            ContactKind::End => {
                // Most recent end wins until matched by a later begin.
                pending.open_since = Some((ev.time, normals));
            }
        }
    }

    // Stream end: finalize pairs with a pending end, then pairs still in
    // contact (no end observed).
    for ((first, second), pending) in state {
        if let Some((end_t, end_normals)) = pending.open_since {
            let begin = match pending.began_at {
                Some((t, _)) => BeginTime::At(t),
                None => BeginTime::BeforeObservation,
            };
            out.push(ContactInterval {
                first,
                second,
                begin,
                end: Some(end_t),
                normals: end_normals,
            });
        } else if let Some((t, normals)) = pending.began_at {
            out.push(ContactInterval {
                first,
                second,
                begin: BeginTime::At(t),
                end: None,
                normals,
            });
        }
    }

    out.sort_by(|a, b| {
        a.begin
            .sort_key()
            .partial_cmp(&b.begin.sort_key())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use proptest::prelude::*;

    fn ev(a: &str, b: &str, kind: ContactKind, time: f64) -> ContactEvent {
        ContactEvent {
            first: a.to_string(),
            second: b.to_string(),
            kind,
            time,
            normals: vec![Vector2::new(0.0, 1.0)],
        }
    }

    #[test]
    fn short_gap_merges_into_one_interval() {
        // end at 0.0 then begin at 0.1 with slop 0.2: the break is jitter.
        let events = vec![
            ev("a", "b", ContactKind::End, 0.0),
            ev("a", "b", ContactKind::Begin, 0.1),
        ];
        let out = consolidate(&events, 0.2);
        // The pending end was discarded and no new interval opened, so
        // nothing resolves at stream end either.
        assert!(out.is_empty());
    }

    #[test]
    fn long_gap_emits_separate_intervals() {
        let events = vec![
            ev("a", "b", ContactKind::End, 0.0),
            ev("a", "b", ContactKind::Begin, 0.1),
        ];
        let out = consolidate(&events, 0.05);
        assert_eq!(out.len(), 2);
        // First: contact existed before observation, ended at 0.0.
        assert_eq!(out[0].begin, BeginTime::BeforeObservation);
        assert_eq!(out[0].end, Some(0.0));
        // Second: opened at 0.1, still touching at stream end.
        assert_eq!(out[1].begin, BeginTime::At(0.1));
        assert_eq!(out[1].end, None);
    }

    #[test]
    fn full_episode_resolves_with_begin_and_end() {
        let events = vec![
            ev("ball", "wall", ContactKind::Begin, 1.0),
            ev("ball", "wall", ContactKind::End, 2.5),
            ev("ball", "wall", ContactKind::Begin, 4.0),
        ];
        let out = consolidate(&events, 0.2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].begin, BeginTime::At(1.0));
        assert_eq!(out[0].end, Some(2.5));
        assert_eq!(out[1].begin, BeginTime::At(4.0));
        assert_eq!(out[1].end, None);
    }

    #[test]
    fn jitter_inside_episode_is_absorbed() {
        let events = vec![
            ev("ball", "wall", ContactKind::Begin, 1.0),
            ev("ball", "wall", ContactKind::End, 2.0),
            ev("ball", "wall", ContactKind::Begin, 2.05),
            ev("ball", "wall", ContactKind::End, 3.0),
        ];
        let out = consolidate(&events, 0.2);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].begin, BeginTime::At(1.0));
        assert_eq!(out[0].end, Some(3.0));
    }

    #[test]
    fn swapped_ids_are_canonicalized_and_normals_flipped() {
        let mut e = ev("b", "a", ContactKind::Begin, 1.0);
        e.normals = vec![Vector2::new(1.0, -2.0)];
        let out = consolidate(&[e], 0.2);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].first, "a");
        assert_eq!(out[0].second, "b");
        assert_eq!(out[0].normals, vec![Vector2::new(-1.0, 2.0)]);
    }

    #[test]
    fn output_sorted_with_unknown_begin_first() {
        let events = vec![
            ev("c", "d", ContactKind::Begin, 0.5),
            ev("a", "b", ContactKind::End, 3.0),
        ];
        let out = consolidate(&events, 0.2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].begin, BeginTime::BeforeObservation);
        assert_eq!(out[1].begin, BeginTime::At(0.5));
    }

    proptest! {
        #[test]
        fn emitted_pairs_are_canonically_ordered(
            raw in proptest::collection::vec(
                (0usize..4, 0usize..4, prop::bool::ANY, 0.0f64..100.0),
                0..40,
            )
        ) {
            let ids = ["ball", "block", "goal", "tool"];
            let events: Vec<ContactEvent> = raw
                .into_iter()
                .map(|(i, j, is_begin, t)| ContactEvent {
                    first: ids[i].to_string(),
                    second: ids[j].to_string(),
                    kind: if is_begin { ContactKind::Begin } else { ContactKind::End },
                    time: t,
                    normals: vec![Vector2::new(1.0, 0.0)],
                })
                .collect();
            let out = consolidate(&events, 0.2);
            for iv in &out {
                prop_assert!(iv.first <= iv.second);
            }
            // Sorted ascending by begin key.
            for w in out.windows(2) {
                prop_assert!(w[0].begin.sort_key() <= w[1].begin.sort_key());
            }
        }
    }
}
