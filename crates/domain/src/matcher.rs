use chrono::TimeDelta;
use derive_more::Display;

use crate::{ExerciseCompletion, WorkoutRecord};

/// Maximum distance between a workout and the exercises logged with it.
pub const MATCH_WINDOW_HOURS: i64 = 12;

/// Strategy for attributing exercise completions to a workout.
///
/// Older records lack the data needed by the more precise strategies, so the
/// tiers are tried from most to least precise.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    #[display("session GUID")]
    SessionGuid,
    #[display("time window")]
    TimeWindow,
    #[display("calendar day")]
    CalendarDay,
}

impl MatchTier {
    pub const ALL: [MatchTier; 3] = [
        MatchTier::SessionGuid,
        MatchTier::TimeWindow,
        MatchTier::CalendarDay,
    ];

    #[must_use]
    pub fn matches(self, target: &WorkoutRecord, completion: &ExerciseCompletion) -> bool {
        match self {
            MatchTier::SessionGuid => {
                target.session_guid.is_some() && completion.session_guid == target.session_guid
            }
            MatchTier::TimeWindow => target
                .completed_at
                .is_within(&completion.completed_at, TimeDelta::hours(MATCH_WINDOW_HOURS)),
            MatchTier::CalendarDay => target.completed_at.is_same_day(&completion.completed_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionMatch<'a> {
    /// First tier with a non-empty result, if any.
    pub tier: Option<MatchTier>,
    /// Matching completions in pool order.
    pub completions: Vec<&'a ExerciseCompletion>,
}

/// Selects the completions of `pool` that belong to `target`.
#[must_use]
pub fn match_session<'a>(
    target: &WorkoutRecord,
    pool: &'a [ExerciseCompletion],
) -> SessionMatch<'a> {
    MatchTier::ALL
        .into_iter()
        .find_map(|tier| {
            let completions = pool
                .iter()
                .filter(|completion| tier.matches(target, completion))
                .collect::<Vec<_>>();
            (!completions.is_empty()).then_some(SessionMatch {
                tier: Some(tier),
                completions,
            })
        })
        .unwrap_or(SessionMatch {
            tier: None,
            completions: vec![],
        })
}
