//! Tournament winner resolution
//!
//! Candidates are narrowed in fixed priority order until one is left:
//! 1. Highest score
//! 2. Fewest losses
//! 3. Most wins
//! 4. Smallest player id

use ordered_map::{EntryOps, MapError, OrderedMap};
use tracing::debug;

use crate::game::PlayerId;
use crate::participant::Participant;

/// Picks exactly one winner from a set of participants.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingResolver;

impl RankingResolver {
    /// Resolve the winner among `participants`.
    ///
    /// Works on a copy of the map; the input is never modified. Participants
    /// without games are not ranked, so `Ok(None)` means nobody played.
    /// Fails only if the working copy cannot be made.
    pub fn resolve<O>(
        participants: &OrderedMap<PlayerId, Participant, O>,
    ) -> Result<Option<PlayerId>, MapError>
    where
        O: EntryOps<PlayerId, Participant> + Clone,
    {
        let mut candidates = participants.copy()?;

        eliminate(&mut candidates, "no games", |p| p.games_played() == 0)?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let max_score = candidates
            .values()
            .filter_map(Participant::score)
            .fold(f64::MIN, f64::max);
        eliminate(&mut candidates, "score", |p| {
            p.score().map_or(true, |score| score < max_score)
        })?;
        if candidates.len() == 1 {
            return Ok(candidates.first_key().copied());
        }

        let min_losses = candidates.values().map(|p| p.losses).min().unwrap_or(0);
        eliminate(&mut candidates, "losses", |p| p.losses > min_losses)?;
        if candidates.len() == 1 {
            return Ok(candidates.first_key().copied());
        }

        let max_wins = candidates.values().map(|p| p.wins).max().unwrap_or(0);
        eliminate(&mut candidates, "wins", |p| p.wins < max_wins)?;

        // Keys are ascending, so the first survivor has the smallest id.
        Ok(candidates.first_key().copied())
    }
}

/// Remove every candidate `is_behind` rejects.
///
/// The rejected ids are collected in full before the first removal, so every
/// candidate is judged against the same set.
fn eliminate<O, F>(
    candidates: &mut OrderedMap<PlayerId, Participant, O>,
    stage: &str,
    is_behind: F,
) -> Result<(), MapError>
where
    O: EntryOps<PlayerId, Participant>,
    F: Fn(&Participant) -> bool,
{
    let rejected: Vec<PlayerId> = candidates
        .iter()
        .filter(|(_, participant)| is_behind(participant))
        .map(|(&id, _)| id)
        .collect();

    for id in &rejected {
        candidates.remove(id)?;
    }

    debug!(
        stage,
        eliminated = rejected.len(),
        remaining = candidates.len(),
        "ranking stage"
    );
    Ok(())
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;
