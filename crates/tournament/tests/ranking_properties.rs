//! Property tests for winner resolution
//!
//! The staged resolver must agree with a single lexicographic comparison:
//! highest score, then fewest losses, then most wins, then smallest id.

use std::cmp::Ordering;

use ordered_map::OrderedMap;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tournament::{Participant, PlayerId, RankingResolver};

/// Scores compared exactly as fractions `(2W + T) / games`.
fn compare_scores(a: &Participant, b: &Participant) -> Ordering {
    let points = |p: &Participant| u64::from(2 * p.wins + p.ties);
    let games = |p: &Participant| u64::from(p.games_played());
    (points(a) * games(b)).cmp(&(points(b) * games(a)))
}

fn expected_winner(players: &[Participant]) -> Option<PlayerId> {
    players
        .iter()
        .filter(|p| p.games_played() > 0)
        .min_by(|a, b| {
            compare_scores(b, a)
                .then(a.losses.cmp(&b.losses))
                .then(b.wins.cmp(&a.wins))
                .then(a.id.cmp(&b.id))
        })
        .map(|p| p.id)
}

fn build_map(players: &[Participant]) -> OrderedMap<PlayerId, Participant> {
    let mut map = OrderedMap::new();
    for player in players {
        map.insert_or_update(&player.id, player).unwrap();
    }
    map
}

fn participant_strategy() -> impl Strategy<Value = Participant> {
    (1i32..40, 0u32..6, 0u32..6, 0u32..6).prop_map(|(id, wins, losses, ties)| Participant {
        id,
        wins,
        losses,
        ties,
        play_time: 0,
    })
}

proptest! {
    #[test]
    fn prop_resolver_matches_sort_order(
        players in prop::collection::vec(participant_strategy(), 0..25)
    ) {
        let map = build_map(&players);
        // Later duplicates overwrite earlier ones in the map
        let unique: Vec<Participant> = map.values().copied().collect();

        let winner = RankingResolver::resolve(&map).unwrap();
        prop_assert_eq!(winner, expected_winner(&unique));
        prop_assert_eq!(map.size(), unique.len());
    }
}

#[test]
fn test_random_fields_seeded() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let count = rng.gen_range(1..12);
        let players: Vec<Participant> = (1..=count)
            .map(|id| Participant {
                id,
                wins: rng.gen_range(0..4),
                losses: rng.gen_range(0..4),
                ties: rng.gen_range(0..4),
                play_time: 0,
            })
            .collect();

        let map = build_map(&players);
        assert_eq!(
            RankingResolver::resolve(&map).unwrap(),
            expected_winner(&players),
            "players: {:?}",
            players
        );
    }
}
