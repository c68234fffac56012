use super::engine::LeaderboardEntry;

/// Keep only entries scoring at least `threshold`, in their existing order
pub fn filter_by_threshold(entries: &[LeaderboardEntry], threshold: i64) -> Vec<&LeaderboardEntry> {
    entries
        .iter()
        .filter(|entry| entry.score >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Event, Player};
    use crate::scoring::{compute_leaderboard, default_points};

    fn sample_board() -> Vec<LeaderboardEntry> {
        let players: Vec<Player> = (1..=5u64)
            .map(|i| Player::new(i, format!("P{}", i)))
            .collect();
        let events = vec![
            Event::new("e1", 1u64, "TAKE_WICKET"),
            Event::new("e2", 2u64, "TAKE_WICKET"),
            Event::new("e3", 2u64, "HIT_SIX"),
            Event::new("e4", 3u64, "50_RUNS_MILESTONE"),
            Event::new("e5", 4u64, "HIT_FOUR"),
        ];
        compute_leaderboard(&players, &events, &default_points()).unwrap()
    }

    #[test]
    fn test_filter_keeps_entries_at_or_above_threshold() {
        let board = sample_board();
        let top = filter_by_threshold(&board, 20);

        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|e| e.score >= 20));
        assert_eq!(top[0].score, 22);
        assert_eq!(top[1].score, 20);
    }

    #[test]
    fn test_filter_is_complete_and_ordered() {
        let board = sample_board();
        for threshold in [-1, 0, 1, 2, 15, 20, 21, 22, 23] {
            let filtered = filter_by_threshold(&board, threshold);
            let expected: Vec<&LeaderboardEntry> =
                board.iter().filter(|e| e.score >= threshold).collect();
            assert_eq!(filtered, expected, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_filter_can_be_empty() {
        let board = sample_board();
        assert!(filter_by_threshold(&board, 1000).is_empty());
        assert!(filter_by_threshold(&[], 0).is_empty());
    }

    #[test]
    fn test_zero_threshold_keeps_everyone() {
        let board = sample_board();
        assert_eq!(filter_by_threshold(&board, 0).len(), board.len());
    }
}
