use crate::models::Player;

/// Best-available ordering: ascending ADP, with undrafted/unranked players
/// (no ADP on file) sorted after every ranked player.
pub fn sort_by_adp(mut players: Vec<Player>) -> Vec<Player> {
    players.sort_by(|a, b| match (a.adp, b.adp) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    players
}

pub fn best_available(players: &[Player]) -> Option<&Player> {
    players.iter().min_by(|a, b| match (a.adp, b.adp) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerPool;

    fn player_with_adp(adp: Option<f64>) -> Player {
        let mut p = Player::new("P".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        p.adp = adp;
        p
    }

    #[test]
    fn test_sort_by_adp_ascending() {
        let players = vec![player_with_adp(Some(10.0)), player_with_adp(Some(2.0))];
        let sorted = sort_by_adp(players);
        assert_eq!(sorted[0].adp, Some(2.0));
    }

    #[test]
    fn test_unranked_players_sort_last() {
        let players = vec![player_with_adp(None), player_with_adp(Some(5.0))];
        let sorted = sort_by_adp(players);
        assert_eq!(sorted[0].adp, Some(5.0));
        assert_eq!(sorted[1].adp, None);
    }

    #[test]
    fn test_best_available_picks_lowest_adp() {
        let players = vec![player_with_adp(Some(10.0)), player_with_adp(Some(2.0))];
        let best = best_available(&players).unwrap();
        assert_eq!(best.adp, Some(2.0));
    }

    #[test]
    fn test_best_available_empty() {
        assert!(best_available(&[]).is_none());
    }
}
