//! Integration tests for the leaderboard, its CSV export and the points history.

use chrono::NaiveDate;
use padel_challenge_web::{
    compute_ranking, points_history, ranking_csv, GameMatch, MatchStatus, MatchType, Player,
    PlayerId, RankingRow, Winner,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn roster() -> Vec<Player> {
    ["Anna", "Bruno", "Carla", "Dario"]
        .into_iter()
        .map(Player::new)
        .collect()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn played(p: &[Player], score: &str) -> GameMatch {
    let mut m = GameMatch::new([p[0].id, p[1].id], [p[2].id, p[3].id], day(1));
    m.score = score.to_string();
    m.status = MatchStatus::Completed;
    m
}

fn tiebreak(p: &[Player], winner: Option<Winner>) -> GameMatch {
    let mut m = played(p, "7-5");
    m.match_type = MatchType::Tiebreak;
    m.winner = winner;
    m
}

fn row<'a>(rows: &'a [RankingRow], id: PlayerId) -> &'a RankingRow {
    rows.iter().find(|r| r.player_id == id).unwrap()
}

#[test]
fn no_matches_gives_zeroed_rows_for_everyone() {
    let players = roster();
    let rows = compute_ranking(&players, &[]);
    assert_eq!(rows.len(), 4);
    for p in &players {
        let r = row(&rows, p.id);
        assert_eq!(r.points, 0.0);
        assert_eq!(r.played, 0);
        assert_eq!((r.wins, r.losses, r.draws), (0, 0, 0));
        assert_eq!((r.games_won, r.games_lost), (0, 0));
    }
}

#[test]
fn straight_set_win_credits_both_sides() {
    let players = roster();
    let rows = compute_ranking(&players, &[played(&players, "6-4 6-2")]);

    for p in &players[..2] {
        let r = row(&rows, p.id);
        assert!(approx(r.points, 8.0));
        assert_eq!((r.wins, r.losses, r.played), (1, 0, 1));
        assert_eq!((r.games_won, r.games_lost), (12, 6));
    }
    for p in &players[2..] {
        let r = row(&rows, p.id);
        assert!(approx(r.points, 1.2));
        assert_eq!((r.wins, r.losses, r.played), (0, 1, 1));
        assert_eq!((r.games_won, r.games_lost), (6, 12));
    }
    assert_eq!(rows[0].player_id, players[0].id);
    assert_eq!(rows[1].player_id, players[1].id);
}

#[test]
fn draw_counts_for_both_teams() {
    let players = roster();
    let rows = compute_ranking(&players, &[played(&players, "6-4 4-6")]);
    for p in &players {
        let r = row(&rows, p.id);
        assert_eq!(r.draws, 1);
        assert!(approx(r.points, 3.0));
    }
}

#[test]
fn tiebreak_gives_flat_points_and_no_games() {
    let players = roster();
    let rows = compute_ranking(&players, &[tiebreak(&players, Some(Winner::Team2))]);
    for p in &players[..2] {
        let r = row(&rows, p.id);
        assert_eq!(r.points, 0.0);
        assert_eq!((r.tie_breaks_won, r.tie_breaks_lost), (0, 1));
        assert_eq!((r.wins, r.losses), (0, 0));
        assert_eq!((r.games_won, r.games_lost), (0, 0));
        assert_eq!(r.played, 1);
    }
    for p in &players[2..] {
        let r = row(&rows, p.id);
        assert_eq!(r.points, 2.0);
        assert_eq!((r.tie_breaks_won, r.tie_breaks_lost), (1, 0));
        assert_eq!((r.games_won, r.games_lost), (0, 0));
    }
}

#[test]
fn tiebreak_without_team_winner_is_ignored() {
    let players = roster();
    let matches = [
        tiebreak(&players, None),
        tiebreak(&players, Some(Winner::Draw)),
    ];
    let rows = compute_ranking(&players, &matches);
    assert!(rows.iter().all(|r| r.played == 0 && r.points == 0.0));
}

#[test]
fn scheduled_and_empty_matches_are_ignored() {
    let players = roster();
    let mut scheduled = played(&players, "6-0 6-0");
    scheduled.status = MatchStatus::Scheduled;
    let empty = played(&players, "");
    let rows = compute_ranking(&players, &[scheduled, empty]);
    assert!(rows.iter().all(|r| r.played == 0));
}

#[test]
fn whitespace_score_is_a_scoreless_draw() {
    let players = roster();
    let rows = compute_ranking(&players, &[played(&players, "   ")]);
    for r in &rows {
        assert_eq!((r.played, r.draws, r.wins, r.losses), (1, 1, 0, 0));
        assert!(approx(r.points, 0.0));
    }
}

#[test]
fn huge_game_counts_saturate() {
    let players = roster();
    let matches = vec![
        played(&players, "99999999999-0"),
        played(&players, "99999999999-0"),
    ];
    let rows = compute_ranking(&players, &matches);
    let winner = row(&rows, players[0].id);
    assert_eq!(winner.games_won, u32::MAX);
    assert_eq!(winner.played, 2);
    assert_eq!(row(&rows, players[2].id).games_lost, u32::MAX);
}

#[test]
fn ranking_ignores_match_order() {
    let players = roster();
    let swapped = [players[0].clone(), players[2].clone(), players[1].clone(), players[3].clone()];
    let matches = vec![
        played(&players, "6-4 6-2"),
        played(&swapped, "6-4 3-6 7-5"),
        played(&players, "2-6 1-6"),
        tiebreak(&swapped, Some(Winner::Team1)),
        played(&swapped, "6-6"),
    ];
    let forward = compute_ranking(&players, &matches);
    let reversed: Vec<_> = matches.iter().rev().cloned().collect();
    let backward = compute_ranking(&players, &reversed);

    for p in &players {
        let (a, b) = (row(&forward, p.id), row(&backward, p.id));
        assert!(approx(a.points, b.points));
        assert_eq!((a.wins, a.losses, a.draws), (b.wins, b.losses, b.draws));
        assert_eq!((a.games_won, a.games_lost), (b.games_won, b.games_lost));
    }
    let order_f: Vec<_> = forward.iter().map(|r| r.player_id).collect();
    let order_b: Vec<_> = backward.iter().map(|r| r.player_id).collect();
    assert_eq!(order_f, order_b);
}

#[test]
fn deleted_players_are_dropped_but_teammates_still_count() {
    let players = roster();
    let m = played(&players, "6-4 6-2");
    let remaining: Vec<Player> = players[1..].to_vec();
    let rows = compute_ranking(&remaining, &[m]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.player_id != players[0].id));
    assert!(approx(row(&rows, players[1].id).points, 8.0));
}

#[test]
fn equal_points_sort_by_game_difference_then_name() {
    let players = roster();
    // 2-1 gives flat points, so the winners tie with the winners of another 2-1 with more games.
    let close = played(&players, "6-4 4-6 7-6");
    let rows = compute_ranking(&players, &[close]);
    assert_eq!(rows[0].name, "Anna");
    assert_eq!(rows[1].name, "Bruno");

    let swapped = [players[2].clone(), players[3].clone(), players[0].clone(), players[1].clone()];
    let wide = played(&swapped, "6-0 0-6 6-0");
    let rows = compute_ranking(&players, &[played(&players, "6-4 4-6 7-6"), wide]);
    // Everyone has 9 points; Carla and Dario have the better game difference.
    assert!(rows.iter().all(|r| approx(r.points, 9.0)));
    assert_eq!(rows[0].name, "Carla");
    assert_eq!(rows[1].name, "Dario");
    assert_eq!(rows[2].name, "Anna");
    assert_eq!(rows[3].name, "Bruno");
}

#[test]
fn csv_export_lists_rows_in_order() {
    let players = roster();
    let rows = compute_ranking(&players, &[played(&players, "6-4 6-2")]);
    let csv = ranking_csv(&rows).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("position,name,points,"));
    assert_eq!(lines[1], "1,Anna,8.0,1,1,0,0,12,6,0,0");
    assert_eq!(lines[3], "3,Carla,1.2,1,0,0,1,6,12,0,0");
}

#[test]
fn history_accumulates_in_date_order() {
    let players = roster();
    let mut later = played(&players, "6-4 6-2");
    later.date = day(10);
    let mut earlier = tiebreak(&players, Some(Winner::Team2));
    earlier.date = day(2);
    let mut pending = played(&players, "");
    pending.status = MatchStatus::Scheduled;

    let history = points_history(&players, &[later, pending, earlier]);
    assert_eq!(history.len(), 4);
    let anna = &history[0];
    assert_eq!(anna.points.len(), 3);
    assert!(approx(anna.points[1], 0.0));
    assert!(approx(anna.points[2], 8.0));
    let carla = &history[2];
    assert!(approx(carla.points[1], 2.0));
    assert!(approx(carla.points[2], 3.2));
}
