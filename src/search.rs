//! Iterative deepening negamax search with principal variation search (PVS).
//!
//! Grounded on the source's `alphabeta`/`search_alphabeta`: negamax-convention alpha-beta,
//! reordering the root move list by the previous iteration's best move, null-window search
//! for non-first moves with a full re-search on improvement, and small random jitter on
//! terminal mate scores so the search prefers whichever mating line it actually read first
//! over a nominally-equal deeper one.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::attack::AttackTables;
use crate::board::Position;
use crate::config::SearchConfig;
use crate::eval::eval_position;
use crate::movegen::generate_legal_moves;
use crate::moves::Move;

/// Best move found (in internal `Move` form — render with `san::to_san` for display),
/// its score from the root side-to-move's perspective, and the principal variation.
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub principal_variation: Vec<Move>,
}

/// Runs iterative deepening from depth 3 up to `config.max_depth`, stopping early once a
/// decisive (mate) score is found.
pub fn search(position: &mut Position, tables: &AttackTables, config: &SearchConfig) -> SearchResult {
    let root_moves = generate_legal_moves(position, tables);
    position.record_terminal_state(!root_moves.is_empty());
    if root_moves.is_empty() {
        let score = if position.in_check() { -config.mate_score } else { config.stalemate_score };
        return SearchResult { best_move: None, score, principal_variation: Vec::new() };
    }

    let mut rng = SmallRng::seed_from_u64(config.jitter_seed);
    let mut previous_best: Option<Move> = None;
    let mut result = SearchResult { best_move: None, score: 0, principal_variation: Vec::new() };

    for depth in 3..=config.max_depth {
        let root_moves = generate_legal_moves(position, tables);
        let mut ordered: Vec<Move> = root_moves.iter().copied().collect();

        if let Some(best) = previous_best {
            if let Some(idx) = ordered.iter().position(|&m| m == best) {
                let m = ordered.remove(idx);
                ordered.insert(0, m);
            }
        }

        let mut pv = Vec::new();
        let score = search_move_list(position, tables, config, &mut rng, depth, -config.infinity, config.infinity, ordered, &mut pv);

        previous_best = pv.first().copied();
        result = SearchResult { best_move: previous_best, score, principal_variation: pv };

        if result.score.abs() > config.mate_score / 2 {
            break;
        }
    }

    result
}

/// One alpha-beta node: evaluate at the horizon, otherwise generate and search moves.
fn negamax(
    position: &mut Position,
    tables: &AttackTables,
    config: &SearchConfig,
    rng: &mut SmallRng,
    depth: u8,
    alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
) -> i32 {
    if depth == 0 {
        return eval_position(position);
    }

    let moves = generate_legal_moves(position, tables);
    let ordered: Vec<Move> = moves.iter().copied().collect();
    search_move_list(position, tables, config, rng, depth, alpha, beta, ordered, pv)
}

/// Shared by the root (which reorders its move list first) and interior nodes: a terminal
/// position (no legal moves) scores as mate-with-jitter or stalemate; otherwise PVS over
/// `moves`, which is assumed already ordered captures-first (root additionally moves the
/// previous iteration's best move to the front).
#[allow(clippy::too_many_arguments)]
fn search_move_list(
    position: &mut Position,
    tables: &AttackTables,
    config: &SearchConfig,
    rng: &mut SmallRng,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    moves: Vec<Move>,
    pv: &mut Vec<Move>,
) -> i32 {
    if moves.is_empty() {
        return if position.king_in_check(position.side_to_move()) {
            let jitter = (rng.next_u32() % 25 + 1) as i32;
            -(config.mate_score + jitter)
        } else {
            config.stalemate_score
        };
    }

    let mut principal_variation_found = false;

    for m in moves {
        position.make(m);

        let mut child_pv = Vec::new();
        let val = if principal_variation_found {
            let mut v = -negamax(position, tables, config, rng, depth - 1, -alpha - 1, -alpha, &mut child_pv);
            if v > alpha && v < beta {
                child_pv.clear();
                v = -negamax(position, tables, config, rng, depth - 1, -beta, -alpha, &mut child_pv);
            }
            v
        } else {
            -negamax(position, tables, config, rng, depth - 1, -beta, -alpha, &mut child_pv)
        };

        position.unmake(m);

        if val >= beta {
            return beta;
        }

        if val > alpha {
            principal_variation_found = true;
            alpha = val;
            pv.clear();
            pv.push(m);
            pv.extend(child_pv);
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_no_moves_and_a_winner_on_mate() {
        // White to move and mated by the rook on d1 (defended by the g4 bishop, so it
        // can't be captured, and the king has no flight square off the back rank/diagonal).
        let mut pos = Position::from_fen("1k6/pp3R2/6pp/4p3/2B3b1/4Q3/PPP2B2/3rK3 w - - 0 1").unwrap();
        let tables = AttackTables::new();
        let config = SearchConfig::default();

        let result = search(&mut pos, &tables, &config);

        assert!(result.best_move.is_none());
        assert_eq!(result.score, -config.mate_score);
        assert!(pos.in_check());
        assert_eq!(pos.winner(), Some(crate::types::Color::Black));
    }

    #[test]
    fn finds_mate_in_one() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let tables = AttackTables::new();
        let config = SearchConfig { max_depth: 3, ..SearchConfig::default() };

        let result = search(&mut pos, &tables, &config);
        assert!(result.score > config.mate_score / 2);
        assert_eq!(result.best_move.map(|m| m.to()), Some(crate::types::Square::D8));
    }
}
