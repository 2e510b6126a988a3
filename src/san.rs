//! Short Algebraic Notation rendering and the regular-notation move maps.
//!
//! Grounded on `reg2san`/`get_move_list` in the source this core is distilled from: a move's
//! SAN form needs no state beyond the move itself and its position *except* for
//! disambiguation, which requires knowing what else could have reached the same square — so
//! `to_san` takes the full legal move list alongside the one move being rendered.

use std::collections::HashMap;

use crate::board::Position;
use crate::movegen::MoveList;
use crate::moves::Move;
use crate::types::PieceType;

fn piece_letter(kind: PieceType) -> Option<char> {
    match kind {
        PieceType::Pawn => None,
        PieceType::Knight => Some('N'),
        PieceType::Bishop => Some('B'),
        PieceType::Rook => Some('R'),
        PieceType::Queen => Some('Q'),
        PieceType::King => Some('K'),
    }
}

/// Renders `m` (assumed to be one of `legal_moves`, played from `position`) in SAN: piece
/// letter (omitted for pawns) + disambiguator (file if another same-kind piece attacks the
/// same destination from a different file, rank if same file but different rank, both if
/// neither alone disambiguates) + `x` for captures + destination square + `=` for promotion.
/// Castling renders as `O-O`/`O-O-O`.
pub fn to_san(position: &Position, legal_moves: &MoveList, m: Move) -> String {
    if m.is_king_castle() {
        return "O-O".to_string();
    }
    if m.is_castling() {
        return "O-O-O".to_string();
    }

    let mover = position.piece_on_unchecked(m.from());
    let kind = mover.get_type();
    let mut san = String::new();

    match piece_letter(kind) {
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguator(position, legal_moves, m, kind));
        }
        None if m.is_capture() => {
            // Pawn captures are disambiguated by origin file regardless of conflicts.
            san.push(m.from().to_string().chars().next().unwrap());
        }
        None => {}
    }

    if m.is_capture() {
        san.push('x');
    }
    san.push_str(&m.to().to_string());

    if m.is_promotion() {
        san.push('=');
    }

    san
}

/// File, rank, or both, whichever is the minimal disambiguator among other legal moves of
/// the same piece kind and destination square. Empty when `m` is already unambiguous.
fn disambiguator(position: &Position, legal_moves: &MoveList, m: Move, kind: PieceType) -> String {
    let rivals: Vec<Move> = legal_moves
        .iter()
        .copied()
        .filter(|other| {
            *other != m
                && other.to() == m.to()
                && !other.is_castling()
                && position.piece_on_unchecked(other.from()).get_type() == kind
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|other| other.from().file() == m.from().file());
    let same_rank = rivals.iter().any(|other| other.from().rank() == m.from().rank());

    let from = m.from().to_string();
    if !same_file {
        from[0..1].to_string()
    } else if !same_rank {
        from[1..2].to_string()
    } else {
        from
    }
}

/// Builds the two lookup maps the driver needs: `{regular_move_name -> Move}` (e.g.
/// `"e2e4"`) and `{regular_move_name -> SAN_name}` (e.g. `"e2e4" -> "e4"`), one entry per
/// legal move. Regular-notation keys are already unique (from+to+promotion uniquely
/// identifies a move), so no collision handling is needed there — only SAN rendering itself
/// needs disambiguation, which `to_san` already resolves.
pub fn move_map(position: &Position, legal_moves: &MoveList) -> (HashMap<String, Move>, HashMap<String, String>) {
    let mut moves = HashMap::new();
    let mut san_moves = HashMap::new();

    for m in legal_moves.iter().copied() {
        let regular = m.to_string();
        san_moves.insert(regular.clone(), to_san(position, legal_moves, m));
        moves.insert(regular, m);
    }

    (moves, san_moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::AttackTables;
    use crate::movegen::generate_legal_moves;

    #[test]
    fn opening_knight_moves_are_disambiguated_by_file() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K1N1 w - - 0 1").unwrap();
        let tables = AttackTables::new();
        let moves = generate_legal_moves(&pos, &tables);

        let to_f3 = moves.iter().copied().filter(|m| m.to() == crate::types::Square::F3).collect::<Vec<_>>();
        assert_eq!(to_f3.len(), 2);

        let sans: Vec<String> = to_f3.iter().map(|&m| to_san(&pos, &moves, m)).collect();
        assert!(sans.contains(&"Naf3".to_string()));
        assert!(sans.contains(&"Ngf3".to_string()));
    }

    #[test]
    fn pawn_capture_keeps_origin_file() {
        let pos = Position::from_fen("4k3/8/8/8/3p4/4P3/8/4K3 w - - 0 1").unwrap();
        let tables = AttackTables::new();
        let moves = generate_legal_moves(&pos, &tables);
        let capture = moves.iter().copied().find(|m| m.is_capture()).unwrap();
        assert_eq!(to_san(&pos, &moves, capture), "exd4");
    }
}
