//! Legal move generation.
//!
//! Generates the full legal move list for the side to move: normal generation with pin
//! masks when not in check, check evasion (capture-the-checker / move-the-king / block)
//! when in check, castling, en passant (including the rare double-pawn-removal pin edge
//! case), and promotions. Captures are generated before quiet moves so the list is already
//! ordered the way the searcher wants it.
//!
//! Target-square enumeration for knights, kings and sliders goes through the `Attacker`
//! trait and its monomorphized per-color/per-capture-mode dispatch; pin masking and check
//! handling are layered on top of it.

use crate::attack::AttackTables;
use crate::attackmap::AttackMap;
use crate::bitboard::Bitboard;
use crate::board::{self, Position};
use crate::moves::{Move, MoveKind};
use crate::types::{Color, PieceType, Square};

/// Container for moves generated for a position.
///
/// Preallocates space for up to 256 moves to avoid dynamic allocation.
/// Use `push()` to add moves in the inner loops of move generation.
pub struct MoveList {
    moves: [Move; 256],
    count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self { moves: [Move::NULL_MOVE; 256], count: 0 }
    }

    pub fn push(&mut self, m: Move) {
        self.moves[self.count] = m;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves[..self.count].iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for pieces that can generate pseudo-legal attacks.
///
/// Provides a single method `get_attacks()` returning a bitboard of target squares.
/// Generic over `P: Attacker` allows compile-time specialization and zero-cost abstraction.
/// `TYPE` is the corresponding `PieceType`. The king isn't implemented here: its move
/// generation needs the occupancy-with-king-removed treatment in `generate_king_moves`
/// instead of a plain attack lookup, so it doesn't fit this trait's shape.
pub trait Attacker {
    const TYPE: PieceType;
    fn get_attacks(from: Square, position: &Position, attack_tables: &AttackTables) -> Bitboard;
}

/// Knight move generation.
pub struct Caval;
impl Attacker for Caval {
    const TYPE: PieceType = PieceType::Knight;

    #[inline(always)]
    fn get_attacks(from: Square, _: &Position, attack_tables: &AttackTables) -> Bitboard {
        attack_tables.knight[from.index()]
    }
}

/// Rook move generation using magic bitboards.
pub struct Tor;
impl Attacker for Tor {
    const TYPE: PieceType = PieceType::Rook;

    #[inline(always)]
    fn get_attacks(from: Square, position: &Position, attack_tables: &AttackTables) -> Bitboard {
        attack_tables.magic_tables.rook_attacks(from, position.occupied_squares())
    }
}

/// Bishop move generation using magic bitboards.
pub struct Alfè;
impl Attacker for Alfè {
    const TYPE: PieceType = PieceType::Bishop;

    #[inline(always)]
    fn get_attacks(from: Square, position: &Position, attack_tables: &AttackTables) -> Bitboard {
        attack_tables.magic_tables.bishop_attacks(from, position.occupied_squares())
    }
}

/// Queen move generation as a union of rook and bishop attacks.
pub struct Argina;
impl Attacker for Argina {
    const TYPE: PieceType = PieceType::Queen;

    #[inline(always)]
    fn get_attacks(from: Square, position: &Position, attack_tables: &AttackTables) -> Bitboard {
        attack_tables.magic_tables.queen_attacks(from, position.occupied_squares())
    }
}

/// Entry point: the full legal move list for the side to move. An empty list means mate if
/// the side is in check, stalemate otherwise — the caller (typically `search.rs`) is
/// responsible for interpreting that.
pub fn generate_legal_moves(position: &Position, tables: &AttackTables) -> MoveList {
    let mut moves = MoveList::new();
    let side = position.side_to_move();

    let attack_map = AttackMap::build(position, tables);

    let mut king_bb = position.piece(PieceType::King) & position.color(side);
    debug_assert!(king_bb != Bitboard(0), "side to move has no king on the board");
    let king_sq = Square::new(king_bb.lsb() as u8);

    let checkers = attack_map.attacks_to(king_sq) & position.color(!side);

    if checkers != Bitboard(0) {
        generate_check_evasions(position, tables, &attack_map, king_sq, checkers, &mut moves);
    } else {
        generate_normal_moves(position, tables, king_sq, &mut moves);
    }

    moves
}

/// The squares a friendly piece at `sq` may legally move to while respecting an existing
/// pin on the king at `king_sq`. Returns all-ones when `sq` isn't pinned. Only valid to call
/// when the side to move isn't currently in check (see `spec.md` §4.D.ii): detection removes
/// `sq` from the occupancy and checks whether an enemy slider now reaches the king, which
/// assumes the king wasn't already exposed before the removal.
fn pin_mask(position: &Position, tables: &AttackTables, sq: Square, king_sq: Square) -> Bitboard {
    if sq == king_sq {
        return Bitboard(u64::MAX);
    }

    let orthogonal = shares_orthogonal(tables, sq, king_sq);
    let diagonal = shares_diagonal(tables, sq, king_sq);
    if !orthogonal && !diagonal {
        return Bitboard(u64::MAX);
    }

    let side = position.side_to_move();
    let enemy = position.color(!side);
    let occupancy_without_sq = position.occupied_squares() & !sq.bb();

    let pinner = if orthogonal {
        tables.magic_tables.rook_attacks(king_sq, occupancy_without_sq) & (position.piece(PieceType::Rook) | position.piece(PieceType::Queen)) & enemy
    } else {
        tables.magic_tables.bishop_attacks(king_sq, occupancy_without_sq) & (position.piece(PieceType::Bishop) | position.piece(PieceType::Queen)) & enemy
    };

    if pinner != Bitboard(0) { tables.line_through(sq, king_sq).unwrap_or(Bitboard(u64::MAX)) } else { Bitboard(u64::MAX) }
}

fn shares_orthogonal(tables: &AttackTables, a: Square, b: Square) -> bool {
    (tables.rank_line[a.index()] & b.bb() != Bitboard(0)) || (tables.file_line[a.index()] & b.bb() != Bitboard(0))
}

fn shares_diagonal(tables: &AttackTables, a: Square, b: Square) -> bool {
    (tables.diag_ne_line[a.index()] & b.bb() != Bitboard(0)) || (tables.diag_nw_line[a.index()] & b.bb() != Bitboard(0))
}

/// The squares strictly between two aligned squares, via the classic
/// rook/bishop-attacks-with-a-single-blocker trick: a ray from `a` that stops exactly at `b`
/// (and vice versa) covers exactly the in-between squares when intersected. Only meaningful
/// when `a` and `b` are known to share a rank/file (orthogonal) or diagonal.
fn squares_between(tables: &AttackTables, a: Square, b: Square, orthogonal: bool) -> Bitboard {
    if orthogonal {
        tables.magic_tables.rook_attacks(a, b.bb()) & tables.magic_tables.rook_attacks(b, a.bb())
    } else {
        tables.magic_tables.bishop_attacks(a, b.bb()) & tables.magic_tables.bishop_attacks(b, a.bb())
    }
}

fn generate_normal_moves(position: &Position, tables: &AttackTables, king_sq: Square, moves: &mut MoveList) {
    if position.side_to_move() == Color::White {
        generate_normal_moves_for::<true>(position, tables, king_sq, moves);
    } else {
        generate_normal_moves_for::<false>(position, tables, king_sq, moves);
    }
}

fn generate_normal_moves_for<const WHITE: bool>(position: &Position, tables: &AttackTables, king_sq: Square, moves: &mut MoveList) {
    // Captures first: the generator places them at the front of the list by construction.
    generate_piece_moves::<Caval, WHITE, true>(position, tables, king_sq, moves);
    generate_piece_moves::<Alfè, WHITE, true>(position, tables, king_sq, moves);
    generate_piece_moves::<Tor, WHITE, true>(position, tables, king_sq, moves);
    generate_piece_moves::<Argina, WHITE, true>(position, tables, king_sq, moves);
    generate_pawn_captures::<WHITE>(position, tables, king_sq, moves);
    generate_king_moves::<WHITE, true>(position, tables, moves);

    // Quiet moves.
    generate_piece_moves::<Caval, WHITE, false>(position, tables, king_sq, moves);
    generate_piece_moves::<Alfè, WHITE, false>(position, tables, king_sq, moves);
    generate_piece_moves::<Tor, WHITE, false>(position, tables, king_sq, moves);
    generate_piece_moves::<Argina, WHITE, false>(position, tables, king_sq, moves);
    generate_pawn_quiets::<WHITE>(position, tables, king_sq, moves);
    generate_king_moves::<WHITE, false>(position, tables, moves);
    generate_castling(position, moves);
}

/// Generic move generation for leaper and sliding pieces (not pawns, not the king).
///
/// # Parameters
/// - `P: Attacker` — piece type to generate moves for (generic, monomorphized)
/// - `WHITE: bool` — generate moves for white (true) or black (false)
/// - `CAPTURE: bool` — if true, only generate captures; otherwise only quiet moves
#[inline(always)]
fn generate_piece_moves<P: Attacker, const WHITE: bool, const CAPTURE: bool>(
    position: &Position,
    tables: &AttackTables,
    king_sq: Square,
    moves: &mut MoveList,
) {
    let us = if WHITE { position.color(Color::White) } else { position.color(Color::Black) };
    let them = if WHITE { position.color(Color::Black) } else { position.color(Color::White) };

    let mut attackers = position.piece(P::TYPE) & us;
    let target_mask = if CAPTURE { them } else { position.empty_squares() };

    while attackers != Bitboard(0) {
        let from = Square::new(attackers.pop_lsb() as u8);
        let mask = pin_mask(position, tables, from, king_sq);
        let attacks = P::get_attacks(from, position, tables) & target_mask & mask;

        for to in attacks {
            if CAPTURE {
                moves.push(Move::new_special(from, to, MoveKind::Capture));
            } else {
                moves.push(Move::new_normal(from, to));
            }
        }
    }
}

/// King moves, honoring self-check avoidance including discovered attacks: the king is
/// removed from the occupancy before re-testing each destination, so a slider that was only
/// blocked by the king's own square is correctly seen as attacking the destination.
fn generate_king_moves<const WHITE: bool, const CAPTURE: bool>(position: &Position, tables: &AttackTables, moves: &mut MoveList) {
    let side = if WHITE { Color::White } else { Color::Black };
    let mut king_bb = position.piece(PieceType::King) & position.color(side);
    let from = Square::new(king_bb.lsb() as u8);

    let target_mask = if CAPTURE { position.color(!side) } else { position.empty_squares() };
    let occupancy_without_king = position.occupied_squares() & !from.bb();
    let attacks = tables.king[from.index()] & target_mask;

    for to in attacks {
        if !position.is_square_attacked_with_occupancy(to, !side, occupancy_without_king) {
            if CAPTURE {
                moves.push(Move::new_special(from, to, MoveKind::Capture));
            } else {
                moves.push(Move::new_normal(from, to));
            }
        }
    }
}

/// Pawn capture moves (diagonal captures, en passant, and promotion-captures).
fn generate_pawn_captures<const WHITE: bool>(position: &Position, tables: &AttackTables, king_sq: Square, moves: &mut MoveList) {
    let our_color = if WHITE { Color::White } else { Color::Black };
    let mut pawns = position.piece(PieceType::Pawn) & position.color(our_color);

    let them = if WHITE { position.color(Color::Black) } else { position.color(Color::White) };
    let promotion_rank = if WHITE { Bitboard::rank_8() } else { Bitboard::rank_1() };
    let ep_square = position.en_passant_square();
    let ep_bb = ep_square.map(|sq| sq.bb()).unwrap_or(Bitboard(0));

    while pawns != Bitboard(0) {
        let from = Square::new(pawns.pop_lsb() as u8);
        let mask = pin_mask(position, tables, from, king_sq);
        let attacks = tables.pawn_capture[our_color.index()][from.index()] & (them | ep_bb) & mask;

        for to in attacks {
            if ep_square == Some(to) {
                // En-passant pin edge case: removing both the capturing pawn and its victim
                // can expose the king along the vacated rank even though neither pawn, taken
                // alone, was individually pinned.
                let victim = if WHITE { to.south() } else { to.north() };
                let occ_after = (position.occupied_squares() & !from.bb() & !victim.bb()) | to.bb();
                if !position.is_square_attacked_with_occupancy(king_sq, !our_color, occ_after) {
                    moves.push(Move::new_special(from, to, MoveKind::EnPassant));
                }
            } else if promotion_rank & to.bb() != Bitboard(0) {
                moves.push(Move::new_special(from, to, MoveKind::PromotionCaptureQ));
                moves.push(Move::new_special(from, to, MoveKind::PromotionCaptureR));
                moves.push(Move::new_special(from, to, MoveKind::PromotionCaptureB));
                moves.push(Move::new_special(from, to, MoveKind::PromotionCaptureN));
            } else {
                moves.push(Move::new_special(from, to, MoveKind::Capture));
            }
        }
    }
}

/// Pawn quiet moves: single and double pushes, including promotions.
fn generate_pawn_quiets<const WHITE: bool>(position: &Position, tables: &AttackTables, king_sq: Square, moves: &mut MoveList) {
    let our_color = if WHITE { Color::White } else { Color::Black };
    let mut pawns = position.piece(PieceType::Pawn) & position.color(our_color);

    let pawn_pushes = &tables.pawn_push[our_color.index()];
    let pawn_double = &tables.pawn_double_push[our_color.index()];
    let promotion_rank = if WHITE { Bitboard::rank_8() } else { Bitboard::rank_1() };
    let empty_bb = position.empty_squares();

    while pawns != Bitboard(0) {
        let from = Square::new(pawns.pop_lsb() as u8);
        let mask = pin_mask(position, tables, from, king_sq);

        let mut single = pawn_pushes[from.index()] & empty_bb & mask;
        if single != Bitboard(0) {
            let to = Square::new(single.pop_lsb() as u8);
            if promotion_rank & to.bb() != Bitboard(0) {
                moves.push(Move::new_special(from, to, MoveKind::PromotionQ));
                moves.push(Move::new_special(from, to, MoveKind::PromotionR));
                moves.push(Move::new_special(from, to, MoveKind::PromotionB));
                moves.push(Move::new_special(from, to, MoveKind::PromotionN));
            } else {
                moves.push(Move::new_normal(from, to));

                let mut double = pawn_double[from.index()] & empty_bb & mask;
                if double != Bitboard(0) {
                    let to2 = Square::new(double.pop_lsb() as u8);
                    moves.push(Move::new_special(from, to2, MoveKind::DoublePush));
                }
            }
        }
    }
}

fn generate_castling(position: &Position, moves: &mut MoveList) {
    let side = position.side_to_move();
    let rights = position.castling_rights();
    let occ = position.occupied_squares();

    if side == Color::White {
        if rights & board::WK != 0
            && occ & Bitboard(0x0000_0000_0000_0060) == Bitboard(0)
            && !position.is_square_attacked(Square::E1, Color::Black)
            && !position.is_square_attacked(Square::F1, Color::Black)
            && !position.is_square_attacked(Square::G1, Color::Black)
        {
            moves.push(Move::new_special(Square::E1, Square::G1, MoveKind::KingCastle));
        }
        if rights & board::WQ != 0
            && occ & Bitboard(0x0000_0000_0000_000E) == Bitboard(0)
            && !position.is_square_attacked(Square::E1, Color::Black)
            && !position.is_square_attacked(Square::D1, Color::Black)
            && !position.is_square_attacked(Square::C1, Color::Black)
        {
            moves.push(Move::new_special(Square::E1, Square::C1, MoveKind::QueenCastle));
        }
    } else {
        if rights & board::BK != 0
            && occ & Bitboard(0x6000_0000_0000_0000) == Bitboard(0)
            && !position.is_square_attacked(Square::E8, Color::White)
            && !position.is_square_attacked(Square::F8, Color::White)
            && !position.is_square_attacked(Square::G8, Color::White)
        {
            moves.push(Move::new_special(Square::E8, Square::G8, MoveKind::KingCastle));
        }
        if rights & board::BQ != 0
            && occ & Bitboard(0x0E00_0000_0000_0000) == Bitboard(0)
            && !position.is_square_attacked(Square::E8, Color::White)
            && !position.is_square_attacked(Square::D8, Color::White)
            && !position.is_square_attacked(Square::C8, Color::White)
        {
            moves.push(Move::new_special(Square::E8, Square::C8, MoveKind::QueenCastle));
        }
    }
}

fn generate_check_evasions(
    position: &Position,
    tables: &AttackTables,
    attack_map: &AttackMap,
    king_sq: Square,
    checkers: Bitboard,
    moves: &mut MoveList,
) {
    let double_check = checkers.popcnt() >= 2;

    if !double_check {
        let mut single_checker = checkers;
        let checker_sq = Square::new(single_checker.pop_lsb() as u8);
        generate_checker_captures(position, tables, attack_map, king_sq, checker_sq, moves);
        generate_block_moves(position, tables, attack_map, king_sq, checker_sq, moves);
    }

    generate_king_evasions(position, tables, king_sq, checkers, moves);
}

/// Any friendly piece (other than the king) that attacks the checking piece's square may
/// capture it, subject to its own pin mask; pawns additionally cover the en-passant case
/// where the checker just played a double push.
fn generate_checker_captures(
    position: &Position,
    tables: &AttackTables,
    attack_map: &AttackMap,
    king_sq: Square,
    checker_sq: Square,
    moves: &mut MoveList,
) {
    let side = position.side_to_move();
    let king_bb = position.piece(PieceType::King) & position.color(side);
    let attackers = attack_map.attacks_to(checker_sq) & position.color(side) & !king_bb;

    for from in attackers {
        let mask = pin_mask(position, tables, from, king_sq);
        if mask & checker_sq.bb() == Bitboard(0) {
            continue;
        }

        let piece = position.piece_on_unchecked(from);
        if piece.get_type() != PieceType::Pawn {
            moves.push(Move::new_special(from, checker_sq, MoveKind::Capture));
            continue;
        }

        let checker_piece = position.piece_on_unchecked(checker_sq);
        if checker_piece.get_type() == PieceType::Pawn {
            if let Some(ep) = position.en_passant_square() {
                let victim = if side == Color::White { ep.south() } else { ep.north() };
                if victim == checker_sq {
                    let occ_after = (position.occupied_squares() & !from.bb() & !checker_sq.bb()) | ep.bb();
                    if !position.is_square_attacked_with_occupancy(king_sq, !side, occ_after) {
                        moves.push(Move::new_special(from, ep, MoveKind::EnPassant));
                    }
                    continue;
                }
            }
        }

        let promotion_rank = if side == Color::White { Bitboard::rank_8() } else { Bitboard::rank_1() };
        if promotion_rank & checker_sq.bb() != Bitboard(0) {
            moves.push(Move::new_special(from, checker_sq, MoveKind::PromotionCaptureQ));
            moves.push(Move::new_special(from, checker_sq, MoveKind::PromotionCaptureR));
            moves.push(Move::new_special(from, checker_sq, MoveKind::PromotionCaptureB));
            moves.push(Move::new_special(from, checker_sq, MoveKind::PromotionCaptureN));
        } else {
            moves.push(Move::new_special(from, checker_sq, MoveKind::Capture));
        }
    }
}

/// King moves out of check: cannot step onto an attacked square (checked with the king
/// removed from the occupancy, to see through its own vacated square), and cannot step to
/// another square on a sliding checker's attack line unless that move captures the checker.
fn generate_king_evasions(position: &Position, tables: &AttackTables, king_sq: Square, checkers: Bitboard, moves: &mut MoveList) {
    let side = position.side_to_move();
    let occupancy_without_king = position.occupied_squares() & !king_sq.bb();
    let target_mask = position.color(!side) | position.empty_squares();
    let destinations = tables.king[king_sq.index()] & target_mask;

    let single_checker = if checkers.popcnt() == 1 {
        let mut c = checkers;
        Some(Square::new(c.pop_lsb() as u8))
    } else {
        None
    };

    for to in destinations {
        if position.is_square_attacked_with_occupancy(to, !side, occupancy_without_king) {
            continue;
        }

        if let Some(checker_sq) = single_checker {
            if to != checker_sq {
                let checker_kind = position.piece_on_unchecked(checker_sq).get_type();
                let is_slider = matches!(checker_kind, PieceType::Rook | PieceType::Bishop | PieceType::Queen);
                if is_slider {
                    if let Some(line) = tables.line_through(king_sq, checker_sq) {
                        if line & to.bb() != Bitboard(0) {
                            continue;
                        }
                    }
                }
            }
        }

        let is_capture = position.color(!side) & to.bb() != Bitboard(0);
        if is_capture {
            moves.push(Move::new_special(king_sq, to, MoveKind::Capture));
        } else {
            moves.push(Move::new_normal(king_sq, to));
        }
    }
}

/// Blocking moves: only possible against a single sliding checker. Enumerates the squares
/// strictly between king and checker and, for each, every friendly non-king piece that can
/// land there (respecting pin masks), plus pawn single/double pushes.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::AttackTables;
    use crate::san::to_san;

    fn legal_sans(position: &Position, tables: &AttackTables) -> Vec<String> {
        let moves = generate_legal_moves(position, tables);
        moves.iter().map(|&m| to_san(position, &moves, m)).collect()
    }

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let tables = AttackTables::new();
        let pos = Position::new();
        assert_eq!(generate_legal_moves(&pos, &tables).count(), 20);
    }

    #[test]
    fn pinned_rook_pawn_cannot_move() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("4r1k1/p4pp1/3q3p/5P2/4b2Q/7P/P1r3PK/4RR2 w - - 0 1").unwrap();

        let mut sans = legal_sans(&pos, &tables);
        sans.sort();
        let mut expected = vec!["Qf4", "Rf4", "Qg3", "Kg1", "Kh1"];
        expected.sort();
        assert_eq!(sans, expected);
    }

    #[test]
    fn deep_pinned_queen_stays_on_file() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("rnbqk2r/ppp2ppp/4p3/8/6n1/6P1/PbPQ1PBP/RNBK2NR w - - 0 1").unwrap();

        let moves = generate_legal_moves(&pos, &tables);
        let queen_moves: Vec<Square> =
            moves.iter().copied().filter(|m| pos.piece_on_unchecked(m.from()).get_type() == PieceType::Queen).map(|m| m.to()).collect();

        for sq in [Square::D3, Square::D4, Square::D5, Square::D6, Square::D7, Square::D8] {
            assert!(queen_moves.contains(&sq), "expected queen to reach {sq}");
        }
        assert_eq!(queen_moves.len(), 6);
    }

    #[test]
    fn both_castling_rights_available_and_applied() {
        let tables = AttackTables::new();
        let mut pos = Position::from_fen("1rb2rk1/6p1/1pqn1pBp/3p4/5Q2/1NP3PP/8/R3K2R w KQ - 0 1").unwrap();

        let moves = generate_legal_moves(&pos, &tables);
        assert!(moves.iter().any(|m| m.is_king_castle()));
        assert!(moves.iter().any(|m| m.is_castling() && !m.is_king_castle()));

        let king_side = *moves.iter().find(|m| m.is_king_castle()).unwrap();
        pos.make(king_side);
        assert_eq!(pos.piece_on_unchecked(Square::G1).get_type(), PieceType::King);
        assert_eq!(pos.piece_on_unchecked(Square::F1).get_type(), PieceType::Rook);
        pos.unmake(king_side);

        let queen_side = *moves.iter().find(|m| m.is_castling() && !m.is_king_castle()).unwrap();
        pos.make(queen_side);
        assert_eq!(pos.piece_on_unchecked(Square::C1).get_type(), PieceType::King);
        assert_eq!(pos.piece_on_unchecked(Square::D1).get_type(), PieceType::Rook);
        assert_eq!(pos.piece_on_unchecked(Square::H1).get_type(), PieceType::Rook);
        pos.unmake(queen_side);
    }
}

fn generate_block_moves(
    position: &Position,
    tables: &AttackTables,
    attack_map: &AttackMap,
    king_sq: Square,
    checker_sq: Square,
    moves: &mut MoveList,
) {
    let side = position.side_to_move();
    let checker_kind = position.piece_on_unchecked(checker_sq).get_type();
    if !matches!(checker_kind, PieceType::Rook | PieceType::Bishop | PieceType::Queen) {
        return;
    }

    let orthogonal = match checker_kind {
        PieceType::Rook => true,
        PieceType::Bishop => false,
        _ => shares_orthogonal(tables, king_sq, checker_sq),
    };
    let between = squares_between(tables, king_sq, checker_sq, orthogonal);
    if between == Bitboard(0) {
        return;
    }

    let king_bb = position.piece(PieceType::King) & position.color(side);
    let our_pawns = position.piece(PieceType::Pawn) & position.color(side);
    let promotion_rank = if side == Color::White { Bitboard::rank_8() } else { Bitboard::rank_1() };

    for e in between {
        let blockers = attack_map.attacks_to(e) & position.color(side) & !king_bb & !our_pawns;
        for from in blockers {
            if pin_mask(position, tables, from, king_sq) & e.bb() != Bitboard(0) {
                moves.push(Move::new_normal(from, e));
            }
        }

        for from in our_pawns {
            let mask = pin_mask(position, tables, from, king_sq);
            if mask & e.bb() == Bitboard(0) {
                continue;
            }

            let single = tables.pawn_push[side.index()][from.index()];
            if single & e.bb() != Bitboard(0) {
                if promotion_rank & e.bb() != Bitboard(0) {
                    moves.push(Move::new_special(from, e, MoveKind::PromotionQ));
                    moves.push(Move::new_special(from, e, MoveKind::PromotionR));
                    moves.push(Move::new_special(from, e, MoveKind::PromotionB));
                    moves.push(Move::new_special(from, e, MoveKind::PromotionN));
                } else {
                    moves.push(Move::new_normal(from, e));
                }
                continue;
            }

            let double = tables.pawn_double_push[side.index()][from.index()];
            if double & e.bb() != Bitboard(0) && single & position.empty_squares() != Bitboard(0) {
                moves.push(Move::new_special(from, e, MoveKind::DoublePush));
            }
        }
    }
}
