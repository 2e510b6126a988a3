//! Per-position attack map.
//!
//! Distinct from the static `AttackTables` in `attack.rs`/`magics.rs` (built once,
//! read-only): this map is rebuilt at the start of every move-generation call from the
//! current `Position`, pairing each occupied square with the squares it attacks
//! (`attacks_from`) and, inverted, the squares that attack it (`attacks_to`).

use crate::attack::AttackTables;
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::{Color, PieceType, Square};

/// `attacks_from[sq]` / `attacks_to[sq]`, indexed by square. A zero-entry array slot means
/// either the square is empty (for `attacks_from`) or unattacked (for `attacks_to`).
pub struct AttackMap {
    pub attacks_from: [Bitboard; 64],
    pub attacks_to: [Bitboard; 64],
}

impl AttackMap {
    /// Builds the attack map for the current position. Walks every occupied non-pawn square
    /// and ORs its piece-specific attack pattern into both maps; pawn captures are added
    /// separately since they aren't symmetric with other leapers. En-passant is modeled by
    /// treating the *victim* pawn's square as a target of the capturing pawn, not the
    /// diagonal landing square, so pin and check-evasion logic see the attacker correctly.
    pub fn build(position: &Position, tables: &AttackTables) -> Self {
        let mut attacks_from = [Bitboard(0); 64];
        let mut attacks_to = [Bitboard(0); 64];

        let occupancy = position.occupied_squares();

        for sq in Square::ALL {
            let Some(piece) = position.piece_on(sq) else { continue };

            let attacks = match piece.get_type() {
                PieceType::Pawn => tables.pawn_capture[piece.get_color().index()][sq.index()],
                PieceType::Knight => tables.knight[sq.index()],
                PieceType::King => tables.king[sq.index()],
                PieceType::Bishop => tables.magic_tables.bishop_attacks(sq, occupancy),
                PieceType::Rook => tables.magic_tables.rook_attacks(sq, occupancy),
                PieceType::Queen => tables.magic_tables.queen_attacks(sq, occupancy),
            };

            attacks_from[sq.index()] = attacks;
            for target in attacks {
                attacks_to[target.index()] |= sq.bb();
            }
        }

        // En-passant: the capturing pawn attacks the victim's square directly (not the
        // diagonal landing square), so a check or pin along that square is visible.
        if let Some(ep_target) = position.en_passant_square() {
            let victim_sq = if position.side_to_move() == Color::White { ep_target.south() } else { ep_target.north() };
            let capturer_color = position.side_to_move();
            let candidates = tables.pawn_capture[(!capturer_color).index()][victim_sq.index()]
                & position.piece(PieceType::Pawn)
                & position.color(capturer_color);
            for capturer in candidates {
                attacks_from[capturer.index()] |= victim_sq.bb();
                attacks_to[victim_sq.index()] |= capturer.bb();
            }
        }

        Self { attacks_from, attacks_to }
    }

    #[inline(always)]
    pub fn attacks_from(&self, sq: Square) -> Bitboard {
        self.attacks_from[sq.index()]
    }

    #[inline(always)]
    pub fn attacks_to(&self, sq: Square) -> Bitboard {
        self.attacks_to[sq.index()]
    }
}
