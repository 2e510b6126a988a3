//! Attack table generation.
//!
//! This module generates attack look-up tables for knights, kings and pawns,
//! plus the full-line ray masks (rank/file/diagonal) used by pin detection.
//! Tables provide possible moves for a given piece type and square, queried
//! via `.index()` on the `Square`/`Color` key (plain arrays can't implement
//! `Index<Square>` directly — neither the trait nor the array type is local).
//!
//! Sliding pieces are handled differently (in magics.rs) because of board occupancy.

use crate::bitboard::Bitboard;
use crate::magics::MagicTables;
use crate::types::{Color, Square};

/// Contains the attack look-up tables per piece, plus static ray geometry.
pub struct AttackTables {
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    pub pawn_capture: [[Bitboard; 64]; 2],
    pub pawn_push: [[Bitboard; 64]; 2],
    pub pawn_double_push: [[Bitboard; 64]; 2],

    /// Full rank through each square, for pin detection along ranks.
    pub rank_line: [Bitboard; 64],
    /// Full file through each square, for pin detection along files.
    pub file_line: [Bitboard; 64],
    /// Full a1-h8-direction diagonal through each square.
    pub diag_ne_line: [Bitboard; 64],
    /// Full a8-h1-direction diagonal through each square.
    pub diag_nw_line: [Bitboard; 64],

    pub magic_tables: MagicTables,
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [(2, 1), (2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2), (-2, 1), (-2, -1)];
const KING_DELTAS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

impl AttackTables {
    pub fn new() -> Self {
        let mut knight = [Bitboard(0); 64];
        let mut king = [Bitboard(0); 64];
        let mut pawn_capture = [[Bitboard(0); 64]; 2]; //Color-dependent
        let mut pawn_push = [[Bitboard(0); 64]; 2]; //Color-dependent
        let mut pawn_double_push = [[Bitboard(0); 64]; 2]; //Color-dependent

        let mut rank_line = [Bitboard(0); 64];
        let mut file_line = [Bitboard(0); 64];
        let mut diag_ne_line = [Bitboard(0); 64];
        let mut diag_nw_line = [Bitboard(0); 64];

        // Initializes the attack table for each square
        for sq in Square::ALL {
            let from_rank = sq.rank() as i8;
            let from_file = sq.file() as i8;

            // ****************** KNIGHT ******************
            for (delta_rank, delta_file) in KNIGHT_DELTAS {
                let to_rank = from_rank + delta_rank;
                let to_file = from_file + delta_file;

                if (0..8).contains(&to_rank) && (0..8).contains(&to_file) {
                    let to = Square::new((to_rank * 8 + to_file) as u8);
                    knight[sq.index()] |= to.bb();
                }
            }

            // ****************** KING ******************
            for (delta_rank, delta_file) in KING_DELTAS {
                let to_rank = from_rank + delta_rank;
                let to_file = from_file + delta_file;

                if (0..8).contains(&to_rank) && (0..8).contains(&to_file) {
                    let to = Square::new((to_rank * 8 + to_file) as u8);
                    king[sq.index()] |= to.bb();
                }
            }

            // ****************** PAWN CAPTURE ******************
            //White
            if from_rank < 7 {
                if from_file > 0 {
                    pawn_capture[Color::White.index()][sq.index()] |= sq.north_west().bb();
                }
                if from_file < 7 {
                    pawn_capture[Color::White.index()][sq.index()] |= sq.north_east().bb();
                }
            }
            //Black
            if from_rank > 0 {
                if from_file > 0 {
                    pawn_capture[Color::Black.index()][sq.index()] |= sq.south_west().bb();
                }
                if from_file < 7 {
                    pawn_capture[Color::Black.index()][sq.index()] |= sq.south_east().bb();
                }
            }

            // ****************** PAWN PUSH ******************
            if from_rank < 7 {
                pawn_push[Color::White.index()][sq.index()] = sq.north().bb();
            }
            if from_rank > 0 {
                pawn_push[Color::Black.index()][sq.index()] = sq.south().bb();
            }

            // ****************** DOUBLE PAWN PUSH ******************
            if from_rank == 1 {
                pawn_double_push[Color::White.index()][sq.index()] = sq.north().north().bb();
            }
            if from_rank == 6 {
                pawn_double_push[Color::Black.index()][sq.index()] = sq.south().south().bb();
            }

            // ****************** RAY LINES ******************
            // Used by pin detection: a pinned piece's legal destinations are
            // restricted to the full line the pin runs along, not merely the
            // squares between king and pinner.
            for file in 0..8u8 {
                rank_line[sq.index()] |= Square::from_rank_file(sq.rank(), file).bb();
            }
            for rank in 0..8u8 {
                file_line[sq.index()] |= Square::from_rank_file(rank, sq.file()).bb();
            }
            for delta in -7i8..=7 {
                let r = from_rank + delta;
                let f = from_file + delta;
                if (0..8).contains(&r) && (0..8).contains(&f) {
                    diag_ne_line[sq.index()] |= Square::from_rank_file(r as u8, f as u8).bb();
                }
            }
            for delta in -7i8..=7 {
                let r = from_rank + delta;
                let f = from_file - delta;
                if (0..8).contains(&r) && (0..8).contains(&f) {
                    diag_nw_line[sq.index()] |= Square::from_rank_file(r as u8, f as u8).bb();
                }
            }
        }

        // Generates sliding piece attacks
        let mut magic_tables = MagicTables::new();
        magic_tables.generate_magics();

        Self {
            knight,
            king,
            pawn_capture,
            pawn_push,
            pawn_double_push,
            rank_line,
            file_line,
            diag_ne_line,
            diag_nw_line,
            magic_tables,
        }
    }

    /// The full ray line (rank, file or either diagonal) passing through both
    /// `from` and `through`, if the two squares share one. Used by pin
    /// detection to recover the mask a pinned piece is restricted to.
    pub fn line_through(&self, from: Square, through: Square) -> Option<Bitboard> {
        if self.rank_line[from.index()] & through.bb() != Bitboard(0) {
            Some(self.rank_line[from.index()])
        } else if self.file_line[from.index()] & through.bb() != Bitboard(0) {
            Some(self.file_line[from.index()])
        } else if self.diag_ne_line[from.index()] & through.bb() != Bitboard(0) {
            Some(self.diag_ne_line[from.index()])
        } else if self.diag_nw_line[from.index()] & through.bb() != Bitboard(0) {
            Some(self.diag_nw_line[from.index()])
        } else {
            None
        }
    }

    /// Writes the attack tables to the log for debug purposes.
    pub fn print(&self) {
        fn log_section(title: &str, boards: &[Bitboard]) {
            log::debug!("=== {title} ===");
            let per_row = 4;
            for row in (0..boards.len()).step_by(per_row) {
                let mut line = String::new();
                for i in 0..per_row {
                    if row + i < boards.len() {
                        line.push_str(&format!("{:2}: {:016X}  ", row + i, boards[row + i].0));
                    }
                }
                log::debug!("{line}");
            }
        }

        log_section("KNIGHT", &self.knight);
        log_section("KING", &self.king);

        log_section("PAWN CAPTURE (WHITE)", &self.pawn_capture[Color::White.index()]);
        log_section("PAWN PUSH (WHITE)", &self.pawn_push[Color::White.index()]);
        log_section("PAWN DOUBLE PUSH (WHITE)", &self.pawn_double_push[Color::White.index()]);

        log_section("PAWN CAPTURE (BLACK)", &self.pawn_capture[Color::Black.index()]);
        log_section("PAWN PUSH (BLACK)", &self.pawn_push[Color::Black.index()]);
        log_section("PAWN DOUBLE PUSH (BLACK)", &self.pawn_double_push[Color::Black.index()]);

        self.magic_tables.print();
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}
