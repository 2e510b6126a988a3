//! Search knobs grouped into one configuration struct.

/// Tunables for `search::search`. `Default` matches `spec.md` §4.F/§4.G's stated defaults.
#[derive(Copy, Clone, Debug)]
pub struct SearchConfig {
    /// Iterative deepening starts at depth 3 and stops at this cap (inclusive).
    pub max_depth: u8,
    /// Mate sentinel; returned (negated, with jitter) when the side to move has no legal
    /// moves while in check.
    pub mate_score: i32,
    /// Score assigned to stalemate: `mate_score / 2` by default, a neutral-but-distinct
    /// value per `spec.md` §4.F rather than 0.
    pub stalemate_score: i32,
    /// Upper bound used for alpha-beta's initial window and to flag "found a mate" early
    /// termination (`|score| > mate_score / 2`).
    pub infinity: i32,
    /// Seed for the small amount of random jitter added to mate scores, so that a search
    /// prefers the shortest mate it actually evaluated over a nominally-equal deeper one
    /// without needing full mate-distance bookkeeping.
    pub jitter_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let mate_score = 60_000;
        Self { max_depth: 5, mate_score, stalemate_score: mate_score / 2, infinity: 100_000, jitter_seed: 0x5EED }
    }
}
