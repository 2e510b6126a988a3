//! Perft benchmarking binary.

use shatranj::perft::benchmark_perft;

fn main() {
    env_logger::init();
    benchmark_perft(6);
}
