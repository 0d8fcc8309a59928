//! Redraw closed paths as sums of rotating epicycles.

use epipath::program::main as program_main;
use std::env;

fn main() {
    let flags: Vec<String> = env::args().collect();
    program_main(&flags);
}
