//! Direct vs Generic Summing
//!
//! Times the two demo summing paths through the library API and prints the
//! best per-call time of each.
//!
//! Run with: cargo run --example compare_sums -p steadybench --release

use steadybench::prelude::*;
use steadybench_cli::{random_data, sum_direct, sum_rounded, sum_with};

fn main() {
    let data = random_data(2000, None);

    println!("{}", sum_direct(&data, 1337));
    println!("{}", sum_with(&data[..], 1337, sum_rounded));

    let config = BenchConfig::default();

    let direct = benchmark_with(|| sum_direct(&data, 1337), &config);
    println!("\nTime for sum_direct: {}s", f64::from(direct));

    let generic = benchmark_with(|| sum_with(&data[..], 1337, sum_rounded), &config);
    println!("\nTime for sum_generic: {}s", f64::from(generic));
}
