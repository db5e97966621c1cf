//! Demo Workload
//!
//! Sums a slice of `f32` values rounded to integers, once through a plain
//! function and once through a generic path taking the summing function as a
//! parameter, so the two call shapes can be timed against each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound of the generated values
pub const MAX_VALUE: f32 = 1e10;

/// Generate `len` random values in `[0, MAX_VALUE)`.
///
/// With a seed the data is reproducible across runs.
pub fn random_data(len: usize, seed: Option<u64>) -> Vec<f32> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..len).map(|_| rng.r#gen::<f32>() * MAX_VALUE).collect()
}

/// Sum of every value rounded half-up to an integer.
pub fn sum_rounded(data: &[f32]) -> usize {
    data.iter().map(|&d| (d + 0.5) as usize).sum()
}

/// Non-generic path: `sum_rounded(data) + add`.
#[inline(never)]
pub fn sum_direct(data: &[f32], add: usize) -> usize {
    sum_rounded(data) + add
}

/// Generic path: any container, any summing function, any sum type that
/// converts to `usize`. The addition happens in `usize`, so narrow sum types
/// can't overflow.
#[inline(never)]
pub fn sum_with<C, S, F>(data: &C, add: S, get_sum: F) -> usize
where
    C: ?Sized,
    S: Into<usize>,
    F: Fn(&C) -> S,
{
    get_sum(data).into() + add.into()
}

/// A named demo case
pub struct Workload<'a> {
    /// Name shown in output
    pub name: &'static str,
    /// The measured call, returning its checksum
    pub run: Box<dyn Fn() -> usize + 'a>,
}

/// Both summing paths over the same data.
pub fn workloads(data: &[f32], add: usize) -> Vec<Workload<'_>> {
    vec![
        Workload {
            name: "sum_direct",
            run: Box::new(move || sum_direct(data, add)),
        },
        Workload {
            name: "sum_generic",
            run: Box::new(move || sum_with(data, add, sum_rounded)),
        },
    ]
}
