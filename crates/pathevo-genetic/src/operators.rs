//! Genetic operators on raw move sequences.
//!
//! These work on plain `Direction` slices, before a sequence is walked and
//! turned into an [`Individual`](crate::Individual).
//!
//! # Head/Tail Crossover
//!
//! A child of length `len` takes its first half from the *head* of parent 1
//! and its second half from the *tail* of parent 2:
//!
//! ```text
//! parent 1: [h0 h1 h2 ... ]          parent 2: [ ... t(n-3) t(n-2) t(n-1)]
//!            └─ up to len/2 ─┘                    └─── up to len/2 ────┘
//! child:    [h0 h1 h2 ... | ... t(n-3) t(n-2) t(n-1)]
//! ```
//!
//! Slots a short parent cannot fill get uniform-random directions. Parent 1's
//! head is the early part of its walk and parent 2's tail the late part, so
//! children tend to keep a proven start and a proven finish.
//!
//! # Per-Gene Mutation
//!
//! Every gene is independently replaced by a uniform-random direction with
//! probability `rate`. The replacement may equal the old value.

use pathevo_grid::Direction;
use rand::Rng;

use crate::{AllocationError, error::try_vec};

/// Builds a child sequence of exactly `len` moves from `head_parent` and
/// `tail_parent`.
///
/// - positions `0..len/2`: `head_parent[..min(len/2, head_parent.len())]`,
///   then random fill
/// - positions `len/2..len`: the last `min(len - len/2, tail_parent.len())`
///   moves of `tail_parent`, then random fill
///
/// ```
/// use pathevo_genetic::operators;
/// use pathevo_grid::Direction;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let p1 = Direction::parse_sequence("BBBB").unwrap();
/// let p2 = Direction::parse_sequence("CCCCDD").unwrap();
/// let mut rng = Pcg32::seed_from_u64(0);
/// let child = operators::crossover(&p1, &p2, 6, &mut rng).unwrap();
/// assert_eq!(Direction::sequence_to_string(&child), "BBBCDD");
/// ```
pub fn crossover<R>(
    head_parent: &[Direction],
    tail_parent: &[Direction],
    len: usize,
    rng: &mut R,
) -> Result<Vec<Direction>, AllocationError>
where
    R: Rng + ?Sized,
{
    let head_len = len / 2;
    let tail_len = len - head_len;
    let mut genes = try_vec(len, "child genotype")?;

    let head = &head_parent[..head_parent.len().min(head_len)];
    genes.extend_from_slice(head);
    genes.extend((head.len()..head_len).map(|_| rng.random::<Direction>()));

    let tail = &tail_parent[tail_parent.len().saturating_sub(tail_len)..];
    genes.extend_from_slice(tail);
    genes.extend((tail.len()..tail_len).map(|_| rng.random::<Direction>()));

    debug_assert_eq!(genes.len(), len);
    Ok(genes)
}

/// Replaces each gene with a uniform-random direction with probability `rate`.
///
/// # Panics
///
/// Panics if `rate` is not in `[0.0, 1.0]`.
pub fn mutate<R>(genes: &mut [Direction], rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genes {
        if rng.random_bool(rate) {
            *gene = rng.random();
        }
    }
}
