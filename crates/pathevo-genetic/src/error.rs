use std::collections::TryReserveError;

/// A fallible reservation for population or genotype storage failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("failed to allocate {what}")]
pub struct AllocationError {
    what: &'static str,
    source: TryReserveError,
}

impl AllocationError {
    /// Describes what was being allocated (e.g. `"child genotype"`).
    #[must_use]
    pub fn what(&self) -> &'static str {
        self.what
    }
}

/// Error that ends an [`Evolution`](crate::Evolution) run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    #[display("failed to build the initial population")]
    Populate { source: AllocationError },
    #[display("reproduction failed while producing generation {generation}")]
    Reproduction {
        generation: usize,
        source: AllocationError,
    },
}

/// Creates an empty vector with room for exactly `capacity` elements, reporting
/// allocation failure instead of aborting.
pub(crate) fn try_vec<T>(capacity: usize, what: &'static str) -> Result<Vec<T>, AllocationError> {
    let mut values = Vec::new();
    try_reserve(&mut values, capacity, what)?;
    Ok(values)
}

pub(crate) fn try_reserve<T>(
    values: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), AllocationError> {
    values
        .try_reserve_exact(additional)
        .map_err(|source| AllocationError { what, source })
}
