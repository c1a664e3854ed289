//! Random fact selection that never repeats the previous pick.

use rand::Rng;

use crate::error::FactError;

/// Pick a fact uniformly at random, avoiding `last_index` when possible.
///
/// With two or more facts the returned index always differs from
/// `last_index`. A single fact is returned as is, whatever `last_index` says.
pub fn pick_fact<'a, R: Rng + ?Sized>(
    facts: &'a [String],
    last_index: Option<usize>,
    rng: &mut R,
) -> Result<(&'a str, usize), FactError> {
    if facts.is_empty() {
        return Err(FactError::Empty);
    }

    let mut index = rng.random_range(0..facts.len());
    if facts.len() > 1 {
        while Some(index) == last_index {
            index = rng.random_range(0..facts.len());
        }
    }

    Ok((facts[index].as_str(), index))
}
