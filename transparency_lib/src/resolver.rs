//! Case-insensitive country code resolution.

use transparency_api::types::Country;

use crate::error::TransparencyError;
use crate::store::FixtureStore;

/// Uppercases `code` and returns the matching country.
///
/// There is no fuzzy matching: surrounding whitespace or a near-miss code is
/// simply not found.
pub fn resolve<'a>(store: &'a FixtureStore, code: &str) -> Result<&'a Country, TransparencyError> {
    store
        .country(&code.to_uppercase())
        .ok_or(TransparencyError::CountryNotFound)
}
