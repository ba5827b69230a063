//! Cross-country aggregation of per-country collections.

use transparency_api::types::{CountryCode, CountryTagged};

/// Flattens a country-keyed collection into one list, tagging each record
/// with the key it was stored under. Records keep their per-country order and
/// countries appear in the iteration order of `collection`.
pub fn flatten_with_country_tag<'a, R, I>(collection: I) -> Vec<CountryTagged<&'a R>>
where
    I: IntoIterator<Item = (&'a CountryCode, &'a Vec<R>)>,
    R: 'a,
{
    collection
        .into_iter()
        .flat_map(|(code, records)| {
            records.iter().map(move |record| CountryTagged {
                country_code: code.clone(),
                record,
            })
        })
        .collect()
}
