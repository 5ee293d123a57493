//! Query operations over a record slice.
//!
//! Every function validates its code argument first and fails fast with a
//! [`PincodeError`] before any scan runs. A valid code with no data gives an
//! empty result, never an error, except for [`district_match`].
//!
//! The functions take the records explicitly so any slice can stand in for
//! the bundled dataset; [`crate::Pincodes`] binds them to a loaded one.

mod nearby;

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub use nearby::{anchor, manhattan, nearby, nearby_linear, DEFAULT_MAX_DIFF};

use crate::error::PincodeError;
use crate::models::{Coordinates, Pincode, Record};

/// All records carrying the code, in dataset order.
pub fn matching<'a>(code: &str, records: &'a [Record]) -> Result<Vec<&'a Record>, PincodeError> {
    let code = Pincode::parse(code)?;
    Ok(matching_code(&code, records).collect())
}

/// Whether at least one record carries the code.
pub fn is_valid(code: &str, records: &[Record]) -> Result<bool, PincodeError> {
    let code = Pincode::parse(code)?;
    let found = matching_code(&code, records).next().is_some();
    Ok(found)
}

/// Distinct districts for the code, sorted and joined with `", "`.
///
/// Fails with [`PincodeError::NotFound`] when the code is absent and also
/// when it is present but none of its records name a district.
pub fn district_match(code: &str, records: &[Record]) -> Result<String, PincodeError> {
    let code = Pincode::parse(code)?;

    let districts: BTreeSet<&str> = matching_code(&code, records)
        .filter_map(Record::district)
        .collect();

    if districts.is_empty() {
        debug!("No district found for {}", code);
        return Err(PincodeError::NotFound(code));
    }

    Ok(districts.into_iter().collect::<Vec<_>>().join(", "))
}

/// Raw coordinates of every record carrying the code, keyed by office name.
///
/// Records sharing a name collapse into one entry; the last one in dataset
/// order wins.
pub fn coordinates(
    code: &str,
    records: &[Record],
) -> Result<BTreeMap<String, Coordinates>, PincodeError> {
    let code = Pincode::parse(code)?;

    let mut result = BTreeMap::new();
    for record in matching_code(&code, records) {
        result.insert(record.name(), record.coordinates());
    }
    Ok(result)
}

fn matching_code<'a, 'c>(
    code: &'c Pincode,
    records: &'a [Record],
) -> impl Iterator<Item = &'a Record> + 'c
where
    'a: 'c,
{
    records.iter().filter(move |r| *code == *r.code())
}
