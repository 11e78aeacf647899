//! Field parsing shared by the OBJ and MTL grammars

use std::str::FromStr;

use super::diagnostics::ParseIssue;

/// Parse one field of a `keyword` line
pub(crate) fn parse_field<T: FromStr>(keyword: &str, field: &str) -> Result<T, ParseIssue> {
    field.parse().map_err(|_| ParseIssue::MalformedNumericField {
        keyword: keyword.to_string(),
        field: field.to_string(),
    })
}

/// Parse the first `N` fields as floats. Fields past `N` are ignored.
pub(crate) fn parse_floats<const N: usize>(keyword: &str, fields: &[&str]) -> Result<[f32; N], ParseIssue> {
    if fields.len() < N {
        return Err(ParseIssue::MissingField {
            keyword: keyword.to_string(),
            expected: N,
            found: fields.len(),
        });
    }

    let mut values = [0.0; N];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = parse_field(keyword, field)?;
    }
    Ok(values)
}
