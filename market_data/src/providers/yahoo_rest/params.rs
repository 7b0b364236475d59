use snafu::ensure;

use crate::{
    models::request_params::BarsRequestParams,
    providers::{ProviderError, ValidationSnafu},
};

/// Checks that the requested range is usable before any network round trip.
pub fn validate_range(params: &BarsRequestParams) -> Result<(), ProviderError> {
    ensure!(
        params.start < params.end,
        ValidationSnafu {
            message: format!(
                "start ({}) must be before end ({})",
                params.start, params.end
            ),
        }
    );
    ensure!(
        !params.symbols.is_empty(),
        ValidationSnafu {
            message: "at least one symbol is required".to_string(),
        }
    );
    Ok(())
}

/// Builds the query string pairs for one chart request.
///
/// `period1`/`period2` are unix seconds; the endpoint treats them as an
/// inclusive range of sessions.
pub fn construct_params(params: &BarsRequestParams) -> Vec<(String, String)> {
    vec![
        ("period1".to_string(), params.start.timestamp().to_string()),
        ("period2".to_string(), params.end.timestamp().to_string()),
        ("interval".to_string(), "1d".to_string()),
        ("events".to_string(), "div,splits".to_string()),
        ("includePrePost".to_string(), "false".to_string()),
    ]
}
