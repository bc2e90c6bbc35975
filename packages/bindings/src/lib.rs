use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use yojana_core::SchemeConstants;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse optional scheme overrides; an absent or empty string means the
/// published scheme terms.
fn parse_scheme(scheme_json: Option<String>) -> NapiResult<SchemeConstants> {
    match scheme_json.as_deref().map(str::trim) {
        None | Some("") => Ok(SchemeConstants::default()),
        Some(s) => serde_json::from_str(s).map_err(to_napi_error),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection and metrics
// ---------------------------------------------------------------------------

#[napi]
pub fn project_cash_flows(input_json: String, scheme_json: Option<String>) -> NapiResult<String> {
    let request: yojana_core::analysis::ProjectRequest = parse(&input_json)?;
    let scheme = parse_scheme(scheme_json)?;
    let output =
        yojana_core::analysis::project_cash_flows(&request, &scheme).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn return_metrics(input_json: String, scheme_json: Option<String>) -> NapiResult<String> {
    let request: yojana_core::analysis::ProjectRequest = parse(&input_json)?;
    let scheme = parse_scheme(scheme_json)?;
    let output = yojana_core::analysis::calculate_return_metrics(&request, &scheme)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn investment_cost(input_json: String, scheme_json: Option<String>) -> NapiResult<String> {
    let inputs: yojana_core::ProjectInputs = parse(&input_json)?;
    let scheme = parse_scheme(scheme_json)?;
    let output = yojana_core::analysis::calculate_investment_cost(&inputs, &scheme)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity and comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn sensitivity_sweep(input_json: String, scheme_json: Option<String>) -> NapiResult<String> {
    let input: yojana_core::sensitivity::SensitivityInput = parse(&input_json)?;
    let scheme = parse_scheme(scheme_json)?;
    let output = yojana_core::sensitivity::run_sensitivity(&input, &scheme)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_scenarios(input_json: String, scheme_json: Option<String>) -> NapiResult<String> {
    let input: yojana_core::comparison::ComparisonInput = parse(&input_json)?;
    let scheme = parse_scheme(scheme_json)?;
    let output = yojana_core::comparison::compare_scenarios(&input, &scheme)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_scheme() -> NapiResult<String> {
    serde_json::to_string(&SchemeConstants::default()).map_err(to_napi_error)
}
