use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use fintoolbox_core::assessment::{self, AssessmentInput};
use fintoolbox_core::interest::{self, projection::InterestInput};
use fintoolbox_core::returns::irr::IrrInput;
use fintoolbox_core::returns::mirr::MirrInput;
use fintoolbox_core::returns::npv::NpvInput;
use fintoolbox_core::returns::{self, validate_cash_flow_schedule};
use fintoolbox_core::CashFlowSchedule;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Interest
// ---------------------------------------------------------------------------

#[napi]
pub fn project_interest(input_json: String) -> NapiResult<String> {
    let input: InterestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = interest::project_interest(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

/// A bare schedule, or any request object that carries one.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleRequest {
    Bare(CashFlowSchedule),
    Wrapped { cash_flows: CashFlowSchedule },
}

#[napi]
pub fn validate_cash_flows(input_json: String) -> NapiResult<String> {
    let request: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = match request {
        ScheduleRequest::Bare(s) | ScheduleRequest::Wrapped { cash_flows: s } => s,
    };
    validate_cash_flow_schedule(&schedule).map_err(to_napi_error)?;
    let output = serde_json::json!({
        "valid": true,
        "entries": schedule.len(),
        "horizon": schedule.horizon(),
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_irr(input_json: String) -> NapiResult<String> {
    let input: IrrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = returns::analyze_irr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_mirr(input_json: String) -> NapiResult<String> {
    let input: MirrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = returns::analyze_mirr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_npv(input_json: String) -> NapiResult<String> {
    let input: NpvInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = returns::analyze_npv(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_household(input_json: String) -> NapiResult<String> {
    let input: AssessmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = assessment::assess_household(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assessment_questions() -> NapiResult<String> {
    serde_json::to_string(assessment::QUESTIONS).map_err(to_napi_error)
}
