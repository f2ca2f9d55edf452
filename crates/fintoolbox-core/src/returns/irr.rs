//! Internal rate of return by Newton-Raphson.
//!
//! The search runs in `f64`: the unknown is a dimensionless rate and the
//! NPV tolerance absorbs representation error. Inputs and outputs stay in
//! `Decimal` at the boundary.
//!
//! Schedules whose sign changes more than once can have several IRRs. The
//! solver reports whichever root the starting guess leads to.

use log::{debug, trace};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::returns::cash_flow::validate_cash_flow_schedule;
use crate::returns::periodicity::{annualize, Periodicity};
use crate::time_value;
use crate::types::{with_metadata, CashFlowSchedule, ComputationOutput, Money, Rate};
use crate::FinToolboxResult;

pub const DEFAULT_GUESS: f64 = 0.10;
pub const MAX_IRR_ITERATIONS: u32 = 100;
pub const CONVERGENCE_TOLERANCE: f64 = 1e-5;
const MIN_DERIVATIVE: f64 = 1e-10;
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Why a solve produced no rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IrrError {
    #[error("IRR did not converge; try adjusting the cash flows")]
    NotConverged,
    #[error("IRR iteration diverged; check the cash flows")]
    Diverged,
    #[error("IRR cannot be computed: NPV derivative vanished")]
    ZeroDerivative,
    #[error("cash flows must contain both investments (negative) and returns (positive)")]
    InvalidCashFlowMix,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolverConfig {
    pub guess: f64,
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for IrrSolverConfig {
    fn default() -> Self {
        Self {
            guess: DEFAULT_GUESS,
            max_iterations: MAX_IRR_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
        }
    }
}

/// A converged per-period rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    pub rate: f64,
    pub iterations: u32,
}

/// Outcome of one IRR request. Exactly one of `rate` / `error_kind` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Per-period rate
    pub rate: Option<Rate>,
    /// Effective annual rate (only for the annualized entry point)
    pub annualized_rate: Option<Rate>,
    pub converged: bool,
    pub iterations: u32,
    pub error_kind: Option<IrrError>,
}

impl IrrResult {
    fn failed(error: IrrError, iterations: u32) -> Self {
        Self {
            rate: None,
            annualized_rate: None,
            converged: false,
            iterations,
            error_kind: Some(error),
        }
    }
}

/// Rough comparison of an annual return against bank deposits (~2-3%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrInterpretation {
    AboveDeposits,
    ComparableToDeposits,
    BelowDeposits,
    Loss,
}

impl IrrInterpretation {
    pub fn from_annual_rate(rate: Rate) -> Self {
        if rate > dec!(0.05) {
            IrrInterpretation::AboveDeposits
        } else if rate > dec!(0.02) {
            IrrInterpretation::ComparableToDeposits
        } else if rate > Decimal::ZERO {
            IrrInterpretation::BelowDeposits
        } else {
            IrrInterpretation::Loss
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrInput {
    pub cash_flows: CashFlowSchedule,
    #[serde(default)]
    pub periodicity: Periodicity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrAnalysis {
    #[serde(flatten)]
    pub irr: IrrResult,
    pub periodicity: Periodicity,
    /// NPV of the schedule at the solved per-period rate (should be ~0)
    pub npv_at_rate: Option<Money>,
    pub interpretation: Option<IrrInterpretation>,
}

// ---------------------------------------------------------------------------
// Newton-Raphson state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum SolverState {
    Iterating { rate: f64, iteration: u32 },
    Converged { rate: f64, iterations: u32 },
    Diverged { iterations: u32 },
    ZeroDerivative { iterations: u32 },
    NotConverged { iterations: u32 },
}

fn npv_and_derivative(flows: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let one_plus_r = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;
    for &(t, amount) in flows {
        npv += amount / one_plus_r.powf(t);
        dnpv -= t * amount / one_plus_r.powf(t + 1.0);
    }
    (npv, dnpv)
}

/// One transition. Checks, in order: convergence, flat derivative, then
/// whether the Newton update leaves `[RATE_FLOOR, RATE_CEILING]`.
fn step(flows: &[(f64, f64)], state: SolverState, config: &IrrSolverConfig) -> SolverState {
    let SolverState::Iterating { rate, iteration } = state else {
        return state;
    };
    if iteration >= config.max_iterations {
        return SolverState::NotConverged { iterations: iteration };
    }

    let (npv, dnpv) = npv_and_derivative(flows, rate);
    trace!("irr iteration {iteration}: rate={rate} npv={npv} dnpv={dnpv}");

    if npv.abs() < config.tolerance {
        return SolverState::Converged {
            rate,
            iterations: iteration,
        };
    }
    if dnpv.abs() < MIN_DERIVATIVE {
        return SolverState::ZeroDerivative {
            iterations: iteration + 1,
        };
    }

    let next = rate - npv / dnpv;
    if !(RATE_FLOOR..=RATE_CEILING).contains(&next) {
        return SolverState::Diverged {
            iterations: iteration + 1,
        };
    }

    SolverState::Iterating {
        rate: next,
        iteration: iteration + 1,
    }
}

fn to_f64_flows(schedule: &CashFlowSchedule) -> Vec<(f64, f64)> {
    schedule
        .iter()
        .map(|cf| (cf.period as f64, cf.amount.to_f64().unwrap_or(f64::NAN)))
        .collect()
}

/// Drive the state machine from `config.guess` to a terminal state.
///
/// Refuses schedules without both a positive and a negative amount before
/// iterating, even though validation normally catches them first.
fn run_solver(schedule: &CashFlowSchedule, config: &IrrSolverConfig) -> Result<SolverState, IrrError> {
    if !schedule.has_positive() || !schedule.has_negative() {
        return Err(IrrError::InvalidCashFlowMix);
    }

    let flows = to_f64_flows(schedule);
    let mut state = SolverState::Iterating {
        rate: config.guess,
        iteration: 0,
    };
    while let SolverState::Iterating { .. } = state {
        state = step(&flows, state, config);
    }
    debug!("irr solve from guess {} finished in state {:?}", config.guess, state);
    Ok(state)
}

fn into_outcome(state: SolverState) -> (Result<IrrSolution, IrrError>, u32) {
    match state {
        SolverState::Converged { rate, iterations } => (Ok(IrrSolution { rate, iterations }), iterations),
        SolverState::Diverged { iterations } => (Err(IrrError::Diverged), iterations),
        SolverState::ZeroDerivative { iterations } => (Err(IrrError::ZeroDerivative), iterations),
        SolverState::NotConverged { iterations } => (Err(IrrError::NotConverged), iterations),
        SolverState::Iterating { iteration, .. } => (Err(IrrError::NotConverged), iteration),
    }
}

/// Solve for the per-period IRR with an explicit configuration.
pub fn solve_irr(
    schedule: &CashFlowSchedule,
    config: &IrrSolverConfig,
) -> Result<IrrSolution, IrrError> {
    let state = run_solver(schedule, config)?;
    into_outcome(state).0
}

fn solve_to_result(
    schedule: &CashFlowSchedule,
    periodicity: Option<Periodicity>,
    guess: Option<f64>,
) -> IrrResult {
    let config = IrrSolverConfig {
        guess: guess.unwrap_or(DEFAULT_GUESS),
        ..IrrSolverConfig::default()
    };
    let (solved, iterations) = match run_solver(schedule, &config) {
        Ok(state) => into_outcome(state),
        Err(e) => (Err(e), 0),
    };

    let solution = match solved {
        Ok(solution) => solution,
        Err(e) => return IrrResult::failed(e, iterations),
    };
    let Some(rate) = Decimal::from_f64(solution.rate) else {
        return IrrResult::failed(IrrError::Diverged, iterations);
    };

    let annualized_rate = match periodicity {
        Some(p) => match annualize(rate, p) {
            Ok(annual) => Some(annual),
            Err(e) => {
                debug!("irr annualization failed for rate {rate}: {e}");
                return IrrResult::failed(IrrError::Diverged, iterations);
            }
        },
        None => None,
    };

    IrrResult {
        rate: Some(rate),
        annualized_rate,
        converged: true,
        iterations,
        error_kind: None,
    }
}

/// Per-period IRR of a validated schedule. `guess` defaults to 10%.
pub fn compute_irr(schedule: &CashFlowSchedule, guess: Option<f64>) -> IrrResult {
    solve_to_result(schedule, None, guess)
}

/// Per-period IRR plus its effective annual equivalent.
pub fn compute_irr_annualized(
    schedule: &CashFlowSchedule,
    periodicity: Periodicity,
    guess: Option<f64>,
) -> IrrResult {
    solve_to_result(schedule, Some(periodicity), guess)
}

/// Sign changes in period order, ignoring zero amounts.
fn sign_changes(schedule: &CashFlowSchedule) -> usize {
    let mut items: Vec<_> = schedule.iter().filter(|cf| !cf.amount.is_zero()).collect();
    items.sort_by_key(|cf| cf.period);
    items
        .windows(2)
        .filter(|w| w[0].amount.is_sign_negative() != w[1].amount.is_sign_negative())
        .count()
}

/// Validate, solve and annotate an IRR request.
///
/// A validation failure is returned as `Err`; a solver failure is not an
/// error here, it is reported inside the result and as a warning.
pub fn analyze_irr(input: &IrrInput) -> FinToolboxResult<ComputationOutput<IrrAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_cash_flow_schedule(&input.cash_flows)?;

    if sign_changes(&input.cash_flows) > 1 {
        warnings.push(
            "Cash flows change sign more than once; several IRRs may exist and the one reported depends on the initial guess"
                .into(),
        );
    }

    let irr = compute_irr_annualized(&input.cash_flows, input.periodicity, input.guess);

    let mut npv_at_rate = None;
    let mut interpretation = None;
    if let Some(rate) = irr.rate {
        npv_at_rate = match time_value::npv(rate, &input.cash_flows.items) {
            Ok(v) => Some(v),
            Err(e) => {
                warnings.push(format!("NPV verification unavailable: {e}"));
                None
            }
        };
        interpretation = irr.annualized_rate.map(IrrInterpretation::from_annual_rate);
    }
    if let Some(kind) = irr.error_kind {
        warnings.push(format!("IRR calculation warning: {kind}"));
    }

    let analysis = IrrAnalysis {
        irr,
        periodicity: input.periodicity,
        npv_at_rate,
        interpretation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IRR via Newton-Raphson on NPV(r), annualized as (1 + r)^n - 1",
        &serde_json::json!({
            "guess": input.guess.unwrap_or(DEFAULT_GUESS),
            "max_iterations": MAX_IRR_ITERATIONS,
            "tolerance": CONVERGENCE_TOLERANCE,
            "periods_per_year": input.periodicity.periods_per_year(),
        }),
        warnings,
        elapsed,
        analysis,
    ))
}
