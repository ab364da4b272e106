//! The simulated annealing search loop.

use crate::oracle::CostOracle;
use crate::reporter::ProgressReporter;
use anvil_cells::CandidateIndex;
use anvil_diagnostics::code::{Category, DiagnosticCode};
use anvil_diagnostics::{Diagnostic, DiagnosticSink};
use anvil_netlist::{Mapping, Netlist};
use anvil_source::Span;
use rand::Rng;
use std::time::{Duration, Instant};

/// Iterations between progress notes and cooling-rate adjustments.
const PROGRESS_INTERVAL: u64 = 100;

/// Multiplier applied to the cooling rate while the search sits at its best.
const COOLING_DECAY: f64 = 0.99;

/// Lower bound on the adaptive cooling rate.
const COOLING_FLOOR: f64 = 0.85;

/// Consecutive non-improving iterations before the temperature resets.
const STAGNATION_LIMIT: u32 = 500;

/// Tunable schedule parameters for a search run.
#[derive(Clone, Copy, Debug)]
pub struct AnnealParams {
    /// Initial temperature `T0`, also the reheat target on stagnation.
    pub initial_temp: f64,
    /// Geometric cooling rate applied every iteration.
    pub cooling: f64,
    /// Wall-clock budget; the loop stops at the first iteration boundary
    /// past the deadline.
    pub time_limit: Duration,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            initial_temp: 1000.0,
            cooling: 0.95,
            time_limit: Duration::from_secs(3 * 60 * 60),
        }
    }
}

/// The result of a completed search run.
#[derive(Debug)]
pub struct AnnealOutcome {
    /// The best mapping observed over the whole run.
    pub mapping: Mapping,
    /// The cost of that mapping; `f64::INFINITY` when every evaluation failed.
    pub cost: f64,
    /// Number of loop iterations executed.
    pub iterations: u64,
}

/// Builds the baseline mapping: every gate gets the first candidate cell of
/// its type, in library order.
///
/// Gate types absent from the index are reported as warnings and left
/// unmapped.
pub fn initial_mapping(
    netlist: &Netlist,
    candidates: &CandidateIndex,
    sink: &DiagnosticSink,
) -> Mapping {
    let mut mapping = Mapping::new();
    for gate in &netlist.gates {
        match candidates.candidates(&gate.cell_type) {
            Some(cells) => mapping.assign(gate.name.clone(), cells[0].clone()),
            None => sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Warning, 211),
                format!(
                    "no library cell implements type '{}'; gate '{}' left unmapped",
                    gate.cell_type, gate.name
                ),
                Span::DUMMY,
            )),
        }
    }
    mapping
}

/// Temperature and cooling-rate state evolved by the search loop.
///
/// The temperature decays geometrically every iteration. Every
/// [`PROGRESS_INTERVAL`] iterations the cooling rate adapts: sitting at the
/// best cost slows the decay (down to [`COOLING_FLOOR`]), while being away
/// from the best restores the configured rate and clears the stagnation
/// counter. Independently, more than [`STAGNATION_LIMIT`] consecutive
/// non-improving iterations reheats the temperature to `T0`.
struct Schedule {
    t0: f64,
    base_cooling: f64,
    temperature: f64,
    cooling: f64,
    stagnation: u32,
}

impl Schedule {
    fn new(params: &AnnealParams) -> Self {
        Self {
            t0: params.initial_temp,
            base_cooling: params.cooling,
            temperature: params.initial_temp,
            cooling: params.cooling,
            stagnation: 0,
        }
    }

    fn on_improvement(&mut self) {
        self.stagnation = 0;
    }

    fn on_no_improvement(&mut self) {
        self.stagnation += 1;
    }

    /// Applies the end-of-iteration transitions: the periodic cooling-rate
    /// adjustment, the stagnation reheat, and the geometric decay.
    fn end_iteration(&mut self, iterations: u64, at_best: bool) {
        if iterations % PROGRESS_INTERVAL == 0 {
            if at_best {
                // Sitting at the best; cool more slowly to search the
                // neighborhood harder.
                self.cooling = (self.cooling * COOLING_DECAY).max(COOLING_FLOOR);
            } else {
                self.cooling = self.base_cooling;
                self.stagnation = 0;
            }
        }

        if self.stagnation > STAGNATION_LIMIT {
            self.temperature = self.t0;
            self.stagnation = 0;
        }

        self.temperature *= self.cooling;
    }
}

/// Metropolis acceptance: improvements always pass, regressions pass with
/// probability `exp(-delta / T)` against a fresh uniform draw.
///
/// When both costs are infinite the probability expression is NaN and the
/// comparison rejects, so a run of failed evaluations keeps the current
/// mapping in place.
fn metropolis_accepts<R: Rng>(current: f64, neighbor: f64, temperature: f64, rng: &mut R) -> bool {
    if neighbor < current {
        return true;
    }
    rng.gen::<f64>() < ((current - neighbor) / temperature).exp()
}

/// Runs the annealing loop over gate-to-cell mappings.
///
/// The RNG is injected so runs are reproducible under a fixed seed; the
/// oracle and reporter are trait objects so tests substitute in-memory
/// stand-ins for the external estimator and the output files.
pub struct Annealer<'a, R: Rng> {
    netlist: &'a Netlist,
    candidates: &'a CandidateIndex,
    oracle: &'a dyn CostOracle,
    reporter: &'a dyn ProgressReporter,
    sink: &'a DiagnosticSink,
    params: AnnealParams,
    rng: R,
}

impl<'a, R: Rng> Annealer<'a, R> {
    /// Creates a new search over the given netlist and candidate index.
    pub fn new(
        netlist: &'a Netlist,
        candidates: &'a CandidateIndex,
        oracle: &'a dyn CostOracle,
        reporter: &'a dyn ProgressReporter,
        sink: &'a DiagnosticSink,
        params: AnnealParams,
        rng: R,
    ) -> Self {
        Self {
            netlist,
            candidates,
            oracle,
            reporter,
            sink,
            params,
            rng,
        }
    }

    /// Runs the search until the wall-clock budget expires and returns the
    /// best mapping observed.
    pub fn optimize(&mut self) -> AnnealOutcome {
        let mut current = initial_mapping(self.netlist, self.candidates, self.sink);
        let mut best = current.clone();
        let mut best_cost = self.evaluate_or_worst(&current);
        self.persist(&best, best_cost);

        let mut schedule = Schedule::new(&self.params);
        let mut iterations: u64 = 0;
        let deadline = Instant::now() + self.params.time_limit;

        while Instant::now() < deadline {
            iterations += 1;

            let neighbor = self.neighbor(&current);
            // Both endpoints are re-scored every iteration; the oracle is
            // treated as stateful and its past answers as stale.
            let current_cost = self.evaluate_or_worst(&current);
            let neighbor_cost = self.evaluate_or_worst(&neighbor);

            let mut cost = current_cost;
            if metropolis_accepts(current_cost, neighbor_cost, schedule.temperature, &mut self.rng)
            {
                current = neighbor;
                cost = neighbor_cost;
            }

            if cost < best_cost {
                best_cost = cost;
                best = current.clone();
                schedule.on_improvement();
                self.persist(&best, best_cost);
            } else {
                schedule.on_no_improvement();
            }

            if iterations % PROGRESS_INTERVAL == 0 {
                self.sink.emit(Diagnostic::note(
                    DiagnosticCode::new(Category::Search, 301),
                    format!(
                        "iteration {iterations}: cost {cost}, best {best_cost}, T {:.3}",
                        schedule.temperature
                    ),
                ));
            }

            schedule.end_iteration(iterations, cost == best_cost);
        }

        self.persist(&best, best_cost);
        AnnealOutcome {
            mapping: best,
            cost: best_cost,
            iterations,
        }
    }

    /// Proposes a mapping differing from `current` in at most one gate.
    ///
    /// Picks a gate uniformly at random, then redraws among its candidates
    /// up to candidate-count times looking for a cell other than the one
    /// currently assigned. Unmapped and single-candidate gates, and an
    /// unlucky run of redraws, all yield an unchanged clone.
    fn neighbor(&mut self, current: &Mapping) -> Mapping {
        if self.netlist.gates.is_empty() {
            return current.clone();
        }
        let gate = &self.netlist.gates[self.rng.gen_range(0..self.netlist.gates.len())];
        let Some(cells) = self.candidates.candidates(&gate.cell_type) else {
            return current.clone();
        };
        if cells.len() > 1 {
            let assigned = current.get(&gate.name);
            for _ in 0..cells.len() {
                let pick = &cells[self.rng.gen_range(0..cells.len())];
                if Some(pick.as_str()) != assigned {
                    let mut next = current.clone();
                    next.assign(gate.name.clone(), pick.clone());
                    return next;
                }
            }
        }
        current.clone()
    }

    /// Scores a mapping, degrading oracle failure to worst-case cost.
    fn evaluate_or_worst(&self, mapping: &Mapping) -> f64 {
        match self.oracle.evaluate(self.netlist, mapping) {
            Ok(cost) => cost,
            Err(e) => {
                self.sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Warning, 212),
                    format!("cost evaluation failed: {e}; treating cost as infinite"),
                    Span::DUMMY,
                ));
                f64::INFINITY
            }
        }
    }

    fn persist(&self, mapping: &Mapping, cost: f64) {
        if let Err(e) = self.reporter.report(self.netlist, mapping, cost) {
            self.sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Warning, 310),
                format!("failed to persist best mapping: {e}"),
                Span::DUMMY,
            ));
        }
    }
}
