use crate::check::{Check, PredicateFault};
use crate::model::{Configuration, ResourceInstance};
use crate::registry::CheckRegistry;
use crate::report::{Report, aggregate};
use iacguard_types::{Verdict, VerdictRecord};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Caller-owned cancellation flag, honored between resource instances.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, Default)]
pub struct EvalOptions {
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationRun {
    /// Records in dispatch order (type, instance, registration order).
    pub records: Vec<VerdictRecord>,
    pub resources_evaluated: usize,
    pub cancelled: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    pub fn new(options: EvalOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, configuration: &Configuration, registry: &CheckRegistry) -> Vec<VerdictRecord> {
        self.run_with_status(configuration, registry).records
    }

    pub fn run_with_status(
        &self,
        configuration: &Configuration,
        registry: &CheckRegistry,
    ) -> EvaluationRun {
        if !registry.is_frozen() {
            debug!("evaluating against a registry that was not frozen");
        }

        // Resolve applicable checks once per type; resource types without checks are skipped.
        let mut plan: Vec<Vec<&dyn Check>> = Vec::new();
        let mut units: Vec<(&ResourceInstance, usize)> = Vec::new();
        for (resource_type, instances) in configuration.iter() {
            let checks = registry.checks_for(resource_type);
            if checks.is_empty() {
                debug!(resource_type, "no registered checks apply");
                continue;
            }
            let idx = plan.len();
            plan.push(checks);
            units.extend(instances.iter().map(|instance| (instance, idx)));
        }

        let run = if self.options.parallel {
            self.dispatch_parallel(&plan, &units)
        } else {
            self.dispatch_sequential(&plan, &units)
        };

        if run.cancelled {
            warn!(
                evaluated = run.resources_evaluated,
                pending = units.len() - run.resources_evaluated,
                "evaluation cancelled; remaining resources were not evaluated"
            );
        }
        run
    }

    fn dispatch_sequential(
        &self,
        plan: &[Vec<&dyn Check>],
        units: &[(&ResourceInstance, usize)],
    ) -> EvaluationRun {
        let mut run = EvaluationRun::default();
        for &(instance, idx) in units {
            if self.is_cancelled() {
                run.cancelled = true;
                break;
            }
            run.records.extend(evaluate_resource(instance, &plan[idx]));
            run.resources_evaluated += 1;
        }
        run
    }

    fn dispatch_parallel(
        &self,
        plan: &[Vec<&dyn Check>],
        units: &[(&ResourceInstance, usize)],
    ) -> EvaluationRun {
        let per_resource: Vec<Option<Vec<VerdictRecord>>> = units
            .par_iter()
            .map(|&(instance, idx)| {
                if self.is_cancelled() {
                    None
                } else {
                    Some(evaluate_resource(instance, &plan[idx]))
                }
            })
            .collect();

        let mut run = EvaluationRun::default();
        for records in per_resource {
            match records {
                Some(records) => {
                    run.records.extend(records);
                    run.resources_evaluated += 1;
                }
                None => run.cancelled = true,
            }
        }
        run
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }
}

fn evaluate_resource(instance: &ResourceInstance, checks: &[&dyn Check]) -> Vec<VerdictRecord> {
    checks
        .iter()
        .map(|check| evaluate_one(*check, instance))
        .collect()
}

fn evaluate_one(check: &dyn Check, instance: &ResourceInstance) -> VerdictRecord {
    let outcome = match instance.shape_error() {
        Some(reason) => Err(PredicateFault::MalformedResource {
            reason: reason.to_string(),
        }),
        None => panic::catch_unwind(AssertUnwindSafe(|| check.evaluate(instance)))
            .unwrap_or_else(|payload| {
                Err(PredicateFault::Panicked {
                    message: panic_payload_to_string(payload.as_ref()),
                })
            }),
    };

    let meta = check.meta();
    let (verdict, note) = match outcome {
        Ok(verdict) => (verdict, None),
        Err(fault) => {
            warn!(
                check_id = %meta.id,
                resource = %instance.address(),
                error = %fault,
                "predicate fault; recording FAILED"
            );
            (Verdict::Failed, Some(fault.to_string()))
        }
    };

    debug!(
        check_id = %meta.id,
        resource = %instance.address(),
        %verdict,
        "evaluated"
    );

    VerdictRecord {
        check_id: meta.id.clone(),
        check_name: meta.name.clone(),
        resource_type: instance.resource_type().to_string(),
        resource_identifier: instance.name().to_string(),
        verdict,
        category: meta.primary_category(),
        note,
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Evaluate with default options (sequential, not cancellable).
pub fn run(configuration: &Configuration, registry: &CheckRegistry) -> Vec<VerdictRecord> {
    Evaluator::default().run(configuration, registry)
}

/// Evaluate and aggregate into a report.
pub fn evaluate(
    configuration: &Configuration,
    registry: &CheckRegistry,
    options: EvalOptions,
) -> Report {
    let run = Evaluator::new(options).run_with_status(configuration, registry);
    let mut report = aggregate(&run.records);
    report.cancelled = run.cancelled;

    info!(
        resources = run.resources_evaluated,
        records = report.records.len(),
        passed = report.counts.passed,
        failed = report.counts.failed,
        skipped = report.counts.skipped,
        "evaluation finished"
    );
    report
}
