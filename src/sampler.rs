use crate::core::errors::RunError;
use crate::{RandomSource, RunConfig, bb84};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate statistics over repeated independent runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub runs: usize,
    /// Mean of the per-run QBER, in `[0, 1]`.
    pub mean_qber: f64,
    pub accepted: usize,
    pub aborted: usize,
    pub mean_sifted: f64,
    pub mean_key_length: f64,
}

impl SampleSummary {
    pub fn acceptance_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.accepted as f64 / self.runs as f64
        }
    }
}

/// Repeats a BB84 run many times with one config.
///
/// Single runs are noisy estimates; averaging over many shows how QBER and
/// key yield respond to noise and interception.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    pub config: RunConfig,
}

impl Sampler {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Performs `runs` independent runs and averages their results.
    ///
    /// # Arguments
    ///
    /// * `runs` - Number of runs to perform. Zero yields an empty summary.
    /// * `rng` - Source of randomness shared by all runs.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        runs: usize,
        rng: &mut R,
    ) -> Result<SampleSummary, RunError> {
        self.config.validate()?;

        let mut summary = SampleSummary {
            runs,
            ..SampleSummary::default()
        };
        if runs == 0 {
            return Ok(summary);
        }

        let mut qber_sum = 0.0;
        let mut sifted_sum = 0usize;
        let mut key_sum = 0usize;

        for _ in 0..runs {
            let result = bb84::run(&self.config, rng)?.result;
            qber_sum += result.qber;
            sifted_sum += result.sifted_count;
            key_sum += result.final_key.len();
            if result.decision.is_accept() {
                summary.accepted += 1;
            } else {
                summary.aborted += 1;
            }
        }

        let n = runs as f64;
        summary.mean_qber = qber_sum / n;
        summary.mean_sifted = sifted_sum as f64 / n;
        summary.mean_key_length = key_sum as f64 / n;

        debug!(
            runs,
            mean_qber = summary.mean_qber,
            accepted = summary.accepted,
            "sampling complete"
        );
        Ok(summary)
    }
}
