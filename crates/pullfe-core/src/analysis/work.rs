use super::AnalysisError;
use crate::core::models::trajectory::{Direction, PulledLeg, PullingRecord};
use ndarray::{Array1, ArrayView1, s};
use tracing::instrument;

/// Cumulative work along a pulling leg, in the energy unit of `force × length`.
///
/// Work at step 0 is zero and step `i` adds `speed × force[i-1] × (t[i] - t[i-1])`
/// (a left Riemann sum).
pub fn cumulative_work(
    times: &Array1<f64>,
    forces: &Array1<f64>,
    speed: f64,
) -> Result<Array1<f64>, AnalysisError> {
    if forces.len() != times.len() {
        return Err(AnalysisError::ShapeMismatch {
            context: "work forces",
            expected: times.len(),
            found: forces.len(),
        });
    }

    let mut work = Array1::<f64>::zeros(times.len());
    let mut accumulated = 0.0;
    for i in 1..times.len() {
        accumulated += speed * forces[i - 1] * (times[i] - times[i - 1]);
        work[i] = accumulated;
    }
    Ok(work)
}

/// Commanded restraint position at each time: `t × speed + lambda_start`.
pub fn lambda_schedule(times: &Array1<f64>, speed: f64, lambda_start: f64) -> Array1<f64> {
    times.mapv(|t| t * speed + lambda_start)
}

/// Derives the lambda schedule and accumulated work for a single pulling leg.
///
/// `speed` is the magnitude of the pulling speed; the direction supplies its sign
/// and the bound the schedule starts from.
pub fn pull_leg(
    record: &PullingRecord,
    direction: Direction,
    speed: f64,
    lambda_min: f64,
    lambda_max: f64,
) -> Result<PulledLeg, AnalysisError> {
    if record.positions.len() != record.times.len() {
        return Err(AnalysisError::ShapeMismatch {
            context: "leg positions",
            expected: record.times.len(),
            found: record.positions.len(),
        });
    }

    let signed_speed = direction.speed_sign() * speed;
    let work = cumulative_work(&record.times, &record.forces, signed_speed)?;
    Ok(PulledLeg {
        times: record.times.clone(),
        lambdas: lambda_schedule(
            &record.times,
            signed_speed,
            direction.lambda_start(lambda_min, lambda_max),
        ),
        positions: record.positions.clone(),
        work,
    })
}

/// Stitches a reverse leg onto the end of a forward leg.
///
/// The first reverse sample duplicates the forward leg's last time point and is
/// dropped. Reverse times are offset by the final forward time and reverse work by
/// the final forward work, so the combined series are continuous across the join.
/// The combined length is `forward.len() + reverse.len() - 1`.
#[instrument(level = "trace", skip_all)]
pub fn combine_legs(forward: &PulledLeg, reverse: &PulledLeg) -> PulledLeg {
    if forward.is_empty() {
        return reverse.clone();
    }
    if reverse.is_empty() {
        return forward.clone();
    }

    let last = forward.len() - 1;
    let t_end = forward.times[last];
    let w_end = forward.work[last];

    let reverse_times = reverse.times.slice(s![1..]).mapv(|t| t + t_end);
    let reverse_work = reverse.work.slice(s![1..]).mapv(|w| w + w_end);

    PulledLeg {
        times: join(forward.times.view(), reverse_times.view()),
        lambdas: join(forward.lambdas.view(), reverse.lambdas.slice(s![1..])),
        positions: join(forward.positions.view(), reverse.positions.slice(s![1..])),
        work: join(forward.work.view(), reverse_work.view()),
    }
}

fn join(head: ArrayView1<f64>, tail: ArrayView1<f64>) -> Array1<f64> {
    head.iter().chain(tail.iter()).copied().collect()
}
