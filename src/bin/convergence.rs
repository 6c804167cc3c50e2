//! Experiment Runner for the Convergence Analysis of the iterative methods.
//!
//! This executable builds random symmetric matrices with a known spectrum,
//! `A = Q·diag(λ)·Qᵗ` with `Q` orthogonal, runs every iterative eigenvalue
//! method on each of them and records iteration counts, convergence flags and
//! the absolute error against the known eigenvalues.

use anyhow::Result;
use clap::Parser;
use eigenlab::{
    LinalgError, Matrix,
    algorithms::{IterationOptions, jacobi, lr, power, qr},
    provider::{FaerProvider, LinearAlgebraProvider},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::path::PathBuf;

/// Command-line arguments for the convergence experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "convergence-runner",
    about = "Measures iteration counts and accuracy of the iterative eigenvalue methods."
)]
struct ConvergenceArgs {
    /// Order of the random test matrices.
    #[clap(long, default_value_t = 6)]
    n: usize,

    /// Number of random matrices to generate.
    #[clap(long, default_value_t = 20)]
    trials: usize,

    /// Seed of the random number generator.
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// Represents a single row of data for the convergence analysis CSV.
#[derive(Debug, Serialize)]
struct ConvergenceRecord {
    trial: usize,
    method: &'static str,
    n: usize,
    /// Empty when the method failed.
    iterations: Option<usize>,
    converged: bool,
    /// Distance to the targeted eigenvalue, or the largest error over the
    /// sorted spectrum for full-spectrum methods.
    abs_error: Option<f64>,
    error: Option<String>,
}

/// A random symmetric matrix with prescribed eigenvalues `(i + 1) + U[0, 0.5)`.
fn random_symmetric(n: usize, rng: &mut StdRng) -> Result<(Matrix, Vec<f64>)> {
    let mut eigenvalues: Vec<f64> = (0..n)
        .map(|i| (i + 1) as f64 + 0.5 * rng.random::<f64>())
        .collect();
    let g = Matrix::from_fn(n, n, |_, _| rng.random::<f64>() - 0.5)?;
    let (q, _) = FaerProvider.qr(&g)?;
    let lambda = Matrix::from_fn(n, n, |i, j| if i == j { eigenvalues[i] } else { 0.0 })?;
    // Round-off leaves A slightly asymmetric.
    let a = q.matmul(&lambda)?.matmul(&q.transpose())?.symmetrize()?;
    eigenvalues.sort_by(f64::total_cmp);
    Ok((a, eigenvalues))
}

fn nearest_error(value: f64, eigenvalues: &[f64]) -> f64 {
    eigenvalues
        .iter()
        .map(|e| (value - e).abs())
        .fold(f64::INFINITY, f64::min)
}

fn spectrum_error(computed: &[f64], sorted_exact: &[f64]) -> f64 {
    let mut computed = computed.to_vec();
    computed.sort_by(f64::total_cmp);
    computed
        .iter()
        .zip(sorted_exact)
        .map(|(c, e)| (c - e).abs())
        .fold(0.0, f64::max)
}

fn record(
    trial: usize,
    method: &'static str,
    n: usize,
    outcome: Result<(usize, bool, f64), LinalgError>,
) -> ConvergenceRecord {
    match outcome {
        Ok((iterations, converged, abs_error)) => ConvergenceRecord {
            trial,
            method,
            n,
            iterations: Some(iterations),
            converged,
            abs_error: Some(abs_error),
            error: None,
        },
        Err(err) => {
            log::warn!("{method} failed on trial {trial}: {err}");
            ConvergenceRecord {
                trial,
                method,
                n,
                iterations: None,
                converged: false,
                abs_error: None,
                error: Some(err.to_string()),
            }
        }
    }
}

/// The main entry point for the convergence experiment.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = ConvergenceArgs::parse();
    anyhow::ensure!(args.n >= 1, "--n must be at least 1");
    log::info!(
        "Starting convergence analysis: n = {}, trials = {}, seed = {}",
        args.n,
        args.trials,
        args.seed
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut results = Vec::new();

    for trial in 0..args.trials {
        let (a, exact) = random_symmetric(args.n, &mut rng)?;
        let (smallest, largest) = (exact[0], exact[exact.len() - 1]);
        log::info!("Trial {trial}: spectrum in [{smallest:.4}, {largest:.4}]");

        let n = args.n;
        results.push(record(
            trial,
            "power",
            n,
            power::power_iteration(&a, IterationOptions::POWER)
                .map(|r| (r.iterations, r.converged, (r.eigenvalue - largest).abs())),
        ));
        results.push(record(
            trial,
            "inverse_power",
            n,
            power::inverse_power_iteration(&a, &FaerProvider, IterationOptions::INVERSE_POWER)
                .map(|r| (r.iterations, r.converged, (r.eigenvalue - smallest).abs())),
        ));
        results.push(record(
            trial,
            "rayleigh",
            n,
            power::rayleigh_quotient_iteration(&a, &FaerProvider, IterationOptions::RAYLEIGH, None)
                .map(|r| (r.iterations, r.converged, nearest_error(r.eigenvalue, &exact))),
        ));
        results.push(record(
            trial,
            "jacobi",
            n,
            jacobi::jacobi_eigen(&a, IterationOptions::JACOBI)
                .map(|r| (r.iterations, r.converged, spectrum_error(&r.eigenvalues, &exact))),
        ));
        results.push(record(
            trial,
            "qr",
            n,
            qr::qr_eigenvalues(&a, &FaerProvider, IterationOptions::QR)
                .map(|r| (r.iterations, r.converged, spectrum_error(&r.eigenvalues, &exact))),
        ));
        results.push(record(
            trial,
            "lr",
            n,
            lr::lr_eigenvalues(&a, IterationOptions::LR)
                .map(|r| (r.iterations, r.converged, spectrum_error(&r.eigenvalues, &exact))),
        ));
    }

    let failures = results.iter().filter(|r| !r.converged).count();
    if failures > 0 {
        log::warn!("{failures} of {} runs did not converge.", results.len());
    }

    log::info!("Writing results to {:?}...", &args.output);
    let mut writer = csv::Writer::from_path(&args.output)?;
    for record in results {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Convergence analysis complete.");
    Ok(())
}
