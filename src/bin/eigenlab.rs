//! Command-line runner for the eigenvalue and factorization kernels.
//!
//! Loads a dense matrix from a headerless CSV file, runs one method on it and
//! prints the result. With `--output`, the numeric result is also written as
//! CSV: eigenvalues, eigenvector components or polynomial coefficients as
//! `index,value` rows, triangular factors as two matrix files.

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use eigenlab::{
    Matrix,
    algorithms::{IterationOptions, decomposition, gershgorin, jacobi, lr, polynomial, power, qr},
    diagnostics::MatrixReport,
    provider::FaerProvider,
    results::{EigenResult, PolynomialResult, SpectrumResult, TriangularPair},
    utils::data_loader::{load_matrix_csv, save_matrix_csv},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The method to run on the input matrix.
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
enum Method {
    /// Dominant eigenpair by power iteration.
    Power,
    /// Smallest-magnitude eigenpair by inverse power iteration.
    InversePower,
    /// Eigenpair nearest `--shift` by Rayleigh quotient iteration.
    Rayleigh,
    /// All eigenpairs of a symmetric matrix by Jacobi rotations.
    Jacobi,
    /// All eigenvalues by unshifted QR iteration.
    Qr,
    /// All eigenvalues by LR iteration.
    Lr,
    /// Gershgorin disc bounds.
    Gershgorin,
    /// Characteristic polynomial by the Leverrier-Faddeev method.
    Leverrier,
    /// Characteristic polynomial by the Krylov method.
    Krylov,
    /// LU decomposition without pivoting.
    Lu,
    /// Cholesky decomposition.
    Cholesky,
    /// Norms, rank, determinant and condition number.
    Stats,
}

impl Method {
    fn default_options(self) -> IterationOptions {
        match self {
            Method::InversePower => IterationOptions::INVERSE_POWER,
            Method::Rayleigh => IterationOptions::RAYLEIGH,
            Method::Jacobi => IterationOptions::JACOBI,
            Method::Qr => IterationOptions::QR,
            Method::Lr => IterationOptions::LR,
            _ => IterationOptions::POWER,
        }
    }
}

/// Command-line arguments for the eigenlab runner.
#[derive(Parser, Debug)]
#[clap(
    name = "eigenlab",
    about = "Runs a classical eigenvalue method or factorization on a CSV matrix."
)]
struct Args {
    /// The method to run.
    #[clap(long, value_enum)]
    method: Method,

    /// Path to the input matrix: one row per line, comma-separated, no header.
    #[clap(long, value_name = "PATH")]
    input: PathBuf,

    /// Optional path of the CSV file where the numeric result is written.
    #[clap(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Overrides the method's default iteration budget.
    #[clap(long)]
    max_iterations: Option<usize>,

    /// Overrides the method's default convergence tolerance.
    #[clap(long)]
    tolerance: Option<f64>,

    /// Initial eigenvalue guess for Rayleigh quotient iteration.
    #[clap(long, allow_hyphen_values = true)]
    shift: Option<f64>,
}

impl Args {
    fn options(&self) -> IterationOptions {
        let defaults = self.method.default_options();
        defaults
            .with_max_iterations(self.max_iterations.unwrap_or(defaults.max_iterations))
            .with_tolerance(self.tolerance.unwrap_or(defaults.tolerance))
    }
}

/// A single `index,value` row of the CSV output.
#[derive(Debug, Serialize)]
struct ValueRecord {
    index: usize,
    value: f64,
}

fn write_values(path: &Path, values: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (index, &value) in values.iter().enumerate() {
        writer.serialize(ValueRecord { index, value })?;
    }
    writer.flush()?;
    Ok(())
}

/// `dir/name.csv` -> `dir/name_{suffix}.csv`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    path.with_file_name(format!("{stem}_{suffix}.{extension}"))
}

fn format_vector(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.5}")).collect();
    format!("({})", parts.join(", "))
}

fn warn_if_not_converged(converged: bool, iterations: usize) {
    if !converged {
        log::warn!("Method did not converge within {iterations} iterations; showing the last estimate.");
    }
}

fn print_eigenpair(result: &EigenResult) {
    println!("lambda = {:.10}", result.eigenvalue);
    println!("v = {}", format_vector(&result.eigenvector));
    println!(
        "iterations = {}, converged = {}",
        result.iterations, result.converged
    );
    warn_if_not_converged(result.converged, result.iterations);
}

fn print_spectrum(result: &SpectrumResult) {
    for (i, lambda) in result.eigenvalues.iter().enumerate() {
        println!("lambda{} = {lambda:.10}", i + 1);
    }
    println!(
        "iterations = {}, converged = {}",
        result.iterations, result.converged
    );
    warn_if_not_converged(result.converged, result.iterations);
}

fn print_polynomial(result: &PolynomialResult) {
    let degree = result.degree();
    println!("Characteristic polynomial coefficients (from lambda^n to lambda^0):");
    for (i, c) in result.coefficients.iter().enumerate() {
        println!("a_{} = {c:.10}", degree - i);
    }
    println!("p(λ) = {result}");
}

fn print_factors(pair: &TriangularPair, upper_name: &str) {
    println!("L =\n{}", pair.lower);
    println!("{upper_name} =\n{}", pair.upper);
}

fn write_factors(path: &Path, pair: &TriangularPair) -> Result<()> {
    save_matrix_csv(with_suffix(path, "lower"), &pair.lower)?;
    save_matrix_csv(with_suffix(path, "upper"), &pair.upper)?;
    Ok(())
}

fn run(args: &Args, a: &Matrix) -> Result<()> {
    let opts = args.options();
    let output = args.output.as_deref();

    match args.method {
        Method::Power | Method::InversePower | Method::Rayleigh => {
            let result = match args.method {
                Method::Power => power::power_iteration(a, opts)?,
                Method::InversePower => power::inverse_power_iteration(a, &FaerProvider, opts)?,
                _ => power::rayleigh_quotient_iteration(a, &FaerProvider, opts, args.shift)?,
            };
            print_eigenpair(&result);
            if let Some(path) = output {
                write_values(path, &result.eigenvector)?;
            }
        }
        Method::Jacobi => {
            if !a.is_symmetric(1e-12) {
                log::warn!("Input is not symmetric; Jacobi rotations assume symmetry.");
            }
            let result = jacobi::jacobi_eigen(a, opts)?;
            for (i, lambda) in result.eigenvalues.iter().enumerate() {
                println!("lambda{} = {lambda:.10}", i + 1);
                println!("v = {}", format_vector(&result.eigenvectors.column(i)));
            }
            println!(
                "iterations = {}, converged = {}",
                result.iterations, result.converged
            );
            warn_if_not_converged(result.converged, result.iterations);
            if let Some(path) = output {
                write_values(path, &result.eigenvalues)?;
                save_matrix_csv(with_suffix(path, "vectors"), &result.eigenvectors)?;
            }
        }
        Method::Qr | Method::Lr => {
            let result = if args.method == Method::Qr {
                qr::qr_eigenvalues(a, &FaerProvider, opts)?
            } else {
                lr::lr_eigenvalues(a, opts)?
            };
            print_spectrum(&result);
            if let Some(path) = output {
                write_values(path, &result.eigenvalues)?;
            }
        }
        Method::Gershgorin => {
            let result = gershgorin::gershgorin_discs(a)?;
            for (i, disc) in result.discs.iter().enumerate() {
                println!(
                    "Disc {}: center = {:.5}, radius = {:.5}",
                    i + 1,
                    disc.center,
                    disc.radius
                );
            }
            println!(
                "Estimated eigenvalue range: [{:.5}, {:.5}]",
                result.min_bound, result.max_bound
            );
            if let Some(path) = output {
                let mut writer = csv::Writer::from_path(path)?;
                for disc in &result.discs {
                    writer.serialize(disc)?;
                }
                writer.flush()?;
            }
        }
        Method::Leverrier | Method::Krylov => {
            let result = if args.method == Method::Leverrier {
                polynomial::leverrier_faddeev(a)?
            } else {
                polynomial::krylov_polynomial(a, &FaerProvider)?
            };
            print_polynomial(&result);
            if let Some(path) = output {
                write_values(path, &result.coefficients)?;
            }
        }
        Method::Lu => {
            let pair = decomposition::lu_decompose(a)?;
            print_factors(&pair, "U");
            if let Some(path) = output {
                write_factors(path, &pair)?;
            }
        }
        Method::Cholesky => {
            let pair = decomposition::cholesky(a)?;
            print_factors(&pair, "L^T");
            if let Some(path) = output {
                write_factors(path, &pair)?;
            }
        }
        Method::Stats => {
            let report = MatrixReport::new(a, &FaerProvider)?;
            println!("shape: {}x{}", report.rows, report.cols);
            println!("Frobenius norm: {:.6}", report.frobenius_norm);
            println!("1-norm: {:.6}", report.one_norm);
            println!("Infinity norm: {:.6}", report.infinity_norm);
            println!("2-norm: {:.6}", report.two_norm);
            println!("rank: {}", report.rank);
            println!("symmetric: {}", report.symmetric);
            if let Some(trace) = report.trace {
                println!("trace: {trace:.6}");
            }
            if let Some(det) = report.determinant {
                println!("determinant: {det:.6}");
            }
            match report.condition_number {
                Some(cond) => println!("condition number (2-norm): {cond:.6}"),
                None if a.is_square() => println!("condition number (2-norm): singular"),
                None => {}
            }
            println!("singular values: {}", format_vector(&report.singular_values));
            if let Some(path) = output {
                write_values(path, &report.singular_values)?;
            }
        }
    }

    if let Some(path) = output {
        log::info!("Results written to {:?}", path);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = Args::parse();

    if let Some(tolerance) = args.tolerance {
        ensure!(
            tolerance.is_finite() && tolerance > 0.0,
            "--tolerance must be a positive number, got {tolerance}"
        );
    }

    log::info!("Loading matrix from {:?}...", &args.input);
    let a = load_matrix_csv(&args.input)
        .with_context(|| format!("failed to load matrix from {:?}", args.input))?;
    log::info!(
        "Running {:?} on a {}x{} matrix.",
        args.method,
        a.rows(),
        a.cols()
    );
    println!("Input matrix:\n{a}");

    run(&args, &a).with_context(|| format!("{:?} failed", args.method))
}
