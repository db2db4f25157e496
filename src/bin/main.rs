//! ANOVA kernel command line interface
//!
//! Evaluates ANOVA (and linear/polynomial) kernels over feature collections
//! stored in LibSVM or CSV files.

use anova_kernel::core::{EvaluationMethod, FeatureSource, KernelError, Result};
use anova_kernel::kernel::{AnovaKernel, Kernel, LinearKernel, PolynomialKernel};
use anova_kernel::matrix::{compute_kernel_matrix, KernelMatrix};
use anova_kernel::persistence::{KernelDescriptor, MatrixReport};
use anova_kernel::{CSVDataset, DenseFeatures, LibSVMDataset};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "anova")]
#[command(about = "ANOVA kernel evaluation over LibSVM and CSV feature files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the ANOVA kernel for one index pair
    Eval(EvalArgs),
    /// Cross-check both recurrences on every index pair
    Check(CheckArgs),
    /// Compute a full kernel matrix
    Matrix(MatrixArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Left-side data file (LibSVM or CSV format)
    #[arg(long)]
    data: PathBuf,

    /// Right-side data file; defaults to the left-side file
    #[arg(long)]
    right: Option<PathBuf>,

    /// Data format: auto, libsvm, or csv
    #[arg(short, long, default_value = "auto")]
    format: String,

    /// ANOVA subset size (kernel degree)
    #[arg(long, default_value = "2", allow_negative_numbers = true)]
    degree: i32,

    /// Kernel cache size in MB
    #[arg(long, default_value = "10")]
    cache_size: usize,
}

#[derive(Args)]
struct EvalArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Index into the left-side collection
    #[arg(long)]
    left_index: usize,

    /// Index into the right-side collection
    #[arg(long)]
    right_index: usize,

    /// Recurrence used for evaluation
    #[arg(long, default_value = "subset-sum")]
    method: CliMethod,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Relative tolerance between the two recurrences
    #[arg(long, default_value = "1e-9")]
    tolerance: f64,
}

#[derive(Args)]
struct MatrixArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Kernel family
    #[arg(long, default_value = "anova")]
    kernel: CliKernel,

    /// Polynomial kernel gamma
    #[arg(long, default_value = "1.0")]
    gamma: f64,

    /// Polynomial kernel coef0
    #[arg(long, default_value = "1.0")]
    coef0: f64,

    /// Number of worker threads (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Output JSON report file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliMethod {
    /// Subset-sum dynamic programming table (stable, default)
    #[value(name = "subset-sum")]
    SubsetSum,
    /// Newton's identities over power sums
    #[value(name = "power-sum")]
    PowerSum,
}

impl From<CliMethod> for EvaluationMethod {
    fn from(cli_method: CliMethod) -> Self {
        match cli_method {
            CliMethod::SubsetSum => EvaluationMethod::SubsetSum,
            CliMethod::PowerSum => EvaluationMethod::PowerSum,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    Anova,
    Linear,
    Polynomial,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Eval(args) => eval_command(args),
        Commands::Check(args) => check_command(args),
        Commands::Matrix(args) => matrix_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn eval_command(args: EvalArgs) -> Result<()> {
    let mut kernel = build_anova(&args.input)?;
    let method = EvaluationMethod::from(args.method);

    info!(
        "Evaluating K_{}(left[{}], right[{}]) with {method}",
        kernel.degree(),
        args.left_index,
        args.right_index
    );

    let value = kernel.compute_with(method, args.left_index, args.right_index)?;
    println!("{value}");
    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    let mut kernel = build_anova(&args.input)?;
    let (rows, cols) = kernel.shape().ok_or(KernelError::UnboundFeatures)?;
    let symmetric = kernel.is_symmetric();

    info!(
        "Cross-checking {rows}x{cols} pairs at degree {} (tolerance {})",
        kernel.degree(),
        args.tolerance
    );

    let mut checked = 0usize;
    let mut first_divergence = None;
    for i in 0..rows {
        let start = if symmetric { i } else { 0 };
        for j in start..cols {
            checked += 1;
            match kernel.compute_checked(i, j, args.tolerance) {
                Ok(_) => {}
                Err(KernelError::MethodDivergence {
                    subset_sum,
                    power_sum,
                    tolerance,
                }) => {
                    warn!("Pair ({i}, {j}): subset-sum {subset_sum} vs power-sum {power_sum}");
                    first_divergence.get_or_insert(KernelError::MethodDivergence {
                        subset_sum,
                        power_sum,
                        tolerance,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    match first_divergence {
        Some(e) => Err(e),
        None => {
            println!("{checked} pairs agree within {}", args.tolerance);
            Ok(())
        }
    }
}

fn matrix_command(args: MatrixArgs) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| KernelError::InvalidParameter(format!("Thread pool: {e}")))?;
    }

    let (left, right) = load_collections(&args.input)?;
    let cache_size = cache_size_bytes(&args.input)?;

    let (descriptor, matrix) = match args.kernel {
        CliKernel::Anova => {
            let kernel = AnovaKernel::with_features(left, right, args.input.degree, cache_size)?;
            let descriptor = KernelDescriptor::of(&kernel)
                .with_degree(kernel.degree())
                .with_method(EvaluationMethod::SubsetSum);
            (descriptor, run_matrix(&kernel)?)
        }
        CliKernel::Linear => {
            let mut kernel = LinearKernel::new(cache_size);
            kernel.bind(left, right)?;
            (KernelDescriptor::of(&kernel), run_matrix(&kernel)?)
        }
        CliKernel::Polynomial => {
            let degree = u32::try_from(args.input.degree).map_err(|_| {
                KernelError::InvalidParameter(format!(
                    "Polynomial degree must be positive, got: {}",
                    args.input.degree
                ))
            })?;
            let mut kernel =
                PolynomialKernel::new(degree, args.gamma, args.coef0)?.with_cache_size(cache_size);
            kernel.bind(left, right)?;
            let descriptor = KernelDescriptor::of(&kernel).with_degree(degree as usize);
            (descriptor, run_matrix(&kernel)?)
        }
    };

    if let Some(output_path) = args.output {
        MatrixReport::new(descriptor, matrix).save_to_file(&output_path)?;
        info!("Report saved to: {output_path:?}");
    } else {
        println!("# {} {}x{}", descriptor.name, matrix.rows, matrix.cols);
        for i in 0..matrix.rows {
            let row = matrix.row(i).unwrap_or_default();
            let line: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
            println!("{}", line.join(" "));
        }
    }

    Ok(())
}

fn run_matrix<K: Kernel + Clone>(kernel: &K) -> Result<KernelMatrix> {
    info!("Computing {} matrix", kernel.name());
    let matrix = compute_kernel_matrix(kernel)?;
    info!("Computed {}x{} kernel values", matrix.rows, matrix.cols);
    Ok(matrix)
}

fn build_anova(input: &InputArgs) -> Result<AnovaKernel> {
    let (left, right) = load_collections(input)?;
    AnovaKernel::with_features(left, right, input.degree, cache_size_bytes(input)?)
}

/// Convert the `--cache-size` value from MB to bytes
fn cache_size_bytes(input: &InputArgs) -> Result<usize> {
    input
        .cache_size
        .checked_mul(1024 * 1024)
        .ok_or_else(|| {
            KernelError::InvalidParameter(format!(
                "Cache size too large: {} MB",
                input.cache_size
            ))
        })
}

/// Load the left and right collections; a missing right file reuses the left one
fn load_collections(
    input: &InputArgs,
) -> Result<(Arc<dyn FeatureSource>, Arc<dyn FeatureSource>)> {
    info!("Loading left features from: {:?}", input.data);
    let Some(right_path) = &input.right else {
        let features: Arc<dyn FeatureSource> = Arc::new(load_features(&input.data, &input.format, 0)?);
        return Ok((features.clone(), features));
    };

    info!("Loading right features from: {right_path:?}");
    let left = load_features(&input.data, &input.format, 0)?;
    let right = load_features(right_path, &input.format, left.dim())?;
    // LibSVM dimensions come from the largest index seen, so pad the left side
    // when the right file reaches further
    let left = if right.dim() > left.dim() {
        load_features(&input.data, &input.format, right.dim())?
    } else {
        left
    };

    Ok((Arc::new(left), Arc::new(right)))
}

fn load_features(path: &Path, format: &str, min_dim: usize) -> Result<DenseFeatures> {
    let format = if format == "auto" {
        detect_format(path)
    } else {
        format.to_string()
    };

    let features = match format.as_str() {
        "libsvm" => LibSVMDataset::from_file(path)?.to_features_with_dim(min_dim),
        "csv" => CSVDataset::from_file(path)?.into_features(),
        _ => {
            return Err(KernelError::InvalidParameter(format!(
                "Unsupported format: {format}. Use 'libsvm' or 'csv'"
            )))
        }
    };

    info!(
        "Loaded {} vectors with {} dimensions ({format})",
        features.num_vectors(),
        features.dim()
    );
    Ok(features)
}

fn detect_format(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => "csv".to_string(),
        _ => "libsvm".to_string(),
    }
}
