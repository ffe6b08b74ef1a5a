use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::result::{ZipError, ZipResult};
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the proxy invoke workspace",
    long_about = "A unified CLI for running the local handler invocation,\n\
                  CI checks, and Lambda packaging in the proxy invoke workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the proxy handler locally with the GET /health event
    Invoke,
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the proxy handler as a Lambda zip artifact
    LambdaPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifact
        #[arg(long, default_value = "target/lambda")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the local invocation harness
    Smoke,
    /// Run check + smoke
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

const LAMBDA_PACKAGE: &str = "proxy_invoke_lambda";
const LAMBDA_BIN: &str = "api_lambda";
const LOCAL_INVOKE_BIN: &str = "local_invoke";

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    exit(1);
}

fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => exit(status.code().unwrap_or(1)),
        Err(error) => fail(&format!("could not start cargo: {error}")),
    }
}

fn run_local_invoke() {
    run_cargo(&["run", "-p", LAMBDA_PACKAGE, "--bin", LOCAL_INVOKE_BIN]);
}

fn package_lambda(target: &str, profile: BuildProfile, dist_dir: &Path) {
    check_target_installed(target);

    step("Build proxy handler lambda binary");
    let mut cargo_args = vec!["build", "-p", LAMBDA_PACKAGE, "--bin", LAMBDA_BIN, "--target", target];
    cargo_args.extend(profile.as_cargo_flag());
    run_cargo(&cargo_args);

    step("Package lambda zip artifact");
    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(binary_name(LAMBDA_BIN, target));
    let binary = fs::read(&binary_path).unwrap_or_else(|error| {
        fail(&format!("cannot read lambda binary '{}': {error}", binary_path.display()))
    });

    let zip_path = dist_dir.join(format!("{LAMBDA_BIN}.zip"));
    if let Err(error) = fs::create_dir_all(dist_dir)
        .map_err(ZipError::from)
        .and_then(|_| write_bootstrap_zip(&binary, &zip_path))
    {
        fail(&format!("cannot write '{}': {error}", zip_path.display()));
    }

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

/// Skips the check when rustup itself is unavailable.
fn check_target_installed(target: &str) {
    let output = match Command::new("rustup").args(["target", "list", "--installed"]).output() {
        Ok(output) if output.status.success() => output,
        _ => {
            eprintln!("warning: could not list installed rust targets; skipping target check");
            return;
        }
    };

    if !target_listed(&String::from_utf8_lossy(&output.stdout), target) {
        fail(&format!(
            "rust target `{target}` is not installed; run `rustup target add {target}`"
        ));
    }
}

fn target_listed(installed: &str, target: &str) -> bool {
    installed.lines().any(|line| line.trim() == target)
}

fn binary_name(bin_name: &str, target: &str) -> String {
    if target.contains("windows") {
        format!("{bin_name}.exe")
    } else {
        bin_name.to_string()
    }
}

/// Lambda's custom runtime expects the executable at `bootstrap` in the
/// archive root.
fn write_bootstrap_zip(binary: &[u8], zip_path: &Path) -> ZipResult<()> {
    let mut zip = ZipWriter::new(fs::File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()?;
    Ok(())
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test proxy_invoke_core");
    run_cargo(&["test", "-p", "proxy_invoke_core"]);

    step("Test proxy_invoke_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_smoke() {
    step("Invoke proxy handler with GET /health");
    run_local_invoke();
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke => run_local_invoke(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Smoke => ci_smoke(),
                CiJob::All => {
                    ci_check();
                    ci_smoke();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LambdaPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_lambda(&target, profile, Path::new(&dist_dir));
        }
    }
}
