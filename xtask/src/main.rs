//! Build automation for featbit-chart-verify
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run tests
//! - suite: Run the chart scenario suite with a local helm
//! - ci: Run CI checks
//! - format: Format code
//! - clippy: Run clippy

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for featbit-chart-verify")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Also run the `#[ignore]`d tests that need helm and a chart checkout
        #[arg(long)]
        with_helm: bool,
    },
    /// Run the scenario suite against a chart checkout
    Suite {
        /// Chart source directory
        #[arg(long, default_value = "../charts/featbit")]
        chart: String,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
    /// Format code
    Format {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root());

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { with_helm } => test(&sh, with_helm),
        Commands::Suite { chart } => suite(&sh, &chart),
        Commands::Ci => ci(&sh),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building featbit-chart-verify...");

    if release {
        cmd!(sh, "cargo build --release").run()?;
        println!("✅ Release build completed: target/release/featbit-chart-verify");
    } else {
        cmd!(sh, "cargo build").run()?;
        println!("✅ Debug build completed: target/debug/featbit-chart-verify");
    }

    Ok(())
}

fn test(sh: &Shell, with_helm: bool) -> Result<()> {
    println!("🧪 Running tests...");

    cmd!(sh, "cargo test --all").run()?;
    if with_helm {
        cmd!(sh, "cargo test --all -- --ignored").run()?;
    }

    println!("✅ All tests passed");
    Ok(())
}

fn suite(sh: &Shell, chart: &str) -> Result<()> {
    println!("📋 Running scenario suite against {chart}...");

    cmd!(sh, "cargo run -- verify --chart {chart}").run()?;

    println!("✅ Suite completed");
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    println!("\n📝 Checking formatting...");
    format(sh, true)?;

    println!("\n🔧 Running clippy...");
    clippy(sh)?;

    println!("\n🧪 Running tests...");
    test(sh, false)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(
        sh,
        "cargo clippy --all-targets --all-features -- -D warnings"
    )
    .run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
