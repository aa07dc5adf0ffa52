// CLI command definitions

use super::chart::{RenderCommand, ScriptCommand, VerifyCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "featbit-chart-verify",
    version,
    about = "Template verification tool for the FeatBit Helm chart",
    long_about = "Renders FeatBit chart templates with scenario values and verifies the decoded resources"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render a single chart template with a set of values
    Render(RenderCommand),

    /// Run a scenario suite against the chart and report the outcomes
    Verify(VerifyCommand),

    /// Print the generated init container readiness scripts
    Script(ScriptCommand),
}
