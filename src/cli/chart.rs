//! Chart verification commands

use crate::cli::display::{ScenarioRow, TableRenderer};
use crate::domain::suite::parse_set_pair;
use crate::{
    infra_readiness_script, service_readiness_script, HelmCli, ScenarioInput, ScenarioRunner,
    ScenarioSpec, SuiteConfig, TemplateRenderer, Verbosity,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct RenderCommand {
    /// Path to the chart source directory
    #[arg(long, short = 'c')]
    pub chart: PathBuf,

    /// Chart-relative template path (e.g. templates/api-deployment.yaml)
    #[arg(long, short = 't')]
    pub template: String,

    /// Release name
    #[arg(long, short = 'r', default_value = "featbit")]
    pub release: String,

    /// Target namespace; a randomized one is minted if not given
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Value overrides (--set key=value, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Helm binary to invoke (defaults to `helm` on PATH)
    #[arg(long)]
    pub helm_binary: Option<PathBuf>,
}

impl RenderCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let mut input = match &self.namespace {
            Some(namespace) => ScenarioInput::new(namespace, &self.release),
            None => ScenarioInput::isolated(&self.release),
        };
        for raw in &self.set {
            let (key, value) = parse_set_pair(raw)?;
            input = input.with_set(key, value);
        }

        let mut renderer = HelmCli::new(&self.chart);
        if let Some(binary) = &self.helm_binary {
            renderer = renderer.with_binary(binary);
        }

        let rendered = renderer.render(&input, &self.template)?;
        print!("{rendered}");
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct VerifyCommand {
    /// Path to the scenario suite file (TOML)
    #[arg(long, short = 'f', default_value = "verify.toml")]
    pub config: PathBuf,

    /// Chart source directory; overrides the suite file's `chart`
    #[arg(long, short = 'c')]
    pub chart: Option<PathBuf>,

    /// Extra value overrides applied to every scenario
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Suppress per-scenario render logging
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Helm binary to invoke (defaults to `helm` on PATH)
    #[arg(long)]
    pub helm_binary: Option<PathBuf>,
}

impl VerifyCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let suite = SuiteConfig::from_file(&self.config)?;
        let chart = self
            .chart
            .clone()
            .or_else(|| suite.chart.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("no chart path: pass --chart or set `chart` in the suite file")
            })?;

        let mut renderer = HelmCli::new(&chart);
        if let Some(binary) = &self.helm_binary {
            renderer = renderer.with_binary(binary);
        }
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };
        let runner = ScenarioRunner::new(&renderer).with_verbosity(verbosity);

        let mut rows = Vec::with_capacity(suite.scenarios.len());
        for spec in &suite.scenarios {
            let mut input = spec.to_input();
            for raw in &self.set {
                let (key, value) = parse_set_pair(raw)?;
                input = input.with_set(key, value);
            }
            rows.push(run_spec(&runner, spec, &input));
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!(
                "{}",
                TableRenderer::new().render_suite_report(&chart.display().to_string(), &rows)
            );
        }

        let failed = rows.iter().filter(|row| !row.passed).count();
        if failed > 0 {
            anyhow::bail!("{failed} of {} scenarios failed", rows.len());
        }
        Ok(())
    }
}

fn run_spec<R: TemplateRenderer>(
    runner: &ScenarioRunner<'_, R>,
    spec: &ScenarioSpec,
    input: &ScenarioInput,
) -> ScenarioRow {
    let mut row = ScenarioRow {
        name: spec.name.clone(),
        template: spec.template.clone(),
        namespace: input.namespace.clone(),
        resource: "-".to_string(),
        passed: false,
        detail: String::new(),
    };

    if spec.expect_render_failure {
        match runner.run_expecting_failure(&spec.name, input, &spec.template) {
            Ok(()) => {
                row.passed = true;
                row.detail = "renderer rejected the input".to_string();
            }
            Err(e) => row.detail = e.to_string(),
        }
        return row;
    }

    match runner.render_resource(input, &spec.template) {
        Ok(resource) => {
            row.resource = format!(
                "{}/{}",
                resource.kind(),
                resource.name().unwrap_or("<unnamed>")
            );
            row.passed = true;
            row.detail = "rendered and decoded".to_string();
        }
        Err(e) => row.detail = e.to_string(),
    }
    row
}

#[derive(Parser, Debug)]
pub struct ScriptCommand {
    /// Namespace baked into the service wait script
    #[arg(long, short = 'n', default_value = "default")]
    pub namespace: String,

    /// Release name
    #[arg(long, short = 'r', default_value = "featbit")]
    pub release: String,

    /// Chart full name used by the infrastructure wait script
    #[arg(long, default_value = "featbit")]
    pub fullname: String,

    /// API service port
    #[arg(long, default_value = "5000")]
    pub api_port: u16,

    /// Evaluation server port
    #[arg(long, default_value = "5100")]
    pub els_port: u16,

    /// DA server port
    #[arg(long, default_value = "8200")]
    pub das_port: u16,
}

impl ScriptCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        println!("# wait-for-other-components");
        println!(
            "{}",
            service_readiness_script(
                &self.namespace,
                &self.release,
                self.api_port,
                self.els_port,
                self.das_port,
            )
        );
        println!("# wait-for-infrastructure-dependencies");
        println!(
            "{}",
            infra_readiness_script(&self.namespace, &self.release, &self.fullname)
        );
        Ok(())
    }
}
