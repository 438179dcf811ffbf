use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use standforge::api::{
    build_stand_group_with, drift_report, generate_contract, generate_spec_from_form_data,
    stand_dimension_lines, BuildOptions, BuiltStand, FormData, StandType, SurfaceCfg,
};

mod batch;
mod provenance;

use provenance::{write_json_artifact, Payload};

#[derive(Parser)]
#[command(name = "standforge")]
#[command(about = "Display-stand geometry, contracts and drift checks")]
struct Cmd {
    /// Surface-detail seed; omit for entropy
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Surface-detail texel resolution
    #[arg(long, global = true, default_value_t = 32)]
    surface_size: usize,

    #[command(subcommand)]
    action: Action,
}

/// Where the form comes from. Neither flag means all defaults.
#[derive(Args, Debug, Clone)]
struct FormArgs {
    /// Form JSON file, or "-" for stdin
    #[arg(long, conflicts_with = "json")]
    form: Option<PathBuf>,
    /// Inline form JSON
    #[arg(long)]
    json: Option<String>,
}

#[derive(Subcommand)]
enum Action {
    /// Build the stand and write geometry + metadata as JSON
    Build {
        #[command(flatten)]
        form: FormArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Derive the contract for a form
    Contract {
        #[command(flatten)]
        form: FormArgs,
        /// Print the plain-text constraint block instead of JSON
        #[arg(long)]
        text: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Width/depth/height dimension lines for the stand block
    Annotate {
        #[command(flatten)]
        form: FormArgs,
        /// Vertical label offset in cm
        #[arg(long, default_value_t = 2.0)]
        offset: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check a built-geometry JSON against the spec a form resolves to
    Validate {
        #[command(flatten)]
        form: FormArgs,
        #[arg(long)]
        built: PathBuf,
    },
    /// Run every row of a CSV of form fields; write a CSV or Parquet summary
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print version, code revision and known stand types
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    let opts = BuildOptions {
        surface_seed: cmd.seed,
        surface: SurfaceCfg {
            size: cmd.surface_size,
        },
        ..BuildOptions::default()
    };
    match cmd.action {
        Action::Build { form, out } => build(&form, out.as_deref(), &opts),
        Action::Contract { form, text, out } => contract(&form, text, out.as_deref()),
        Action::Annotate { form, offset, out } => annotate(&form, offset, out.as_deref()),
        Action::Validate { form, built } => validate(&form, &built),
        Action::Batch { input, out } => batch::run(&input, &out, &opts),
        Action::Report => report(),
    }
}

fn load_form(args: &FormArgs) -> Result<FormData> {
    let raw = match (&args.form, &args.json) {
        (Some(path), _) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading form from stdin")?;
            buf
        }
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("reading form {}", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => return Ok(FormData::default()),
    };
    FormData::from_json_str(&raw).context("parsing form JSON")
}

/// Pretty JSON to `out` (with sidecar) or stdout.
fn emit<T: serde::Serialize>(
    value: &T,
    out: Option<&Path>,
    command: &'static str,
    form: &FormData,
) -> Result<()> {
    match out {
        Some(path) => {
            let params = json!({ "form": form });
            let sidecar = write_json_artifact(path, value, Payload::new(command, params))?;
            tracing::info!(
                out = %path.display(),
                sidecar = %sidecar.display(),
                "{command} written"
            );
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn build(args: &FormArgs, out: Option<&Path>, opts: &BuildOptions) -> Result<()> {
    let form = load_form(args)?;
    let spec = generate_spec_from_form_data(&form);
    let built = build_stand_group_with(&spec, &form, opts);
    tracing::info!(
        stand_type = %built.metadata.stand_type,
        total_products = built.metadata.total_products,
        "built"
    );
    emit(&built, out, "build", &form)
}

fn contract(args: &FormArgs, text: bool, out: Option<&Path>) -> Result<()> {
    let form = load_form(args)?;
    let contract = generate_contract(&generate_spec_from_form_data(&form));
    if text {
        let body = contract.to_constraint_text();
        match out {
            Some(path) => {
                provenance::ensure_parent(path)?;
                std::fs::write(path, &body)
                    .with_context(|| format!("writing {}", path.display()))?;
                let params = json!({ "form": form, "text": true });
                provenance::write_sidecar(path, Payload::new("contract", params))?;
            }
            None => print!("{body}"),
        }
        return Ok(());
    }
    emit(&contract, out, "contract", &form)
}

fn annotate(args: &FormArgs, offset: f64, out: Option<&Path>) -> Result<()> {
    let form = load_form(args)?;
    let lines = stand_dimension_lines(&generate_spec_from_form_data(&form), offset);
    emit(&lines, out, "annotate", &form)
}

fn validate(args: &FormArgs, built_path: &Path) -> Result<()> {
    let form = load_form(args)?;
    let spec = generate_spec_from_form_data(&form);
    let raw = std::fs::read(built_path)
        .with_context(|| format!("reading {}", built_path.display()))?;
    let built: BuiltStand = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing built geometry {}", built_path.display()))?;
    let drift = drift_report(&built, &spec);
    let audit = generate_contract(&spec).audit(&built);
    let report = json!({
        "valid": drift.is_empty(),
        "drift": drift,
        "audit": audit,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !drift.is_empty() {
        let fields: Vec<_> = drift.iter().map(|d| d.to_string()).collect();
        bail!("geometry drifted from spec: {}", fields.join("; "));
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": standforge::VERSION,
        "stand_types": StandType::ALL.iter().map(|t| t.label()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
