use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "genospec", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a spec into a renderer configuration.
    Compile(CompileArgs),
    /// Print validity messages for a spec.
    Validate(InputArgs),
    /// Print the bounding box of every layout slot.
    Layout(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Compile options JSON (defaults, templates, overlay mode).
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompileArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output path for the renderer configuration; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Fail when the spec has validity messages.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn read_options(path: Option<&Path>) -> anyhow::Result<genospec::CompileOptions> {
    let Some(path) = path else {
        return Ok(genospec::CompileOptions::default());
    };
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let opts = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse options JSON")?;
    Ok(opts)
}

fn load(args: &InputArgs) -> anyhow::Result<(genospec::ViewDef, genospec::CompileOptions)> {
    let spec = genospec::ViewDef::from_path(&args.in_path)
        .with_context(|| format!("load spec '{}'", args.in_path.display()))?;
    let opts = read_options(args.options.as_deref())?;
    Ok((spec, opts))
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let (spec, mut opts) = load(&args.input)?;
    opts.strict |= args.strict;
    let out = genospec::compile(&spec, &opts)?;

    for issue in out.validity.iter() {
        eprintln!("warning: {issue}");
    }
    for dropped in &out.dropped {
        eprintln!("dropped {}: {}", dropped.path, dropped.reason);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&out.config)
    } else {
        serde_json::to_string(&out.config)
    }
    .with_context(|| "serialize renderer config")?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json).with_context(|| format!("write config '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let (spec, opts) = load(&args)?;
    let report = genospec::validate_spec(&spec, &opts.defaults);
    if report.is_valid() {
        println!("ok");
        return Ok(());
    }
    println!("{report}");
    anyhow::bail!("{} validity message(s)", report.len());
}

fn cmd_layout(args: InputArgs) -> anyhow::Result<()> {
    let (spec, opts) = load(&args)?;
    let out = genospec::compile(&spec, &opts)?;
    println!("size {} x {}", out.layout.size.width, out.layout.size.height);
    for slot in &out.layout.slots {
        let bb = slot.bounding_box;
        print!(
            "{}\tview={}\tx={} y={} w={} h={}",
            slot.id, slot.view_id, bb.x, bb.y, bb.width, bb.height
        );
        if let Some(p) = slot.polar {
            print!(
                "\tr=[{}, {}] a=[{}, {}]",
                p.inner_radius, p.outer_radius, p.start_angle, p.end_angle
            );
        }
        println!();
    }
    Ok(())
}
