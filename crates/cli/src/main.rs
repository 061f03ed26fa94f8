use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use sfa_topo::prelude::*;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Relate, overlay and hull runner for JSON geometries")]
struct Cmd {
    /// Log pipeline statistics (DEBUG level)
    #[arg(long, global = true)]
    verbose: bool,

    /// Absolute tolerance; defaults to the engine's fixed epsilon
    #[arg(long, global = true)]
    eps: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the DE-9IM matrix and named predicates as JSON
    Relate {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long)]
        three_d: bool,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Write the boolean result (or null) plus a provenance sidecar
    Overlay {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long, value_enum)]
        op: OpArg,
        #[arg(long)]
        three_d: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the convex hull of a geometry's vertices
    Hull {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = HullAlgo::Graham)]
        algo: HullAlgo,
        /// Insertion-order seed for the 3D hull
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print version and code revision as JSON
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpArg {
    Intersection,
    Union,
    Difference,
    Symdifference,
}

impl From<OpArg> for OverlayOp {
    fn from(op: OpArg) -> Self {
        match op {
            OpArg::Intersection => OverlayOp::Intersection,
            OpArg::Union => OverlayOp::Union,
            OpArg::Difference => OverlayOp::Difference,
            OpArg::Symdifference => OverlayOp::SymDifference,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HullAlgo {
    Graham,
    Melkman,
    Hull3d,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let cfg = cmd.eps.map(TopoCfg::with_eps).unwrap_or_default();
    match cmd.action {
        Action::Relate {
            a,
            b,
            three_d,
            pattern,
        } => {
            let report = relate(&a, &b, three_d, pattern.as_deref(), cfg)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Action::Overlay {
            a,
            b,
            op,
            three_d,
            out,
        } => overlay(&a, &b, op.into(), three_d, &out, cfg).map(|_| ()),
        Action::Hull {
            input,
            algo,
            seed,
            out,
        } => hull(&input, algo, seed, &out, cfg).map(|_| ()),
        Action::Report => report(),
    }
}

fn read_geometry(path: &Path) -> Result<Geometry> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing geometry in {}", path.display()))
}

fn write_json(out: &Path, value: &serde_json::Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn relate(a: &Path, b: &Path, three_d: bool, pattern: Option<&str>, cfg: TopoCfg) -> Result<serde_json::Value> {
    let (ga, gb) = (read_geometry(a)?, read_geometry(b)?);
    let mut r = Relate::with_cfg(&ga, &gb, three_d, cfg)?;
    let im = r.matrix();
    tracing::info!(matrix = %im, three_d, "relate");
    let matched = pattern.map(|p| r.relate(p)).transpose()?;
    Ok(json!({
        "matrix": im,
        "matrix_form": im.to_matrix_string(),
        "pattern": pattern,
        "matches": matched,
        "predicates": {
            "equals": r.equals(),
            "disjoint": r.disjoint(),
            "intersects": r.intersects(),
            "touches": r.touches(),
            "crosses": r.crosses(),
            "within": r.within(),
            "contains": r.contains(),
            "overlaps": r.overlaps(),
        }
    }))
}

fn overlay(a: &Path, b: &Path, op: OverlayOp, three_d: bool, out: &Path, cfg: TopoCfg) -> Result<PathBuf> {
    let (ga, gb) = (read_geometry(a)?, read_geometry(b)?);
    let result = if three_d {
        let mut ov = Overlay3D::with_cfg(&ga, &gb, cfg)?;
        let g = ov.compute_overlay(op);
        if ov.processing_error() {
            bail!(TopoError::RingLinkage);
        }
        g
    } else {
        Overlay::with_cfg(ga, gb, cfg).try_compute_overlay(op)?
    };
    tracing::info!(?op, three_d, kind = result.as_ref().map(Geometry::kind), "overlay");
    write_json(out, &serde_json::to_value(&result)?)?;
    let mut payload = Payload::new(json!({
        "cmd": "overlay",
        "op": op,
        "three_d": three_d,
        "eps": cfg.eps,
    }));
    payload.inputs = vec![a.to_path_buf(), b.to_path_buf()];
    write_sidecar(out, payload)
}

fn hull(input: &Path, algo: HullAlgo, seed: Option<u64>, out: &Path, cfg: TopoCfg) -> Result<PathBuf> {
    let g = read_geometry(input)?;
    if seed.is_some() && algo != HullAlgo::Hull3d {
        tracing::warn!(?algo, "--seed only affects hull3d");
    }
    let result = match algo {
        HullAlgo::Graham => graham_hull_geometry(&g, cfg),
        HullAlgo::Melkman => melkman_hull(&g, cfg)?,
        HullAlgo::Hull3d => match seed {
            Some(s) => convex_hull_3d_seeded(&g.coords(), s, cfg),
            None => convex_hull_3d(&g, cfg),
        },
    };
    tracing::info!(?algo, points = g.coords().len(), kind = result.as_ref().map(Geometry::kind), "hull");
    write_json(out, &serde_json::to_value(&result)?)?;
    let mut payload = Payload::new(json!({
        "cmd": "hull",
        "algo": format!("{algo:?}").to_lowercase(),
        "seed": seed,
        "eps": cfg.eps,
    }));
    payload.inputs.push(input.to_path_buf());
    write_sidecar(out, payload)
}

fn report() -> Result<()> {
    let obj = json!({
        "version": sfa_topo::VERSION,
        "code_rev": provenance::current_git_rev(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
