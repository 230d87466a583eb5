//! Native inspection tool: builds a flight path and writes its polyline and
//! sampled frames for external visualization or golden-style comparison.

fn main() {
    if let Err(err) = run() {
        eprintln!("flight_cli error: {err}");
        std::process::exit(1);
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::SeedableRng;
use serde::Serialize;

use flightpath::geom::Point3;
use flightpath::path::{FlightPath, FrameSampler, PolarArcPathBuilder};
use flightpath::sim::{FlightSimulation, SimulationConfig, random_endpoint};

const SNAPSHOT_DECIMALS: usize = 6;

const USAGE: &str = r#"flight_cli (flightpath)

USAGE:
  flight_cli path [options]     Build one flight path, emit polyline + frames
  flight_cli fly <ticks> [options]
                                Run the simulation and print one transform
                                translation per tick

OPTIONS:
  --start X,Y,Z      Start endpoint (default: random)
  --end X,Y,Z        End endpoint (default: random)
  --seed N           Seed for random endpoints (default 0)
  --config <path>    JSON SimulationConfig overriding the defaults
  --segments N       Polyline/frame sample count (default 100)
  --json <path>      Write the path as JSON ("-" for stdout)
  --snap <path>      Write a quantized text snapshot
"#;

#[derive(Debug, Serialize)]
struct PathExport {
    start: [f64; 3],
    end: [f64; 3],
    sweep_angle: f64,
    points: Vec<[f64; 3]>,
    /// Full 4x4 rigid transforms sampled uniformly along the path, ready to
    /// feed a renderer's object matrix.
    frames: Vec<[[f64; 4]; 4]>,
}

struct Args {
    command: String,
    ticks: usize,
    start: Option<Point3>,
    end: Option<Point3>,
    seed: u64,
    config: SimulationConfig,
    segments: usize,
    json: Option<String>,
    snap: Option<String>,
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut rng: rand::prelude::StdRng = SeedableRng::seed_from_u64(args.seed);
    let start = args.start.unwrap_or_else(|| random_endpoint(&mut rng));
    let end = args.end.unwrap_or_else(|| random_endpoint(&mut rng));

    match args.command.as_str() {
        "path" => {
            let builder = PolarArcPathBuilder::with_options(args.config.path);
            let path = builder.build(start, end).map_err(|e| e.to_string())?;

            if let Some(target) = args.json.as_deref() {
                write_json(&path, args.config, args.segments, target)?;
            }
            if let Some(target) = args.snap.as_deref() {
                write_snapshot(&path, args.config, args.segments, target)?;
            }
            if args.json.is_none() && args.snap.is_none() {
                let mut stdout = std::io::stdout().lock();
                snapshot(&path, args.config, args.segments, &mut stdout)
                    .map_err(|e| e.to_string())?;
            }
            Ok(())
        }
        "fly" => {
            let mut sim = FlightSimulation::with_config(args.config, start, end)
                .map_err(|e| e.to_string())?;
            let mut stdout = std::io::stdout().lock();

            // Starting pose, before the clock first advances.
            let t = sim.current_frame().translation();
            writeln!(
                stdout,
                "{:.3} {} {} {}",
                sim.time(),
                fmt(t.x),
                fmt(t.y),
                fmt(t.z)
            )
            .map_err(|e| e.to_string())?;

            for _ in 0..args.ticks {
                let transform = sim.tick();
                let t = transform.translation();
                writeln!(
                    stdout,
                    "{:.3} {} {} {}",
                    sim.time(),
                    fmt(t.x),
                    fmt(t.y),
                    fmt(t.z)
                )
                .map_err(|e| e.to_string())?;
            }
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn parse_args() -> Result<Args, String> {
    let mut argv = std::env::args().skip(1);
    let command = argv.next().ok_or_else(|| USAGE.to_string())?;
    if command == "--help" || command == "-h" {
        return Err(USAGE.to_string());
    }

    let mut args = Args {
        command,
        ticks: 0,
        start: None,
        end: None,
        seed: 0,
        config: SimulationConfig::default(),
        segments: 100,
        json: None,
        snap: None,
    };

    let rest: Vec<String> = argv.collect();
    let mut iter = rest.iter();

    if args.command == "fly" {
        let count = iter
            .next()
            .ok_or_else(|| format!("`fly` requires a tick count\n\n{USAGE}"))?;
        args.ticks = count
            .parse()
            .map_err(|_| format!("invalid tick count `{count}`"))?;
    }

    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{name} requires a value"))
        };
        match flag.as_str() {
            "--start" => args.start = Some(parse_point(&value("--start")?)?),
            "--end" => args.end = Some(parse_point(&value("--end")?)?),
            "--seed" => {
                let v = value("--seed")?;
                args.seed = v.parse().map_err(|_| format!("invalid seed `{v}`"))?;
            }
            "--config" => args.config = load_config(&value("--config")?)?,
            "--segments" => {
                let v = value("--segments")?;
                args.segments = v.parse().map_err(|_| format!("invalid segments `{v}`"))?;
            }
            "--json" => args.json = Some(value("--json")?),
            "--snap" => args.snap = Some(value("--snap")?),
            other => return Err(format!("unknown flag `{other}`\n\n{USAGE}")),
        }
    }

    Ok(args)
}

fn parse_point(text: &str) -> Result<Point3, String> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z, got `{text}`"));
    }
    let mut coords = [0.0_f64; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid coordinate `{part}`"))?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

fn load_config(path: &str) -> Result<SimulationConfig, String> {
    let text = std::fs::read_to_string(Path::new(path))
        .map_err(|e| format!("cannot read config `{path}`: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid config `{path}`: {e}"))
}

fn write_json(
    path: &FlightPath,
    config: SimulationConfig,
    segments: usize,
    target: &str,
) -> Result<(), String> {
    let sampler = FrameSampler::with_options(config.frame);
    let steps = segments.max(1);
    let export = PathExport {
        start: path.start().to_array(),
        end: path.end().to_array(),
        sweep_angle: path.sweep_angle(),
        points: path
            .polyline(segments)
            .into_iter()
            .map(Point3::to_array)
            .collect(),
        frames: (0..=steps)
            .map(|i| {
                let u = i as f64 / steps as f64;
                *sampler.sample_frame(path, u).as_matrix()
            })
            .collect(),
    };

    if target == "-" {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &export)
            .map_err(|e| e.to_string())?;
        println!();
    } else {
        let file = File::create(target).map_err(|e| format!("cannot create `{target}`: {e}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn write_snapshot(
    path: &FlightPath,
    config: SimulationConfig,
    segments: usize,
    target: &str,
) -> Result<(), String> {
    let file = File::create(target).map_err(|e| format!("cannot create `{target}`: {e}"))?;
    let mut writer = BufWriter::new(file);
    snapshot(path, config, segments, &mut writer).map_err(|e| e.to_string())
}

fn snapshot<W: Write>(
    path: &FlightPath,
    config: SimulationConfig,
    segments: usize,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "# flightpath snapshot")?;
    writeln!(
        writer,
        "# start {} {} {}",
        fmt(path.start().x),
        fmt(path.start().y),
        fmt(path.start().z)
    )?;
    writeln!(
        writer,
        "# end {} {} {}",
        fmt(path.end().x),
        fmt(path.end().y),
        fmt(path.end().z)
    )?;
    writeln!(writer, "# sweep {}", fmt(path.sweep_angle()))?;

    for p in path.polyline(segments) {
        writeln!(writer, "p {} {} {}", fmt(p.x), fmt(p.y), fmt(p.z))?;
    }

    let sampler = FrameSampler::with_options(config.frame);
    for i in 0..=segments {
        let u = i as f64 / segments.max(1) as f64;
        let frame = sampler.frame_at(path, u);
        writeln!(
            writer,
            "f {} {} {} {} {} {} {} {} {} {}",
            fmt(u),
            fmt(frame.right.x),
            fmt(frame.right.y),
            fmt(frame.right.z),
            fmt(frame.up.x),
            fmt(frame.up.y),
            fmt(frame.up.z),
            fmt(frame.forward.x),
            fmt(frame.forward.y),
            fmt(frame.forward.z)
        )?;
    }
    Ok(())
}

fn fmt(value: f64) -> String {
    format!("{value:.prec$}", prec = SNAPSHOT_DECIMALS)
}
