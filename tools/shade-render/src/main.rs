// Headless driver for bezier-shade.
//
// Usage:
//   shade-render [options]
//
// Loads a TOML config, applies control-point edits, then renders frames while
// a timer thread moves the light along its spiral (unless --light pins it).
// Each frame is written to <out-dir>/frame_NNNN.png.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bezier_shade::{
    Background, FrameComposer, ImageSource, LightState, Mesh, PointD, RenderConfig,
    SceneSnapshot,
};
use crossbeam::channel::{self, TrySendError};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    out_dir: PathBuf,
    frames: usize,
    background: Option<PathBuf>,
    normal_map: Option<PathBuf>,
    heights: Vec<(usize, usize, f64)>,
    select: Option<(usize, usize)>,
    light: Option<(f64, f64)>,
    triangulation: Option<usize>,
    wireframe: bool,
    still: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return;
    }

    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("shade-render - render a lit Bezier height-field to PNG frames");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <file>        TOML config (defaults when omitted)");
    eprintln!("  -o, --out-dir <dir>        Output directory [default: .]");
    eprintln!("  -n, --frames <count>       Number of frames [default: 1]");
    eprintln!("  --background <image>       Background image used as object color");
    eprintln!("  --normal-map <image>       Tangent-space normal map");
    eprintln!("  --height <row,col,value>   Set a control-point height (repeatable)");
    eprintln!("  --select <row,col>         Highlight a control point");
    eprintln!("  --light <x,y>              Fix the light at a raster position");
    eprintln!("  --triangulation <k>        Squares per mesh cell side");
    eprintln!("  --wireframe                Overlay the triangulation");
    eprintln!("  --still                    Keep the light fixed at the raster centre");
    eprintln!();
    eprintln!("Log output is controlled with RUST_LOG (e.g. RUST_LOG=debug).");
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options {
        out_dir: PathBuf::from("."),
        frames: 1,
        ..Default::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => opts.config = Some(PathBuf::from(take_value(args, &mut i)?)),
            "-o" | "--out-dir" => opts.out_dir = PathBuf::from(take_value(args, &mut i)?),
            "-n" | "--frames" => {
                opts.frames = take_value(args, &mut i)?
                    .parse()
                    .context("invalid frame count")?;
            }
            "--background" => opts.background = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--normal-map" => opts.normal_map = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--height" => opts.heights.push(parse_height(take_value(args, &mut i)?)?),
            "--select" => opts.select = Some(parse_index(take_value(args, &mut i)?)?),
            "--light" => opts.light = Some(parse_point(take_value(args, &mut i)?)?),
            "--triangulation" => {
                opts.triangulation = Some(
                    take_value(args, &mut i)?
                        .parse()
                        .context("invalid triangulation")?,
                );
            }
            "--wireframe" => opts.wireframe = true,
            "--still" => opts.still = true,
            other => bail!("unknown option: {}", other),
        }
        i += 1;
    }
    Ok(opts)
}

/// Advance past a flag and return its value.
fn take_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", flag))
}

fn parse_index(s: &str) -> Result<(usize, usize)> {
    let (row, col) = s
        .split_once(',')
        .with_context(|| format!("expected row,col, got {:?}", s))?;
    Ok((
        row.trim().parse().context("invalid row")?,
        col.trim().parse().context("invalid column")?,
    ))
}

fn parse_point(s: &str) -> Result<(f64, f64)> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("expected x,y, got {:?}", s))?;
    let p = (
        x.trim().parse::<f64>().context("invalid x")?,
        y.trim().parse::<f64>().context("invalid y")?,
    );
    if !p.0.is_finite() || !p.1.is_finite() {
        bail!("light position must be finite, got {:?}", s);
    }
    Ok(p)
}

fn parse_height(s: &str) -> Result<(usize, usize, f64)> {
    let (index, value) = s
        .rsplit_once(',')
        .with_context(|| format!("expected row,col,value, got {:?}", s))?;
    let (row, col) = parse_index(index)?;
    Ok((row, col, value.trim().parse().context("invalid height")?))
}

fn build_mesh(config: &RenderConfig, opts: &Options) -> Result<Mesh> {
    let mut mesh = config.mesh().context("building mesh")?;
    if let Some(k) = opts.triangulation {
        mesh.set_subdivision(k)?;
    }
    for &(row, col, h) in &opts.heights {
        mesh.set_height(row, col, h)?;
    }
    if let Some((row, col)) = opts.select {
        mesh.select(row, col)?;
    }
    Ok(mesh)
}

fn build_scene(config: &RenderConfig, opts: &Options) -> Result<SceneSnapshot> {
    let mut scene = config.scene();
    scene.show_mesh = opts.wireframe;
    if let Some((x, y)) = opts.light {
        scene.light.position = PointD::new(x, y);
    }
    if let Some(path) = &opts.background {
        let img = ImageSource::open(path)
            .with_context(|| format!("loading background {}", path.display()))?;
        scene.background = Background::with_image(scene.background.color, Arc::new(img));
    }
    if let Some(path) = &opts.normal_map {
        let img = ImageSource::open(path)
            .with_context(|| format!("loading normal map {}", path.display()))?;
        scene.normal_map = Some(Arc::new(img));
    }
    Ok(scene)
}

fn run(opts: Options) -> Result<()> {
    let config = match &opts.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    let mesh = build_mesh(&config, &opts)?;
    let mut scene = build_scene(&config, &opts)?;
    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating {}", opts.out_dir.display()))?;

    let light = Arc::new(Mutex::new(scene.light));
    let animate = config.defaults.light_animation
        && !opts.still
        && opts.light.is_none()
        && opts.frames > 1;
    let (tx_redraw, rx_redraw) = channel::bounded::<()>(1);

    let animator = if animate {
        let light = Arc::clone(&light);
        let mut spiral = config.spiral();
        let interval = Duration::from_millis(config.light.spiral_update_ms.max(1));
        log::info!("animating light every {:?}", interval);
        Some(thread::spawn(move || loop {
            thread::sleep(interval);
            spiral.tick();
            light.lock().position = spiral.position();
            match tx_redraw.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Disconnected(())) => return,
            }
        }))
    } else {
        drop(tx_redraw);
        None
    };

    let composer = FrameComposer::new();
    let mut written = 0;
    while written < opts.frames {
        if animate && written > 0 && rx_redraw.recv().is_err() {
            break;
        }
        scene.light = snapshot(&light);
        let Some(frame) = composer.try_render(&mesh, &scene) else {
            continue;
        };
        let path = opts.out_dir.join(format!("frame_{:04}.png", written));
        frame
            .save_png(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "wrote {} (light at {:.1}, {:.1})",
            path.display(),
            scene.light.position.x,
            scene.light.position.y
        );
        written += 1;
    }

    drop(rx_redraw);
    if let Some(handle) = animator {
        if handle.join().is_err() {
            bail!("light animation thread panicked");
        }
    }
    println!("{} frame(s) written to {}", written, opts.out_dir.display());
    Ok(())
}

fn snapshot(light: &Mutex<LightState>) -> LightState {
    *light.lock()
}
