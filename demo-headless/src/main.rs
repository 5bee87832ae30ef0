use clap::Parser;
use space_view_core::{
    DetailPreset, FrameClock, ManualScheduler, Participant, SceneConfig, SceneData, SceneError, SpaceView,
    Triangle, ViewHost, ViewMode,
};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Headless space view: builds the globe scene and runs its frame loop
#[derive(Parser, Debug)]
#[command(name = "space-view-demo")]
#[command(about = "Headless globe view of participants and triangles", long_about = None)]
struct Args {
    /// Scene data JSON (participants, triangles); built-in sample if omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Scene configuration JSON; defaults if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Detail preset (low, medium, high), applied on top of the configuration
    #[arg(short, long)]
    preset: Option<String>,

    /// Number of frames to animate
    #[arg(short, long, default_value_t = 300)]
    frames: u32,

    /// RNG seed for particle speeds and stars
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// UI language for the toggle label
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Pace the loop at this many frames per second and scale particle
    /// motion by measured frame time (0 = unpaced, one nominal frame per step)
    #[arg(long, default_value_t = 0)]
    fps: u32,

    /// Frames between progress reports
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,

    /// Complete the waiting pair into a triangle halfway through the run
    #[arg(long)]
    form_triangle: bool,

    /// Write the final view context as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SceneError> {
    println!("=== Space View Demo ===\n");

    let mut config = match &args.config {
        Some(path) => SceneConfig::from_json_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(name) = &args.preset {
        match DetailPreset::from_name(name) {
            Some(preset) => {
                println!("Using '{}' detail preset", name);
                config.apply_preset(preset);
            }
            None => warn!("Unknown preset '{}', keeping configuration as loaded", name),
        }
    }
    config.validate()?;

    let data = match &args.scene {
        Some(path) => SceneData::from_json_file(path)?,
        None => sample_scene(),
    };
    data.validate()?;
    println!(
        "Scene: {} participants, {} triangles, {} waiting",
        data.participants.len(),
        data.triangles.len(),
        data.waiting_participants().len()
    );

    let view = SpaceView::with_seed(config, args.seed);
    let mut host = ViewHost::new(data, view, ManualScheduler::new());
    host.attach_view();
    host.set_language(args.language.as_str());

    println!("Toggle shows: \"{}\"", host.view().toggle_text());
    if host.toggle() != ViewMode::Space {
        return Err(SceneError::InvalidData("view failed to activate".into()));
    }
    println!("Toggle shows: \"{}\"\n", host.view().toggle_text());

    if let Some(context) = host.view().context() {
        println!(
            "Globe radius {:.1} ({} segments), {} stars, {} connectors, {} particles\n",
            context.globe.radius,
            context.globe.segments,
            context.starfield.len(),
            context.scene.connectors.len(),
            context.scene.particles.len()
        );
    }

    println!(" Frame | Rotation(rad) | Particles | Mean t | Frame(ms)");
    println!("-------|---------------|-----------|--------|----------");

    let report_interval = args.report_interval.max(1);
    let triangle_at = triangle_frame(args.frames);
    let pacing = (args.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(args.fps)));
    let mut clock = FrameClock::new();

    for frame in 1..=args.frames {
        let started = Instant::now();
        let dt_scale = clock.tick(started);
        if pacing.is_some() {
            host.pump_frame_scaled(dt_scale);
        } else {
            host.pump_frame();
        }

        if args.form_triangle && frame == triangle_at {
            let updated = with_waiting_triangle(&host.state.data);
            let ran = host.update_triangles(updated);
            info!("Triangle formed at frame {}, {} listeners notified", frame, ran);
        }

        if frame % report_interval == 0 {
            print_report(&host, frame, clock.last_frame_time_ms());
        }

        if let Some(interval) = pacing {
            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    if let Some(path) = &args.json_out {
        write_snapshot(&host, path)?;
    }

    host.toggle();
    println!("\n=== Run Complete ===");
    println!("Frames animated: {}", args.frames);
    println!(
        "Ticks requested: {}, cancelled: {}",
        host.state.scheduler.requested_count(),
        host.state.scheduler.cancelled_count()
    );

    Ok(())
}

fn print_report(host: &ViewHost<ManualScheduler>, frame: u32, frame_ms: f64) {
    let Some(context) = host.view().context() else {
        return;
    };
    let particles = &context.scene.particles;
    let mean_t = if particles.is_empty() {
        0.0
    } else {
        particles.iter().map(|p| p.motion.t()).sum::<f64>() / particles.len() as f64
    };
    println!(
        "{:6} | {:13.4} | {:9} | {:6.3} | {:9.2}",
        frame,
        *context.globe.rotation(),
        particles.len(),
        mean_t,
        frame_ms
    );
}

fn write_snapshot(host: &ViewHost<ManualScheduler>, path: &Path) -> Result<(), SceneError> {
    let Some(context) = host.view().context() else {
        return Err(SceneError::InvalidData("view inactive, nothing to write".into()));
    };
    let json = serde_json::to_string_pretty(context)
        .map_err(|e| SceneError::ParseFailed(e.to_string()))?;
    std::fs::write(path, json)
        .map_err(|e| SceneError::LoadFailed(format!("{}: {e}", path.display())))?;
    println!("Wrote view snapshot to {}", path.display());
    Ok(())
}

/// Frame at which `--form-triangle` adds the new triangle: halfway through,
/// but never before the first frame.
fn triangle_frame(frames: u32) -> u32 {
    (frames / 2).max(1)
}

/// Five cities: three in a triangle, two waiting for a third
fn sample_scene() -> SceneData {
    let members = vec![
        Participant::new("paris", 48.85, 2.35).current_user(),
        Participant::new("new-york", 40.71, -74.0),
        Participant::new("sydney", -33.87, 151.21),
    ];
    let mut participants = members.clone();
    participants.push(Participant::new("tokyo", 35.68, 139.69));
    participants.push(Participant::new("rio", -22.91, -43.17));

    SceneData::new(participants, vec![Triangle::new("#4caf50", members)])
}

/// Join the waiting participants with the current user into a new triangle.
fn with_waiting_triangle(data: &SceneData) -> SceneData {
    let mut updated = data.clone();
    let mut members: Vec<Participant> = data
        .participants
        .iter()
        .filter(|p| data.is_current_user(p))
        .cloned()
        .collect();
    members.extend(data.waiting_participants().into_iter().cloned());
    if members.len() >= 3 {
        updated.triangles.push(Triangle::new("#e91e63", members));
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_frame_inside_short_runs() {
        assert_eq!(triangle_frame(1), 1);
        assert_eq!(triangle_frame(0), 1);
        assert_eq!(triangle_frame(3), 1);
        assert_eq!(triangle_frame(300), 150);
    }

    #[test]
    fn test_waiting_pair_joins_current_user() {
        let updated = with_waiting_triangle(&sample_scene());
        assert_eq!(updated.triangles.len(), 2);
        assert!(updated.waiting_participants().is_empty());

        let members: Vec<&str> = updated.triangles[1].members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(members, vec!["paris", "tokyo", "rio"]);
    }
}
