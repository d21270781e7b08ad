//! talkinghead - headless lip-sync playback demo
//!
//! Loads a script's lip-sync timeline, plays the greeting sequence through
//! the core player at a fixed frame rate, and logs animation and viseme
//! state as it goes.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use glam::Quat;
use talkinghead::{
    rig::clip::Track, AnimationClip, Config, MorphMesh, Player, ScriptLibrary, Timeline, Viseme,
};

/// talkinghead - headless avatar lip-sync player
#[derive(Parser, Debug)]
#[command(name = "talkinghead", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Script to play (overrides config)
    #[arg(short, long)]
    script: Option<String>,

    /// Simulated frame rate (overrides config)
    #[arg(long)]
    fps: Option<u32>,

    /// List available scripts and exit
    #[arg(long)]
    list_scripts: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("{} v{}", talkinghead::NAME, talkinghead::VERSION);

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(fps) = args.fps {
        config.playback.fps = fps;
    }
    config.validate()?;

    let library = ScriptLibrary::new(&config.assets)?;

    if args.list_scripts {
        for name in library.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let script = args
        .script
        .unwrap_or_else(|| config.assets.default_script.clone());
    let assets = library.get(&script)?;
    let timeline = Timeline::from_file(&assets.timeline)?;
    info!(
        "Script {}: {} cues over {:.2}s ({})",
        script,
        timeline.len(),
        timeline.audio_duration(),
        assets.audio.display()
    );

    let mut player = Player::new(
        demo_clips()?,
        config.playback.fade_duration,
        MorphMesh::new("Wolf3D_Head", Viseme::channels()),
        MorphMesh::new("Wolf3D_Teeth", Viseme::channels()),
    )?;
    player.load_script(&script, timeline)?;
    player.set_play_trigger(true)?;

    run_frames(&mut player, &config)?;

    info!("Playback finished");
    Ok(())
}

/// Step the player until the audio ends and the return-to-idle fade settles.
fn run_frames(player: &mut Player, config: &Config) -> anyhow::Result<()> {
    let dt = 1.0 / config.playback.fps as f32;
    let total = player.audio_duration() as f32 + config.playback.fade_duration * 2.0;
    let frames = (total / dt).ceil() as u32;

    let mut next_report = 0.0f64;
    for _ in 0..frames {
        player.update(dt)?;

        if player.audio_position() >= next_report {
            report(player);
            next_report += 0.25;
        }
    }
    report(player);

    Ok(())
}

fn report(player: &Player) {
    // A and X share a channel; dedup so it only prints once.
    let mut open: Vec<&str> = Viseme::channels()
        .filter(|c| player.head().weight(c) == Some(1.0))
        .collect();
    open.sort_unstable();
    open.dedup();

    let pose = player.mixer().blended_pose();
    let spine = pose
        .get("Spine")
        .copied()
        .unwrap_or(Quat::IDENTITY)
        .to_euler(glam::EulerRot::XYZ)
        .0
        .to_degrees();

    info!(
        "t={:.2}s animation={} idle_w={:.2} greeting_w={:.2} spine_x={:+.2}deg mouth={}",
        player.audio_position(),
        player.animation(),
        player.mixer().weight("Idle"),
        player.mixer().weight("Greeting"),
        spine,
        if open.is_empty() {
            "closed".to_string()
        } else {
            open.join(",")
        },
    );
}

/// Stand-in skeletal clips for the headless demo.
///
/// Real deployments decode Idle/Angry/Greeting from animation files at the
/// asset boundary; the demo only needs three distinct looping clips for the
/// mixer to crossfade between.
fn demo_clips() -> anyhow::Result<Vec<AnimationClip>> {
    let breathe = |name: &str, amplitude: f32| {
        AnimationClip::new(
            name,
            vec![Track::rotation(
                "mixamorigSpine",
                vec![0.0, 1.0, 2.0],
                vec![
                    Quat::IDENTITY,
                    Quat::from_rotation_x(amplitude),
                    Quat::IDENTITY,
                ],
            )],
        )
    };

    Ok(vec![
        breathe("Idle", 0.02)?,
        breathe("Angry", 0.08)?,
        breathe("Greeting", 0.05)?,
    ])
}
