use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use scrollspace_common::{Rect, SpriteHandle, Viewport};
use scrollspace_input::InputSample;
use scrollspace_kernel::{
    LIFE_LIMIT, MotionLimits, ProjectileParams, Steering, World, WorldConfig,
};
use scrollspace_render::{Camera, FollowMode, TextSink, render_frame};
use tracing_subscriber::EnvFilter;

const WORLD_SIZE: f32 = 2000.0;
const PLAYER_SPRITE: SpriteHandle = SpriteHandle(1);
const CHASER_SPRITE: SpriteHandle = SpriteHandle(2);
const PROJECTILE_SPRITE: SpriteHandle = SpriteHandle(3);

#[derive(Parser)]
#[command(name = "scrollspace-cli", about = "Headless driver for the scrollspace simulation core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and reference constants
    Info,
    /// Run a headless demo: a driven player, chasers, parallax scenery
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "300")]
        ticks: u64,
        /// Number of chasers pursuing the player
        #[arg(short, long, default_value = "3")]
        chasers: usize,
        /// Number of parallax scenery entities
        #[arg(short, long, default_value = "20")]
        scenery: usize,
        /// Seed for the scenery scatter
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Print a text frame every N ticks (0 = final frame only)
        #[arg(long, default_value = "60")]
        frame_every: u64,
        /// Dump the final world state as JSON
        #[arg(long)]
        dump: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("scrollspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("world: {WORLD_SIZE}x{WORLD_SIZE}");
            println!("projectile life limit: {LIFE_LIMIT} ticks");
            let limits = MotionLimits::default();
            println!("reference max speed: {} units/tick", limits.max_speed());
        }
        Commands::Run {
            ticks,
            chasers,
            scenery,
            seed,
            frame_every,
            dump,
        } => {
            let (mut world, mut camera) =
                build_demo(chasers, scenery, seed).context("failed to build demo world")?;
            let player = world.controlled().expect("demo world has a player");

            for tick in 0..ticks {
                let sample = demo_input(tick, ticks, &world);
                world.step(sample.axis(), sample.fire_aim());
                camera.update(&world);

                if frame_every > 0 && (tick + 1) % frame_every == 0 {
                    print_frame(&world, &camera);
                }
            }

            if frame_every == 0 {
                print_frame(&world, &camera);
            }

            let summary = world.summary();
            println!(
                "done: tick={} entities={} projectiles={}",
                summary.tick, summary.entity_count, summary.projectile_count
            );
            if let Some(p) = world.get(player) {
                let c = p.center();
                println!("player at ({:.1}, {:.1})", c.x, c.y);
            }

            if dump {
                let json =
                    serde_json::to_string_pretty(&world).context("failed to serialize world")?;
                println!("{json}");
            }
        }
    }

    Ok(())
}

/// Build the demo world: bounded 2000x2000 map, a controllable player in the
/// middle, chasers scattered around it, and far-plane scenery.
fn build_demo(chasers: usize, scenery: usize, seed: u64) -> anyhow::Result<(World, Camera)> {
    let config = WorldConfig {
        bounds: Rect::new(Vec2::ZERO, Vec2::splat(WORLD_SIZE)),
        control_force: 0.5,
        projectile: ProjectileParams {
            extent: Vec2::new(4.0, 4.0),
            sprite: PROJECTILE_SPRITE,
        },
    };
    let mut world = World::new(config)?;

    let player = world.spawn_mover(
        Vec2::splat(WORLD_SIZE / 2.0),
        Vec2::new(20.0, 20.0),
        PLAYER_SPRITE,
        MotionLimits::default(),
    );
    world.set_controlled(player);

    let chaser_limits = MotionLimits::new(10.0, 8.0, 0.05)?;
    let mut state = seed;
    for _ in 0..chasers {
        state = splitmix64(state);
        let pos = scatter(state, WORLD_SIZE);
        world.spawn_chaser(
            pos,
            Vec2::new(16.0, 16.0),
            CHASER_SPRITE,
            chaser_limits,
            Steering::new(player, 0.35, 6.0)?,
        );
    }

    for i in 0..scenery {
        state = splitmix64(state);
        let pos = scatter(state, WORLD_SIZE);
        // Depth bands between 0.2 (far) and 0.95 (near).
        let parallax = 0.2 + (state % 76) as f32 / 100.0;
        world.spawn_scenery(pos, Vec2::new(2.0, 2.0), SpriteHandle(100 + i as u64), parallax)?;
    }

    let camera = Camera::new(
        Viewport::new(800.0, 600.0),
        FollowMode::Smoothed { speed: 0.1 },
        player,
        world.bounds(),
    )?;

    Ok((world, camera))
}

/// Synthetic input: drive toward the bottom-right for the first half of the
/// run, back toward the top-left for the second, firing a burst every 90
/// ticks at a point ahead of the player.
fn demo_input(tick: u64, total: u64, world: &World) -> InputSample {
    let outbound = tick < total / 2;
    let fire = tick % 90 == 30;
    let aim = world
        .controlled()
        .and_then(|id| world.get(id))
        .map(|p| p.center() + Vec2::new(150.0, -60.0))
        .unwrap_or_default();
    InputSample {
        up: !outbound,
        down: outbound,
        left: !outbound,
        right: outbound,
        fire,
        aim,
    }
}

fn print_frame(world: &World, camera: &Camera) {
    let mut sink = TextSink::new();
    render_frame(world, camera, &mut sink);
    println!(
        "--- tick {} | camera offset ({:.1}, {:.1}) ---",
        world.tick(),
        camera.offset().x,
        camera.offset().y
    );
    for line in sink.lines() {
        println!("  {line}");
    }
}

/// Splitmix64: a fast deterministic mixing function. Drives the repeatable
/// scenery scatter without pulling in an RNG crate.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn scatter(state: u64, span: f32) -> Vec2 {
    let x = (state % 10_000) as f32 / 10_000.0 * span;
    let y = ((state >> 32) % 10_000) as f32 / 10_000.0 * span;
    Vec2::new(x, y)
}
