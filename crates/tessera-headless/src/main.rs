mod metrics;
mod snapshots;

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tessera_core::gpu::{GpuDevice, RenderTarget, SceneRenderer};
use tessera_core::mesh::GridMeshGenerator;
use tessera_core::sim::{Emitter, ParticlePool};
use tessera_core::{bindings, RenderParams, SceneConfig};
use metrics::{MetricsWriter, RunCounters};
use snapshots::SnapshotWriter;

#[derive(Parser)]
#[command(name = "tessera-headless")]
#[command(about = "Headless CLI runner for Tessera particle and terrain scenes")]
struct Cli {
    /// Scene configuration file (YAML); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory for results
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Override the configured random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Render GPU frames at snapshot steps
    #[arg(long)]
    render: bool,
}

/// GPU state, only created when frames are requested
struct FrameOutput {
    gpu: GpuDevice,
    renderer: SceneRenderer,
    target: RenderTarget,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let cli = Cli::parse();

    // Load configuration
    let mut config: SceneConfig = match &cli.config {
        Some(path) => {
            println!("Loading configuration from {}", path.display());
            serde_yaml::from_str(&std::fs::read_to_string(path)?)?
        }
        None => SceneConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    std::fs::create_dir_all(&cli.out)?;

    // Terrain mesh
    let mut generator = GridMeshGenerator::new();
    let mesh = generator.generate(config.terrain.tessellation)?;
    println!(
        "Terrain grid {}x{}: {} vertices, {} indices",
        mesh.resolution,
        mesh.resolution,
        mesh.vertex_count(),
        mesh.index_count()
    );

    // Particles
    let mut pool = ParticlePool::new(config.particles.capacity as usize);
    let mut emitter = Emitter::new(&config.particles, config.world.seed);
    let mut counters = RunCounters::default();

    let mut frames = if cli.render {
        println!("Initializing GPU...");
        let gpu = pollster::block_on(GpuDevice::new())?;
        println!("{}", gpu.info());
        bindings::log_binding_layouts();

        let mut renderer = SceneRenderer::new(
            &gpu,
            &RenderParams::from(&config),
            pool.capacity(),
            config.render.clear_color,
        );
        renderer.set_mesh(&gpu, mesh);
        if let Some(buffers) = renderer.mesh() {
            log::info!(
                "Uploaded terrain {}x{}, drawing {} strip indices",
                buffers.resolution(),
                buffers.resolution(),
                buffers.index_count()
            );
        }

        let max_side = gpu.device.limits().max_texture_dimension_2d;
        let [width, height] = config.output.image_size;
        if width > max_side || height > max_side {
            anyhow::bail!(
                "output.image_size [{}, {}] exceeds the device texture limit of {}",
                width,
                height,
                max_side
            );
        }
        let target = RenderTarget::new(&gpu.device, config.output.image_size);
        Some(FrameOutput { gpu, renderer, target })
    } else {
        None
    };

    let mut metrics_writer = MetricsWriter::new(&cli.out)?;
    let snapshot_writer = SnapshotWriter::new(&cli.out);

    println!("Starting simulation for {} steps...", config.world.steps);
    let start_time = Instant::now();
    let dt = config.world.dt;

    for step in 0..=config.world.steps {
        let step_start = Instant::now();

        // Step 0 records the initial, empty state
        if step > 0 {
            let before_drops = emitter.dropped();
            emitter.emit(&mut pool, dt);
            if emitter.dropped() > before_drops {
                log::debug!("step {}: pool full, dropped {}", step, emitter.dropped() - before_drops);
            }
            counters.culled_total += pool.update(dt) as u64;
            counters.spawned_total = emitter.spawned();
            counters.dropped_total = emitter.dropped();
        }

        if step % config.output.metrics_interval == 0 {
            let stats = pool.stats();
            metrics_writer.write_step(step, &stats, &counters, step_start.elapsed())?;

            println!(
                "Step {}: live={}/{}, spawned={}, dropped={}, culled={}",
                step,
                stats.live_count,
                stats.capacity,
                counters.spawned_total,
                counters.dropped_total,
                counters.culled_total
            );
        }

        if config.output.snapshot_steps.contains(&step) {
            snapshot_writer.write_particles_snapshot(step, &pool)?;
            snapshot_writer.write_stats_snapshot(step, &pool.stats())?;
            snapshot_writer.write_density_snapshot(step, &pool, config.output.image_size)?;

            if let Some(frames) = frames.as_mut() {
                frames.renderer.upload_particles(&frames.gpu, &pool);
                frames.renderer.render(&frames.gpu, &frames.target);
                let rgba = frames.target.read_rgba(&frames.gpu)?;
                snapshot_writer.write_frame(step, rgba, frames.target.size)?;
            }

            println!("Snapshot written for step {}", step);
        }
    }

    let total_time = start_time.elapsed();
    println!("Simulation completed in {:?}", total_time);
    println!(
        "Spawned {}, dropped {}, culled {}, {} metrics rows",
        counters.spawned_total,
        counters.dropped_total,
        counters.culled_total,
        metrics_writer.step_count()
    );
    println!("Results written to {}", cli.out.display());

    Ok(())
}
