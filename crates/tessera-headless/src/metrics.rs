use csv::Writer;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tessera_core::sim::PoolStats;

/// Cumulative emitter/pool counters reported alongside each metrics row
#[derive(Debug, Clone, Copy, Default)]
pub struct RunCounters {
    pub spawned_total: u64,
    pub dropped_total: u64,
    pub culled_total: u64,
}

/// Metrics writer for CSV output and performance logging
pub struct MetricsWriter {
    csv_writer: Writer<File>,
    step_count: u32,
}

impl MetricsWriter {
    /// Create `metrics.csv` in the output directory and write its header
    pub fn new(output_dir: &Path) -> Result<Self, anyhow::Error> {
        let csv_path = output_dir.join("metrics.csv");
        let file = File::create(&csv_path)?;

        let mut csv_writer = Writer::from_writer(file);
        csv_writer.write_record([
            "step",
            "live", "capacity",
            "spawned_total", "dropped_total", "culled_total",
            "mean_elapsed", "mean_life_fraction", "mean_speed",
            "wall_time_ms",
        ])?;

        Ok(Self {
            csv_writer,
            step_count: 0,
        })
    }

    /// Write metrics for a single simulation step
    pub fn write_step(
        &mut self,
        step: u32,
        stats: &PoolStats,
        counters: &RunCounters,
        step_time: Duration,
    ) -> Result<(), anyhow::Error> {
        let wall_time_ms = step_time.as_secs_f64() * 1000.0;

        self.csv_writer.write_record(&[
            step.to_string(),
            stats.live_count.to_string(),
            stats.capacity.to_string(),
            counters.spawned_total.to_string(),
            counters.dropped_total.to_string(),
            counters.culled_total.to_string(),
            stats.mean_elapsed.to_string(),
            stats.mean_life_fraction.to_string(),
            stats.mean_speed.to_string(),
            wall_time_ms.to_string(),
        ])?;

        self.csv_writer.flush()?;
        self.step_count += 1;

        Ok(())
    }

    /// Get the number of steps written
    pub fn step_count(&self) -> u32 {
        self.step_count
    }
}
