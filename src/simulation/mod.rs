//! Simulation - per-tick coordinator
//!
//! `Simulator` owns the registry handle, the tuning constants and the scratch
//! state (spatial grid, neighbor buffer, stats). Each `simulate` call takes
//! exclusive ownership of the caller's particle collection for one tick:
//!
//! 1. drop particles already carrying "none"
//! 2. repair missing/invalid fields to defaults
//! 3. rebuild the spatial grid
//! 4. per particle, in input order: ambient temperature, phase change,
//!    lifetime, neighbor interactions
//!
//! Particles that expire during the tick stay in the collection (as "none")
//! so the caller can see them; the next call drops them.

use std::sync::Arc;

use crate::core::Vec3;
use crate::domain::content::ContentRegistry;
use crate::domain::particle::Particle;
use crate::spatial::grid::SpatialGrid;

#[path = "init/config.rs"]
mod config;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/defaults.rs"]
mod defaults;
#[path = "step/step.rs"]
mod step;
#[path = "step/regions.rs"]
mod regions;

pub use config::{ConfigError, SimConfig};
pub use perf_stats::StepStats;
pub use regions::Region;

use perf_stats::Stopwatch;

/// Read-only inputs shared by every collection stepped in one call
pub(crate) struct TickContext<'a> {
    content: &'a ContentRegistry,
    config: &'a SimConfig,
    frame: u64,
    collect_stats: bool,
}

/// Per-collection scratch state, reused across ticks
#[derive(Debug, Default)]
pub(crate) struct Workspace {
    grid: SpatialGrid,
    neighbors: Vec<usize>,
    stats: StepStats,
}

impl Workspace {
    fn ensure_cell_size(&mut self, cell_size: f32) {
        if self.grid.cell_size() != cell_size {
            self.grid = SpatialGrid::new(cell_size);
        }
    }
}

pub struct Simulator {
    content: Arc<ContentRegistry>,
    config: SimConfig,
    workspace: Workspace,
    frame: u64,
    stats_enabled: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Simulator {
    pub fn new(content: Arc<ContentRegistry>, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(content, config))
    }

    /// Built-in registry, default constants
    pub fn with_defaults() -> Self {
        Self::build(Arc::new(ContentRegistry::builtin()), SimConfig::default())
    }

    fn build(content: Arc<ContentRegistry>, config: SimConfig) -> Self {
        Self {
            content,
            config,
            workspace: Workspace {
                grid: SpatialGrid::new(config.cell_size),
                neighbors: Vec::with_capacity(64),
                stats: StepStats::default(),
            },
            frame: 0,
            stats_enabled: false,
        }
    }

    pub fn content(&self) -> &Arc<ContentRegistry> {
        &self.content
    }

    /// Swap the registry between ticks. Ids are per-registry, so particles
    /// built against the old one should be re-resolved by key.
    pub fn set_content(&mut self, content: Arc<ContentRegistry>) {
        self.content = content;
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Enable or disable per-tick stats (adds timing overhead when enabled)
    pub fn enable_stats(&mut self, enabled: bool) {
        self.stats_enabled = enabled;
        if !enabled {
            self.workspace.stats.reset();
        }
    }

    /// Last tick's stats (zeros when disabled)
    pub fn stats(&self) -> &StepStats {
        &self.workspace.stats
    }

    /// A fresh particle of type `key` (unknown keys become the fallback type)
    pub fn spawn(&self, key: &str, position: Vec3) -> Particle {
        Particle::new(self.content.id_or_default(key), position)
            .with_lifetime(self.config.default_lifetime)
            .with_temperature(self.config.thermal.ambient_temperature)
    }

    /// Advance `particles` by one tick, in place
    pub fn simulate(&mut self, particles: &mut Vec<Particle>) {
        let ctx = TickContext {
            content: &self.content,
            config: &self.config,
            frame: self.frame,
            collect_stats: self.stats_enabled,
        };
        step::run(&ctx, &mut self.workspace, particles);
        self.frame += 1;
    }

    /// Advance several disjoint regions by one tick. Regions never see each
    /// other's particles; with the `parallel` feature they run on rayon's pool.
    pub fn simulate_regions(&mut self, regions: &mut [Region]) {
        let ctx = TickContext {
            content: &self.content,
            config: &self.config,
            frame: self.frame,
            collect_stats: self.stats_enabled,
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            regions
                .par_iter_mut()
                .for_each(|region| step::run(&ctx, &mut region.workspace, &mut region.particles));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for region in regions.iter_mut() {
                step::run(&ctx, &mut region.workspace, &mut region.particles);
            }
        }

        self.frame += 1;
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
