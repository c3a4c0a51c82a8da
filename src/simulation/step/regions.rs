use crate::domain::particle::Particle;

use super::{StepStats, Workspace};

/// A disjoint particle set with its own grid, stepped alongside others by
/// `Simulator::simulate_regions`
#[derive(Debug, Default)]
pub struct Region {
    pub particles: Vec<Particle>,
    pub(super) workspace: Workspace,
}

impl Region {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            workspace: Workspace::default(),
        }
    }

    /// Stats of this region's last tick
    pub fn stats(&self) -> &StepStats {
        &self.workspace.stats
    }
}
