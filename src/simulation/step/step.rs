use crate::domain::particle::{pair_mut, Particle};
use crate::temperature::apply_ambient_effects;
use crate::transitions::{apply_phase_transition, interact, tick_lifetime, InteractionTally};

use super::defaults::{ensure_defaults, repair_non_finite};
use super::{Stopwatch, TickContext, Workspace};

/// One tick over one particle collection:
/// filter "none" -> defaults -> rebuild grid -> update each particle in input order
pub(super) fn run(ctx: &TickContext<'_>, ws: &mut Workspace, particles: &mut Vec<Particle>) {
    let collect = ctx.collect_stats;
    if collect {
        ws.stats.reset();
        ws.stats.frame = ctx.frame;
    }
    let watch = if collect { Some(Stopwatch::start()) } else { None };

    if !particles.is_empty() {
        tick(ctx, ws, particles);
    }

    if let Some(watch) = watch {
        ws.stats.step_ms = watch.elapsed_ms();
    }
}

fn tick(ctx: &TickContext<'_>, ws: &mut Workspace, particles: &mut Vec<Particle>) {
    let collect = ctx.collect_stats;

    // Last tick's casualties
    let before = particles.len();
    particles.retain(|p| !p.is_expired());

    let mut repaired = 0u32;
    for (index, particle) in particles.iter_mut().enumerate() {
        if ensure_defaults(ctx.content, ctx.config, particle, index) {
            repaired += 1;
        }
    }

    ws.ensure_cell_size(ctx.config.cell_size);
    ws.grid.rebuild(particles);

    for index in 0..particles.len() {
        update_particle(ctx, ws, particles, index);
    }

    let mut expired = 0u32;
    for (index, particle) in particles.iter_mut().enumerate() {
        if particle.is_expired() {
            expired += 1;
        } else {
            repair_non_finite(ctx.config, particle, index);
        }
    }

    if collect {
        ws.stats.particles_in = before as u32;
        ws.stats.culled = (before - particles.len()) as u32;
        ws.stats.defaults_repaired = repaired;
        ws.stats.expired = expired;
        ws.stats.occupied_cells = ws.grid.occupied_cells() as u32;
    }
}

fn update_particle(ctx: &TickContext<'_>, ws: &mut Workspace, particles: &mut [Particle], index: usize) {
    let content = ctx.content;
    let config = ctx.config;

    let particle = &mut particles[index];
    // Destroyed by a reaction earlier in this tick
    if particle.is_expired() {
        return;
    }

    apply_ambient_effects(particle, &config.thermal);
    if apply_phase_transition(content, particle) && ctx.collect_stats {
        ws.stats.phase_changes += 1;
    }
    if tick_lifetime(particle) {
        return;
    }

    let position = particle.position;
    ws.grid
        .query_neighbors(index, position, config.interaction_radius, &mut ws.neighbors);

    let mut tally = InteractionTally::default();
    for &other in ws.neighbors.iter() {
        if particles[other].is_expired() {
            continue;
        }
        let (particle, neighbor) = pair_mut(particles, index, other);
        interact(content, &config.thermal, particle, neighbor, &mut tally);
        if particle.is_expired() {
            break;
        }
    }

    if ctx.collect_stats {
        ws.stats.absorb(&tally);
    }
}
