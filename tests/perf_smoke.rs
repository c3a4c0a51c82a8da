use sandpit_engine::{Region, Simulator, Vec3};

fn lattice(kind: &str, sim: &Simulator, origin: f32, side: usize) -> Vec<sandpit_engine::Particle> {
    let mut out = Vec::with_capacity(side * side * side);
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                let p = Vec3::new(origin + x as f32 * 0.3, y as f32 * 0.3, z as f32 * 0.3);
                out.push(sim.spawn(kind, p));
            }
        }
    }
    out
}

#[test]
fn perf_smoke_step() {
    let mut sim = Simulator::with_defaults();
    sim.enable_stats(true);
    let mut particles = lattice("sand", &sim, 0.0, 16);
    sim.simulate(&mut particles);

    let stats = sim.stats();
    assert_eq!(stats.particles_in, 16 * 16 * 16);
    assert!(stats.neighbor_pairs > 0);
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.to_json().contains("\"neighborPairs\""));
}

#[test]
fn perf_smoke_regions() {
    let mut sim = Simulator::with_defaults();
    sim.enable_stats(true);
    let mut regions: Vec<Region> = (0..4)
        .map(|i| Region::new(lattice("water", &sim, i as f32 * 50.0, 8)))
        .collect();
    for _ in 0..5 {
        sim.simulate_regions(&mut regions);
    }
    for region in &regions {
        assert_eq!(region.particles.len(), 8 * 8 * 8);
        assert_eq!(region.stats().particles_in, 8 * 8 * 8);
        assert_eq!(region.stats().frame, 4);
    }
}
