use serde::Serialize;

use crate::transitions::InteractionTally;

/// Snapshot of the last tick. All zeros while stats are disabled.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStats {
    pub frame: u64,
    /// Collection size handed in, before the "none" filter
    pub particles_in: u32,
    /// Dropped by the leading "none" filter
    pub culled: u32,
    /// Particles that needed a field repaired to defaults
    pub defaults_repaired: u32,
    pub phase_changes: u32,
    /// Carrying "none" at the end of the tick
    pub expired: u32,
    pub neighbor_pairs: u32,
    pub heat_exchanges: u32,
    pub rules_applied: u32,
    pub reactions_applied: u32,
    pub occupied_cells: u32,
    pub step_ms: f64,
}

impl StepStats {
    pub(crate) fn reset(&mut self) {
        *self = StepStats::default();
    }

    pub(crate) fn absorb(&mut self, tally: &InteractionTally) {
        self.neighbor_pairs = self.neighbor_pairs.saturating_add(tally.pairs);
        self.heat_exchanges = self.heat_exchanges.saturating_add(tally.heat_exchanges);
        self.rules_applied = self.rules_applied.saturating_add(tally.rules_applied);
        self.reactions_applied = self.reactions_applied.saturating_add(tally.reactions_applied);
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Wall-clock stopwatch; `Date.now()` on wasm32 where `Instant` panics
#[derive(Clone, Copy)]
pub(crate) struct Stopwatch {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Stopwatch {
            #[cfg(target_arch = "wasm32")]
            started_ms: js_sys::Date::now(),
            #[cfg(not(target_arch = "wasm32"))]
            started: std::time::Instant::now(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            (js_sys::Date::now() - self.started_ms).max(0.0)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started.elapsed().as_secs_f64() * 1000.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_accumulates_tallies() {
        let mut stats = StepStats::default();
        let tally = InteractionTally { pairs: 2, heat_exchanges: 2, rules_applied: 1, reactions_applied: 0 };
        stats.absorb(&tally);
        stats.absorb(&tally);
        assert_eq!(stats.neighbor_pairs, 4);
        assert_eq!(stats.rules_applied, 2);
        stats.reset();
        assert_eq!(stats, StepStats::default());
    }

    #[test]
    fn stopwatch_never_runs_backwards() {
        let watch = Stopwatch::start();
        let first = watch.elapsed_ms();
        assert!(first >= 0.0);
        assert!(watch.elapsed_ms() >= first);
    }

    #[test]
    fn json_uses_camel_case() {
        let json = StepStats { step_ms: 1.5, ..StepStats::default() }.to_json();
        assert!(json.contains("\"stepMs\":1.5"));
        assert!(json.contains("\"defaultsRepaired\":0"));
    }
}
