//! Particle records - the JSON objects the renderer hands in each tick
//!
//! `{ type, position, temperature?, lifetime?, velocity?, heatSource?, ... }`
//!
//! Every field is decoded on its own: a malformed field is logged and falls
//! back to its default while the rest of the record is kept. Fields the core
//! does not model (host ids, particle size, ...) are carried through to the
//! output untouched. Only input that is not JSON at all is an error.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::Vec3;
use crate::domain::content::ContentRegistry;
use crate::domain::particle::Particle;
use crate::elements::ElementId;
use crate::simulation::{SimConfig, Simulator};

const TYPE: &str = "type";
const POSITION: &str = "position";
const TEMPERATURE: &str = "temperature";
const LIFETIME: &str = "lifetime";
const VELOCITY: &str = "velocity";
const HEAT_SOURCE: &str = "heatSource";

/// One host record: the simulated state plus whatever else the host attached
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRecord {
    pub particle: Particle,
    /// Host fields passed through as-is
    pub extra: Map<String, Value>,
}

/// Outgoing record; expired particles carry `"type": "none"`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordView<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    position: Vec3,
    temperature: f32,
    lifetime: i32,
    velocity: Vec3,
    heat_source: bool,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// Unknown type tags seen in one decode pass, reported once
#[derive(Default)]
struct UnknownTypes {
    count: usize,
    first: Option<String>,
}

impl UnknownTypes {
    fn resolve(&mut self, content: &ContentRegistry, key: &str) -> ElementId {
        match content.id_by_key(key) {
            Some(id) => id,
            None => {
                self.count += 1;
                self.first.get_or_insert_with(|| key.to_string());
                content.fallback_id()
            }
        }
    }

    fn report(&self, content: &ContentRegistry) {
        if let Some(first) = &self.first {
            log::warn!(
                "{} record(s) with unknown type (first {:?}), treated as {}",
                self.count,
                first,
                content.key_of(content.fallback_id())
            );
        }
    }
}

/// Take `key` out of the record and parse it. Absent or null fields are
/// `None` silently, malformed ones are `None` with a warning.
fn take_field<T>(
    map: &mut Map<String, Value>,
    key: &str,
    index: usize,
    parse: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    match map.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = parse(&value);
            if parsed.is_none() {
                log::warn!("record {}: malformed {} {}, using default", index, key, value);
            }
            parsed
        }
    }
}

fn vec3_from_value(value: &Value) -> Option<Vec3> {
    let component = |v: &Value| v.as_f64().map(|n| n as f32);
    match value {
        Value::Array(items) if items.len() == 3 => Some(Vec3::new(
            component(&items[0])?,
            component(&items[1])?,
            component(&items[2])?,
        )),
        Value::Object(map) => Some(Vec3::new(
            component(map.get("x")?)?,
            component(map.get("y")?)?,
            component(map.get("z")?)?,
        )),
        _ => None,
    }
}

/// Integer ticks; fractional values round, out-of-range values saturate
fn lifetime_from_value(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return Some(n.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    let n = value.as_f64()?;
    n.is_finite()
        .then(|| n.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

impl ParticleRecord {
    fn decode(
        value: Value,
        content: &ContentRegistry,
        config: &SimConfig,
        unknown: &mut UnknownTypes,
        index: usize,
    ) -> Self {
        let mut extra = match value {
            Value::Object(map) => map,
            other => {
                log::warn!("record {}: expected an object, got {}, using defaults", index, other);
                Map::new()
            }
        };

        let element = match take_field(&mut extra, TYPE, index, |v| v.as_str().map(str::to_owned)) {
            Some(key) => unknown.resolve(content, &key),
            None => content.fallback_id(),
        };

        if extra.get(POSITION).map_or(true, Value::is_null) {
            log::warn!("record {}: missing position, using origin", index);
        }
        let position = take_field(&mut extra, POSITION, index, vec3_from_value).unwrap_or(Vec3::ZERO);

        let particle = Particle {
            element,
            position,
            temperature: take_field(&mut extra, TEMPERATURE, index, |v| v.as_f64().map(|t| t as f32))
                .unwrap_or(config.thermal.ambient_temperature),
            lifetime: take_field(&mut extra, LIFETIME, index, lifetime_from_value)
                .unwrap_or(config.default_lifetime),
            velocity: take_field(&mut extra, VELOCITY, index, vec3_from_value).unwrap_or(Vec3::ZERO),
            heat_source: take_field(&mut extra, HEAT_SOURCE, index, Value::as_bool).unwrap_or(false),
        };

        Self { particle, extra }
    }

    fn view<'a>(&'a self, content: &'a ContentRegistry) -> RecordView<'a> {
        let p = &self.particle;
        RecordView {
            kind: content.key_of(p.element),
            position: p.position,
            temperature: p.temperature,
            lifetime: p.lifetime,
            velocity: p.velocity,
            heat_source: p.heat_source,
            extra: &self.extra,
        }
    }
}

/// Decode a record list. `None` when the JSON is valid but not an array.
pub fn decode_records(
    content: &ContentRegistry,
    config: &SimConfig,
    json: &str,
) -> Result<Option<Vec<ParticleRecord>>, serde_json::Error> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Ok(None);
    };

    let mut unknown = UnknownTypes::default();
    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ParticleRecord::decode(item, content, config, &mut unknown, index))
        .collect();
    unknown.report(content);
    Ok(Some(records))
}

pub fn encode_records(content: &ContentRegistry, records: &[ParticleRecord]) -> Result<String, serde_json::Error> {
    let views: Vec<RecordView<'_>> = records.iter().map(|r| r.view(content)).collect();
    serde_json::to_string(&views)
}

/// One tick over a JSON record list. Non-array input is handed back untouched.
pub fn simulate_json(sim: &mut Simulator, json: &str) -> Result<String, serde_json::Error> {
    let content = sim.content().clone();
    let Some(records) = decode_records(&content, sim.config(), json)? else {
        log::warn!("simulate input is not an array, skipping tick");
        return Ok(json.to_string());
    };

    let (mut particles, extras): (Vec<Particle>, Vec<Map<String, Value>>) =
        records.into_iter().map(|r| (r.particle, r.extra)).unzip();
    // The tick drops records that arrived as "none"; host fields follow
    let live: Vec<bool> = particles.iter().map(|p| !p.is_expired()).collect();

    sim.simulate(&mut particles);
    debug_assert_eq!(particles.len(), live.iter().filter(|&&keep| keep).count());

    let extras = extras
        .into_iter()
        .zip(live)
        .filter_map(|(extra, keep)| keep.then_some(extra));
    let records: Vec<ParticleRecord> = particles
        .into_iter()
        .zip(extras)
        .map(|(particle, extra)| ParticleRecord { particle, extra })
        .collect();
    encode_records(&content, &records)
}
