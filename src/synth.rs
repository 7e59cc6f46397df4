//! Synthetic events generator.
//!
//! Produces an `events.jsonl` that exercises every engine path: conflicting
//! sources for the same item, a human learning curve, a multi-week gap that
//! triggers bias decay, and circuit-breaker anomalies. Output is fully
//! determined by `(count, seed)`; the pseudorandom sequence itself is not
//! part of any replay contract.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::core::{to_canon_json_bytes, EventId, ItemId, Outcome, PriceEvent, Source};

const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const EPOCH_START: i64 = 1_700_000_000;

/// Catalog of priced items with realistic base prices in cents.
const CATALOG: &[(&str, i64)] = &[
    ("copper_pipe_15mm", 1_200),
    ("pvc_pipe_32mm", 800),
    ("steel_beam_ipn200", 15_000),
    ("cement_bag_25kg", 650),
    ("electrical_cable_2_5mm", 350),
    ("insulation_panel_100mm", 2_200),
    ("roof_tile_clay", 180),
    ("plasterboard_13mm", 450),
];

struct EventFactory {
    rng: StdRng,
    clock: i64,
    next_serial: u64,
    seed: u64,
    events: Vec<PriceEvent>,
}

impl EventFactory {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: EPOCH_START,
            next_serial: 0,
            seed,
            events: Vec::new(),
        }
    }

    fn push(&mut self, item_id: &str, source: Source, price_cents: i64, outcome: Outcome) {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.events.push(PriceEvent {
            // serial keeps ids unique; the seed keeps runs distinguishable
            event_id: EventId::generated(format!("ev-{:08x}-{serial:06}", self.seed)),
            item_id: ItemId::generated(item_id.to_string()),
            timestamp: self.clock,
            source,
            price_cents: price_cents.max(1),
            outcome,
        });
    }

    fn advance(&mut self, min_secs: i64, max_secs: i64) {
        self.clock += self.rng.gen_range(min_secs..=max_secs);
    }

    fn pick_item(&mut self) -> (&'static str, i64) {
        CATALOG[self.rng.gen_range(0..CATALOG.len())]
    }
}

/// Generate `count` events and write them to `path`, sorted by
/// `(timestamp, event_id)`. Returns the number written.
pub fn generate(path: &Path, count: usize, seed: u64) -> crate::Result<usize> {
    let mut factory = EventFactory::new(seed);

    // Historic baseline for every catalog item.
    for &(item, base) in CATALOG {
        for _ in 0..factory.rng.gen_range(3..=8) {
            let noise = factory.rng.gen_range(-base / 20..=base / 20);
            factory.push(item, Source::Historic, base + noise, Outcome::None);
            factory.advance(60, HOUR);
        }
    }

    // Supplier quotes interleaved with historic conflicts.
    for _ in 0..count / 5 {
        let (item, base) = factory.pick_item();
        let quote = base + factory.rng.gen_range(0..=base / 5);
        factory.push(item, Source::Supplier, quote, Outcome::None);
        factory.advance(30, HOUR / 2);
        if factory.rng.gen_bool(0.3) {
            let noise = factory.rng.gen_range(-base / 10..=base / 10);
            factory.push(item, Source::Historic, base + noise, Outcome::None);
            factory.advance(10, 300);
        }
    }

    // Learning curve: supplier quote then a human verdict, mostly accepted.
    for _ in 0..count / 4 {
        let (item, base) = factory.pick_item();
        let quote = base + factory.rng.gen_range(base / 20..=base / 5);
        factory.push(item, Source::Supplier, quote, Outcome::None);
        factory.advance(60, 600);

        let markup = factory.rng.gen_range(base / 10..=base / 3);
        let outcome = if factory.rng.gen_bool(0.75) {
            Outcome::QuoteAccepted
        } else {
            Outcome::QuoteRejected
        };
        factory.push(item, Source::Human, quote + markup, outcome);
        factory.advance(300, HOUR);
    }

    // Decay window: jump past the threshold, then quote-and-query pairs.
    factory.clock += 8 * DAY;
    for _ in 0..count / 10 {
        let (item, base) = factory.pick_item();
        let quote = base + factory.rng.gen_range(0..=base / 5);
        factory.push(item, Source::Supplier, quote, Outcome::None);
        factory.advance(60, HOUR / 2);
        let noise = factory.rng.gen_range(-50..=50);
        factory.push(item, Source::Historic, base + noise, Outcome::None);
        factory.advance(60, HOUR);
    }

    // Circuit-breaker bait: accepted human prices far above the supplier.
    for _ in 0..count / 20 {
        let (item, base) = factory.pick_item();
        let quote = base + factory.rng.gen_range(0..=base / 10);
        factory.push(item, Source::Supplier, quote, Outcome::None);
        factory.advance(30, 300);
        let spike = quote * 2 + factory.rng.gen_range(100..=500);
        factory.push(item, Source::Human, spike, Outcome::QuoteAccepted);
        factory.advance(60, HOUR);
    }

    // Mixed filler up to the requested count.
    while factory.events.len() < count {
        let (item, base) = factory.pick_item();
        let source = match factory.rng.gen_range(0..4) {
            0 => Source::Historic,
            1 | 2 => Source::Supplier,
            _ => Source::Human,
        };
        let outcome = if source == Source::Human {
            match factory.rng.gen_range(0..3) {
                0 => Outcome::QuoteAccepted,
                1 => Outcome::QuoteRejected,
                _ => Outcome::None,
            }
        } else {
            Outcome::None
        };
        let noise = factory.rng.gen_range(-base / 10..=base / 5);
        factory.push(item, source, base + noise, outcome);
        factory.advance(30, HOUR);
    }

    let mut events = factory.events;
    events.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.event_id.cmp(&b.event_id))
    });

    let mut out = BufWriter::new(File::create(path)?);
    for event in &events {
        let bytes = to_canon_json_bytes(event)?;
        out.write_all(&bytes)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(path = %path.display(), events = events.len(), seed, "synthetic events written");
    Ok(events.len())
}
