//! Random flight batch generation for simulation.
//!
//! Produces plausible arrival traffic around a base instant, single-day or
//! tagged across several operating days. Takes any [`Rng`], so tests and
//! reproducible demos pass a seeded generator.

use rand::Rng;

use crate::models::{Flight, HOUR_MS, MINUTE_MS};

/// Airport codes flights are generated from.
const ORIGINS: [&str; 10] = [
    "JFK", "LAX", "ORD", "DFW", "ATL", "SFO", "MIA", "BOS", "SEA", "DEN",
];

/// Knobs for random batch generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Destination all generated flights arrive at.
    pub destination: String,
    /// Center of the arrival window (ms).
    pub base_ms: i64,
    /// Arrival offset drawn from ±this many minutes around the base.
    pub max_offset_min: i64,
    /// Occupancy drawn from this range (minutes, inclusive).
    pub occupancy_min: (i64, i64),
    /// Passenger count range (inclusive).
    pub passengers: (u32, u32),
    /// Route distance range (km).
    pub distance_km: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            destination: "LHR".to_string(),
            base_ms: 0,
            max_offset_min: 60,
            occupancy_min: (10, 20),
            passengers: (80, 450),
            distance_km: (400.0, 9000.0),
        }
    }
}

/// Generates `count` random flights arriving around the configured base.
///
/// IDs are sequential (`FL0001`, `FL0002`, …); origins are drawn from a
/// fixed airport list, never equal to the destination; priorities cover
/// the full 1..=10 range.
pub fn generate<R: Rng>(rng: &mut R, count: usize, config: &GeneratorConfig) -> Vec<Flight> {
    (0..count)
        .map(|i| random_flight(rng, i + 1, config, None))
        .collect()
}

/// Generates `per_day` flights for each of `days` consecutive operating
/// days, day-tagged, each day's window centered 24h after the previous.
pub fn generate_days<R: Rng>(
    rng: &mut R,
    days: u32,
    per_day: usize,
    config: &GeneratorConfig,
) -> Vec<Flight> {
    let mut flights = Vec::with_capacity(days as usize * per_day);
    for day in 0..days {
        let mut day_config = config.clone();
        day_config.base_ms = config.base_ms + i64::from(day) * 24 * HOUR_MS;
        for _ in 0..per_day {
            let number = flights.len() + 1;
            flights.push(random_flight(rng, number, &day_config, Some(day)));
        }
    }
    flights
}

fn random_flight<R: Rng>(
    rng: &mut R,
    number: usize,
    config: &GeneratorConfig,
    day: Option<u32>,
) -> Flight {
    let origin = loop {
        let candidate = ORIGINS[rng.random_range(0..ORIGINS.len())];
        if candidate != config.destination {
            break candidate;
        }
    };

    let offset_min = rng.random_range(-config.max_offset_min..=config.max_offset_min);
    let start_ms = config.base_ms + offset_min * MINUTE_MS;
    let occupancy_ms = rng.random_range(config.occupancy_min.0..=config.occupancy_min.1) * MINUTE_MS;

    let mut flight = Flight::new(format!("FL{number:04}"), start_ms, occupancy_ms)
        .with_route(origin, config.destination.clone())
        .with_priority(rng.random_range(1..=10))
        .with_passengers(rng.random_range(config.passengers.0..=config.passengers.1))
        .with_distance_km(rng.random_range(config.distance_km.0..=config.distance_km.1));
    if let Some(day) = day {
        flight = flight.with_day(day);
    }
    flight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_flights;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_count_and_ids() {
        let mut rng = SmallRng::seed_from_u64(7);
        let flights = generate(&mut rng, 25, &GeneratorConfig::default());

        assert_eq!(flights.len(), 25);
        let ids: HashSet<&str> = flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 25);
        assert_eq!(flights[0].id, "FL0001");
    }

    #[test]
    fn test_generated_batch_is_well_formed() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = GeneratorConfig::default();
        let flights = generate(&mut rng, 50, &config);

        assert!(validate_flights(&flights).is_ok());
        for f in &flights {
            assert!((1..=10).contains(&f.priority));
            assert!(f.occupancy_ms >= 10 * MINUTE_MS && f.occupancy_ms <= 20 * MINUTE_MS);
            assert!(f.start_ms.abs() <= 60 * MINUTE_MS);
            assert_ne!(f.origin, f.destination);
            assert_eq!(f.destination, "LHR");
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let config = GeneratorConfig::default();
        let a = generate(&mut SmallRng::seed_from_u64(42), 10, &config);
        let b = generate(&mut SmallRng::seed_from_u64(42), 10, &config);

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.start_ms, y.start_ms);
            assert_eq!(x.origin, y.origin);
        }
    }

    #[test]
    fn test_generate_days_tags_and_shifts() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = GeneratorConfig::default();
        let flights = generate_days(&mut rng, 3, 8, &config);

        assert_eq!(flights.len(), 24);
        for f in &flights {
            let day = f.day.expect("generated flights are day-tagged");
            let day_base = i64::from(day) * 24 * HOUR_MS;
            assert!((f.start_ms - day_base).abs() <= 60 * MINUTE_MS);
        }
        let days: HashSet<u32> = flights.iter().filter_map(|f| f.day).collect();
        assert_eq!(days, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_ids_unique_across_days() {
        let mut rng = SmallRng::seed_from_u64(7);
        let flights = generate_days(&mut rng, 2, 5, &GeneratorConfig::default());
        let ids: HashSet<&str> = flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
    }
}
