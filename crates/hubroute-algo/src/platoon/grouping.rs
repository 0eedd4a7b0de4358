//! Platoon formation and dispersion statistics

use super::{expand_trips, TriangularSchedule, Trip};
use crate::hub::{Corridor, RouteDecision};
use hubroute_core::{HubRouteError, HubRouteResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Vehicles per platoon in this domain.
pub const DEFAULT_PLATOON_SIZE: usize = 4;

/// Attribute used to order trips before they are cut into platoons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    /// Network distance from the origin to the first hub
    #[default]
    NetworkDistance,
    /// Network distance plus the sampled schedule offset
    DistancePlusSchedule,
}

impl GroupingKey {
    pub fn value(&self, trip: &Trip) -> f64 {
        match self {
            GroupingKey::NetworkDistance => trip.network_distance,
            GroupingKey::DistancePlusSchedule => trip.network_distance + trip.schedule_offset,
        }
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingKey::NetworkDistance => write!(f, "network_distance"),
            GroupingKey::DistancePlusSchedule => write!(f, "distance_plus_schedule"),
        }
    }
}

/// One complete group of trips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platoon {
    pub trips: Vec<Trip>,
    /// Spread of the grouping key inside the group (max - min)
    pub dispersion: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DispersionStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Number of complete platoons the statistics cover
    pub count: usize,
}

fn default_group_size() -> usize {
    DEFAULT_PLATOON_SIZE
}

/// Platoon analysis settings for one corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatoonConfig {
    pub corridor: Corridor,
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    #[serde(default)]
    pub grouping_key: GroupingKey,
    /// Synthetic departure offsets; required by `DistancePlusSchedule`
    #[serde(default)]
    pub schedule: Option<TriangularSchedule>,
}

impl PlatoonConfig {
    pub fn new(corridor: Corridor) -> Self {
        Self {
            corridor,
            group_size: DEFAULT_PLATOON_SIZE,
            grouping_key: GroupingKey::default(),
            schedule: None,
        }
    }

    pub fn with_schedule(mut self, schedule: TriangularSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_grouping_key(mut self, key: GroupingKey) -> Self {
        self.grouping_key = key;
        self
    }

    pub fn validate(&self) -> HubRouteResult<()> {
        if self.group_size == 0 {
            return Err(HubRouteError::Config("platoon group size must be at least 1".into()));
        }
        match (&self.schedule, self.grouping_key) {
            (Some(schedule), _) => schedule.validate(),
            (None, GroupingKey::DistancePlusSchedule) => Err(HubRouteError::Config(
                "grouping key distance_plus_schedule needs a triangular schedule".into(),
            )),
            (None, GroupingKey::NetworkDistance) => Ok(()),
        }
    }
}

/// Result of grouping the trips on one corridor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatoonReport {
    pub corridor: Corridor,
    pub key: GroupingKey,
    /// Every trip on the corridor, in grouping order
    pub trips: Vec<Trip>,
    pub platoons: Vec<Platoon>,
    /// Trailing trips that do not fill a platoon
    pub leftover: Vec<Trip>,
    pub stats: DispersionStats,
}

impl PlatoonReport {
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Platoon Analysis [{}]\n{}\n", self.corridor, "=".repeat(40)));
        s.push_str(&format!("Grouping key: {}\n", self.key));
        s.push_str(&format!(
            "Trips: {} ({} platoons, {} left over)\n",
            self.trips.len(),
            self.platoons.len(),
            self.leftover.len()
        ));
        s.push_str(&format!(
            "Dispersion: mean {:.4}, min {:.4}, max {:.4}\n",
            self.stats.mean, self.stats.min, self.stats.max
        ));
        s
    }
}

/// Sort trips by `key` and cut them into consecutive groups of `group_size`.
///
/// Returns the complete platoons and the trailing partial group. The sort
/// is stable, so trips with equal keys keep their input order.
pub fn group_trips(
    mut trips: Vec<Trip>,
    key: GroupingKey,
    group_size: usize,
) -> (Vec<Platoon>, Vec<Trip>) {
    if group_size == 0 {
        return (Vec::new(), trips);
    }
    trips.sort_by(|a, b| key.value(a).total_cmp(&key.value(b)));

    let chunks = trips.chunks_exact(group_size);
    let leftover = chunks.remainder().to_vec();
    let platoons = chunks
        .map(|group| {
            let (lo, hi) = group.iter().map(|t| key.value(t)).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), v| (lo.min(v), hi.max(v)),
            );
            Platoon {
                trips: group.to_vec(),
                dispersion: hi - lo,
            }
        })
        .collect();
    (platoons, leftover)
}

/// Mean, min and max dispersion over complete platoons.
///
/// With no complete platoon the statistics are undefined and a
/// [`HubRouteError::GroupingPrecondition`] is returned.
pub fn dispersion_stats(
    platoons: &[Platoon],
    trips: usize,
    group_size: usize,
) -> HubRouteResult<DispersionStats> {
    if platoons.is_empty() {
        return Err(HubRouteError::GroupingPrecondition { trips, group_size });
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut total = 0.0;
    for platoon in platoons {
        min = min.min(platoon.dispersion);
        max = max.max(platoon.dispersion);
        total += platoon.dispersion;
    }
    Ok(DispersionStats {
        mean: total / platoons.len() as f64,
        min,
        max,
        count: platoons.len(),
    })
}

/// Group the trips on `config.corridor`, drawing schedule offsets from the
/// configured schedule's own random source.
pub fn analyze_corridor<'a, I>(decisions: I, config: &PlatoonConfig) -> HubRouteResult<PlatoonReport>
where
    I: IntoIterator<Item = &'a RouteDecision>,
{
    match &config.schedule {
        Some(schedule) => analyze_corridor_with_rng(decisions, config, &mut schedule.rng()),
        None => analyze_corridor_with_rng(decisions, config, &mut rand::thread_rng()),
    }
}

/// Same as [`analyze_corridor`] with an injected random source.
pub fn analyze_corridor_with_rng<'a, I, R>(
    decisions: I,
    config: &PlatoonConfig,
    rng: &mut R,
) -> HubRouteResult<PlatoonReport>
where
    I: IntoIterator<Item = &'a RouteDecision>,
    R: Rng + ?Sized,
{
    config.validate()?;
    let mut trips = expand_trips(decisions, config.corridor)?;
    debug!(corridor = %config.corridor, trips = trips.len(), "expanded corridor trips");

    if let Some(schedule) = &config.schedule {
        schedule.assign(&mut trips, rng);
    }

    let trip_total = trips.len();
    let (platoons, leftover) = group_trips(trips, config.grouping_key, config.group_size);
    let stats = dispersion_stats(&platoons, trip_total, config.group_size)?;

    info!(
        corridor = %config.corridor,
        key = %config.grouping_key,
        platoons = stats.count,
        leftover = leftover.len(),
        mean = stats.mean,
        min = stats.min,
        max = stats.max,
        "platoon dispersion"
    );

    let mut ordered = Vec::with_capacity(trip_total);
    for platoon in &platoons {
        ordered.extend_from_slice(&platoon.trips);
    }
    ordered.extend_from_slice(&leftover);

    Ok(PlatoonReport {
        corridor: config.corridor,
        key: config.grouping_key,
        trips: ordered,
        platoons,
        leftover,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::Route;
    use hubroute_core::LocationId;

    fn id(v: usize) -> LocationId {
        LocationId::new(v)
    }

    fn corridor() -> Corridor {
        Corridor::new(id(14), id(40))
    }

    fn decision(origin: usize, flow: f64, distance: f64) -> RouteDecision {
        RouteDecision {
            origin: id(origin),
            destination: id(77),
            route: Route::ViaHubs {
                hub_from: id(14),
                hub_to: id(40),
            },
            flow,
            unit_cost: 1.0,
            network_distance: Some(distance),
        }
    }

    fn unit_trips(distances: &[f64]) -> Vec<RouteDecision> {
        distances
            .iter()
            .enumerate()
            .map(|(n, &d)| decision(n + 1, 1.0, d))
            .collect()
    }

    #[test]
    fn test_config_constructor_defaults() {
        let cfg = PlatoonConfig::new(corridor());
        assert_eq!(cfg.group_size, DEFAULT_PLATOON_SIZE);
        assert_eq!(cfg.grouping_key, GroupingKey::NetworkDistance);
        assert!(cfg.schedule.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_single_platoon_dispersion() {
        let decisions = unit_trips(&[9.0, 2.0, 20.0, 5.0]);
        let report = analyze_corridor(&decisions, &PlatoonConfig::new(corridor())).unwrap();
        assert_eq!(report.platoons.len(), 1);
        assert!(report.leftover.is_empty());
        assert_eq!(report.stats.mean, 18.0);
        assert_eq!(report.stats.min, 18.0);
        assert_eq!(report.stats.max, 18.0);
        let order: Vec<f64> = report.trips.iter().map(|t| t.network_distance).collect();
        assert_eq!(order, vec![2.0, 5.0, 9.0, 20.0]);
    }

    #[test]
    fn test_partial_group_excluded() {
        let decisions = unit_trips(&[2.0, 5.0, 9.0, 20.0, 1000.0]);
        let report = analyze_corridor(&decisions, &PlatoonConfig::new(corridor())).unwrap();
        assert_eq!(report.platoons.len(), 1);
        assert_eq!(report.leftover.len(), 1);
        assert_eq!(report.leftover[0].network_distance, 1000.0);
        assert_eq!(report.stats.max, 18.0);
        assert_eq!(report.trips.len(), 5);
    }

    #[test]
    fn test_flow_expands_before_grouping() {
        // 2.5 -> 3 trips at 10, 1 trip at 1, 4 trips at 30
        let decisions = vec![decision(1, 2.5, 10.0), decision(2, 1.0, 1.0), decision(3, 4.0, 30.0)];
        let report = analyze_corridor(&decisions, &PlatoonConfig::new(corridor())).unwrap();
        assert_eq!(report.platoons.len(), 2);
        assert_eq!(report.platoons[0].dispersion, 9.0);
        assert_eq!(report.platoons[1].dispersion, 0.0);
        assert_eq!(report.stats.mean, 4.5);
        assert_eq!(report.stats.min, 0.0);
    }

    #[test]
    fn test_empty_corridor_is_precondition_error() {
        let decisions = unit_trips(&[1.0, 2.0, 3.0, 4.0]);
        let config = PlatoonConfig::new(Corridor::new(id(1), id(6)));
        let err = analyze_corridor(&decisions, &config).unwrap_err();
        assert!(matches!(
            err,
            HubRouteError::GroupingPrecondition {
                trips: 0,
                group_size: 4
            }
        ));
    }

    #[test]
    fn test_too_few_trips_is_precondition_error() {
        let decisions = unit_trips(&[1.0, 2.0, 3.0]);
        let err = analyze_corridor(&decisions, &PlatoonConfig::new(corridor())).unwrap_err();
        assert!(matches!(err, HubRouteError::GroupingPrecondition { trips: 3, .. }));
    }

    #[test]
    fn test_schedule_key_requires_schedule() {
        let config =
            PlatoonConfig::new(corridor()).with_grouping_key(GroupingKey::DistancePlusSchedule);
        assert!(matches!(config.validate(), Err(HubRouteError::Config(_))));

        let mut config = PlatoonConfig::new(corridor());
        config.group_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_schedule_grouping_repeats() {
        let decisions = unit_trips(&[0.0, 3.0, 8.0, 0.0, 12.0, 40.0, 41.0, 7.0, 9.0]);
        let config = PlatoonConfig::new(corridor())
            .with_grouping_key(GroupingKey::DistancePlusSchedule)
            .with_schedule(TriangularSchedule::default().with_seed(2024));
        let first = analyze_corridor(&decisions, &config).unwrap();
        let second = analyze_corridor(&decisions, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.platoons.len(), 2);

        // Zero-distance trips sit at key 0 and lead the ordering.
        assert_eq!(first.trips[0].network_distance, 0.0);
        assert_eq!(first.trips[0].schedule_offset, 0.0);
        assert_eq!(first.trips[1].network_distance, 0.0);
        for trip in first.trips.iter().filter(|t| t.network_distance > 0.0) {
            assert!(trip.schedule_offset >= 240.0 && trip.schedule_offset <= 600.0);
        }
    }

    #[test]
    fn test_distance_key_ignores_offsets() {
        let decisions = unit_trips(&[2.0, 5.0, 9.0, 20.0]);
        let config =
            PlatoonConfig::new(corridor()).with_schedule(TriangularSchedule::default().with_seed(3));
        let report = analyze_corridor(&decisions, &config).unwrap();
        assert_eq!(report.stats.mean, 18.0);
        assert!(report.trips.iter().all(|t| t.schedule_offset > 0.0));
    }

    #[test]
    fn test_group_trips_with_custom_size() {
        let trips = expand_trips(&unit_trips(&[4.0, 1.0, 3.0, 2.0, 6.0]), corridor()).unwrap();
        let (platoons, leftover) = group_trips(trips, GroupingKey::NetworkDistance, 2);
        assert_eq!(platoons.len(), 2);
        assert_eq!(platoons[0].dispersion, 1.0);
        assert_eq!(leftover.len(), 1);
        assert_eq!(leftover[0].network_distance, 6.0);
    }
}
