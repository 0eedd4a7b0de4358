//! Load matrices from disk, solve, and write every result table

use hubroute_algo::{
    analyze_corridor, corridor_table, empty_mileage, solve_hub_location, HubModelConfig,
    MilpSolverConfig, PlatoonConfig,
};
use hubroute_core::{location_ids, HubRouteError, LocationId, LocationMatrix};
use hubroute_io::{
    load_network, read_location_matrix, write_corridor_table, write_empty_mileage,
    write_location_matrix, write_route_decisions, NetworkPaths,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const X: [f64; 6] = [0.0, 1.0, 2.0, 8.0, 9.0, 10.0];

fn write_inputs(dir: &Path) -> NetworkPaths {
    let ids = location_ids(1..=6);
    let x = |l: LocationId| X[l.value() - 1];
    let costs = LocationMatrix::from_fn("cost", ids.clone(), |i, j| (x(i) - x(j)).abs()).unwrap();
    let flows =
        LocationMatrix::from_fn("flow", ids.clone(), |i, j| if i == j { 0.0 } else { 1.5 }).unwrap();
    let distances =
        LocationMatrix::from_fn("hub_distance", ids, |i, k| (x(i) - x(k)).abs() * 2.0).unwrap();

    let paths = NetworkPaths {
        costs: dir.join("cost.csv"),
        flows: dir.join("flow.csv"),
        inter_hub_costs: None,
        hub_distances: Some(dir.join("hub_distance.csv")),
    };
    write_location_matrix(&paths.costs, &costs).unwrap();
    write_location_matrix(&paths.flows, &flows).unwrap();
    write_location_matrix(paths.hub_distances.as_ref().unwrap(), &distances).unwrap();
    paths
}

#[test]
fn matrix_file_round_trip_keeps_missing_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.csv");
    let ids = location_ids([4, 2]);
    let matrix = LocationMatrix::from_rows(
        "cost",
        ids,
        vec![vec![Some(0.0), None], vec![Some(3.25), Some(0.0)]],
    )
    .unwrap();
    write_location_matrix(&path, &matrix).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], ",4,2");
    assert_eq!(lines[1], "4,0,");
    assert_eq!(read_location_matrix(&path, "cost").unwrap(), matrix);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_location_matrix(&dir.path().join("absent.csv"), "cost").unwrap_err();
    assert!(matches!(err, HubRouteError::Io(_)));
}

#[test]
fn solve_from_disk_and_write_tables() {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path());
    let network = load_network(&paths).unwrap();
    assert_eq!(network.num_locations(), 6);

    let config = HubModelConfig::new(location_ids([2, 5]), 2, 0.5);
    let mut solution = solve_hub_location(&network, &config, &MilpSolverConfig::default()).unwrap();
    solution
        .enrich_with_distances(network.hub_distances().unwrap())
        .unwrap();

    let decisions_path = dir.path().join("decisions.csv");
    write_route_decisions(&decisions_path, &solution).unwrap();
    let mut rdr = csv::Reader::from_path(&decisions_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "origin");
    assert_eq!(&headers[2], "mode");
    assert_eq!(rdr.records().count(), 36);

    let (busiest, _) = solution.corridor_flows()[0];
    let report = analyze_corridor(&solution.decisions, &PlatoonConfig::new(busiest)).unwrap();
    let rows = corridor_table(&solution.decisions, &report).unwrap();
    let table_path = dir.path().join("corridor.csv");
    write_corridor_table(&table_path, &rows).unwrap();

    let mut rdr = csv::Reader::from_path(&table_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.len(), 8);
    assert_eq!(&headers[7], "mean_dispersion");
    let records: Vec<_> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), rows.len());
    for record in &records {
        let mean: f64 = record[7].parse().unwrap();
        assert!((mean - report.stats.mean).abs() < 1e-9);
        // 1.5 units of flow -> 2 trips
        assert_eq!(&record[4], "2");
    }

    let mileage = empty_mileage(&solution.decisions, None).unwrap();
    let mileage_path = dir.path().join("mileage.csv");
    write_empty_mileage(&mileage_path, &mileage).unwrap();
    let mut rdr = csv::Reader::from_path(&mileage_path).unwrap();
    let records: Vec<_> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), mileage.rows.len());
    let total: f64 = records[0][7].parse().unwrap();
    assert!((total - mileage.total).abs() < 1e-9);
}
