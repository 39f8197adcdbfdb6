//! End-to-end dissociation curves driven by the YAML files in `example/`.

use basis::error::HfError;
use clap::Parser;
use scf::app::{load_config, summarize, ScfApplication};
use scf::config::{Args, Config};
use scf::io::write_curve;
use std::path::PathBuf;

/// Helper function to get the path to example files
fn example_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(filename)
}

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["dissociation"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

fn app_from_example(filename: &str, extra: &[&str]) -> ScfApplication {
    let config = load_config(&example_path(filename)).unwrap();
    ScfApplication::new(args(extra), config)
}

fn app_from_yaml(yaml: &str, extra: &[&str]) -> ScfApplication {
    let config = serde_yml::from_str::<Config>(yaml).unwrap().with_defaults();
    ScfApplication::new(args(extra), config)
}

#[test]
fn test_h2_sto3g_full_sweep() {
    let points = app_from_example("h2_dissociation.yaml", &[]).compute_curve().unwrap();

    assert_eq!(points.len(), 57);
    assert_eq!(points[0].distance, 0.4);
    assert_eq!(points[56].distance, 6.0);
    assert!(points.iter().all(|p| p.converged && p.iterations <= 20));
    assert!(
        points.windows(2).all(|w| w[0].nuclear > w[1].nuclear),
        "nuclear repulsion decreases along the sweep"
    );

    let eq = points.iter().find(|p| p.distance == 1.4).unwrap();
    assert!((eq.electronic - (-1.8310000394614838)).abs() < 1e-6);
    assert!((eq.total - (-1.1167143251757694)).abs() < 1e-6);

    let far = &points[56];
    assert!((far.nuclear - 1.0 / 6.0).abs() < 1e-12);
    assert!((far.total - (-0.645076750348197)).abs() < 1e-6);
    assert!(far.total > eq.total + 0.4);

    let short = &points[0];
    assert!((short.total - 0.03177404772491599).abs() < 1e-6);

    let summary = summarize(&points).unwrap();
    assert!(
        summary.minimum.distance >= 1.3 && summary.minimum.distance <= 1.4,
        "minimum at {}",
        summary.minimum.distance
    );
    assert_eq!(summary.non_converged, 0);
}

#[test]
fn test_heh_cation_curve() {
    let points = app_from_example("heh_cation.yaml", &[]).compute_curve().unwrap();
    assert_eq!(points.len(), 4);

    let eq = &points[1];
    assert_eq!(eq.distance, 1.4632);
    assert!(eq.converged);
    assert!((eq.electronic - (-4.2087036373164555)).abs() < 1e-6);
    assert!((eq.total - (-2.8418364968025136)).abs() < 1e-6);
}

#[test]
fn test_h2_split_valence_from_nwchem_file() {
    let points = app_from_example("h2_631g.yaml", &[]).compute_curve().unwrap();
    assert_eq!(points.len(), 1);
    assert!(points[0].converged);
    assert!(
        (points[0].total - (-1.1267427028295542)).abs() < 1e-5,
        "total {}",
        points[0].total
    );
}

#[test]
fn test_single_cycle_override_is_not_fatal() {
    let app = app_from_example("h2_dissociation.yaml", &["--max-cycle", "1", "--distance", "1.4"]);
    let points = app.compute_curve().unwrap();

    assert_eq!(points.len(), 1);
    assert!(!points[0].converged);
    assert_eq!(points[0].iterations, 1);
    assert!((points[0].electronic - (-2.5055941252163807)).abs() < 1e-6);

    let summary = summarize(&points).unwrap();
    assert_eq!(summary.non_converged, 1);
}

#[test]
fn test_explicit_primitives_match_builtin() {
    let yaml = "
atoms:
  - element: H
    primitives:
      - [3.425250914, 0.1543289673]
      - [0.6239137298, 0.5353281423]
      - [0.1688554040, 0.4446345422]
  - element: H
sweep:
  distances: [1.4]
";
    let points = app_from_yaml(yaml, &[]).compute_curve().unwrap();
    assert!((points[0].total - (-1.1167143251757694)).abs() < 1e-6);
}

#[test]
fn test_curve_table_has_one_row_per_point() {
    let yaml = "
atoms: [{element: H}, {element: H}]
sweep: {start: 1.0, stop: 2.0, step: 0.5}
";
    let points = app_from_yaml(yaml, &[]).compute_curve().unwrap();
    let mut buffer = Vec::new();
    write_curve(&mut buffer, &points).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].trim_start().starts_with("1.000"));
    assert!(rows[2].trim_start().starts_with("2.000"));
}

#[test]
fn test_invalid_systems_are_errors() {
    // neutral HeH is open-shell
    let odd = app_from_yaml("atoms: [{element: He}, {element: H}]\nsweep: {distances: [1.4]}", &[]);
    assert!(odd.compute_curve().is_err());

    // three occupied orbitals do not fit in two basis functions
    let crowded = app_from_yaml(
        "atoms: [{element: H}, {element: H}]\noccupied_orbitals: 3\nsweep: {distances: [1.4]}",
        &[],
    );
    let err = crowded.compute_curve().unwrap_err();
    assert!(format!("{:?}", err).contains("1.400"), "error names the distance: {:?}", err);

    let bad_threshold = app_from_yaml(
        "atoms: [{element: H}, {element: H}]\nsweep: {distances: [1.4]}",
        &["--convergence-threshold", "0"],
    );
    assert!(bad_threshold.compute_curve().is_err());

    let missing = load_config(&example_path("does_not_exist.yaml"));
    assert!(missing.is_err());
}

#[test]
fn test_near_coincident_nuclei_rejected_before_integrals() {
    let app = app_from_example("h2_dissociation.yaml", &["--distance", "1e-9"]);
    let err = app.compute_curve().unwrap_err();
    let precondition = err
        .chain()
        .filter_map(|e| e.downcast_ref::<HfError>())
        .any(|e| matches!(e, HfError::PreconditionViolation(_)));
    assert!(precondition, "expected a precondition violation, got {:?}", err);
}
