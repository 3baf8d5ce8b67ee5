use approx::assert_relative_eq;
use nalgebra::Point3;

use crate::drivers::solid_harmonic_evaluation::{
    SolidHarmonicEvaluationDriver, SolidHarmonicEvaluationParams, SolidHarmonicEvaluationResult,
};
use crate::drivers::SolidHarmonicsDriver;
use crate::io::{read_solharm_binary, SolHarmFileType};

#[test]
fn test_drivers_solid_harmonic_evaluation_params_default() {
    let params = SolidHarmonicEvaluationParams::default();
    assert_eq!(params.max_degree, 15);
    assert!(!params.write_polynomials);
    assert!(params.write_values);
    assert!(params.result_save_name.is_none());

    let params_str = params.to_string();
    assert!(params_str.contains("Maximum degree: 15 (256 harmonics over 816 monomials)"));
    assert!(params_str.contains("Save evaluation results to file: no"));
}

#[test]
fn test_drivers_solid_harmonic_evaluation_params_yaml_defaults() {
    let params: SolidHarmonicEvaluationParams =
        serde_yaml::from_str("write_polynomials: true").unwrap();
    assert_eq!(params.max_degree, 15);
    assert!(params.write_polynomials);
    assert!(params.write_values);
}

#[test]
fn test_drivers_solid_harmonic_evaluation_degree_one() {
    let _ = env_logger::builder().is_test(true).try_init();
    let params = SolidHarmonicEvaluationParams::builder()
        .max_degree(1)
        .write_polynomials(true)
        .build()
        .unwrap();
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let mut she_driver = SolidHarmonicEvaluationDriver::builder()
        .parameters(&params)
        .points(&points)
        .build()
        .unwrap();
    assert!(she_driver.result().is_err());
    she_driver.run().unwrap();
    let she_res = she_driver.result().unwrap();

    assert_eq!(she_res.values.dim(), (3, 4));
    assert_eq!(she_res.points, points);
    let expected = [
        [1.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0, 1.0],
    ];
    for (n, row) in expected.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            assert_relative_eq!(she_res.values[(n, col)], *value);
        }
    }
    assert_eq!(she_res.value(1, 1, 0), Some(1.0));
    assert_eq!(she_res.value(2, 1, 1), Some(1.0));
    assert_eq!(she_res.value(2, 2, 0), None);
    assert_eq!(she_res.value(3, 0, 0), None);
    assert_eq!(she_res.value(0, 1, 2), None);
}

#[test]
fn test_drivers_solid_harmonic_evaluation_addition_theorem() {
    let params = SolidHarmonicEvaluationParams::builder()
        .max_degree(6)
        .write_values(false)
        .build()
        .unwrap();
    let points = vec![Point3::new(0.3, -1.2, 0.7), Point3::new(-0.5, 0.25, 1.5)];
    let mut she_driver = SolidHarmonicEvaluationDriver::builder()
        .parameters(&params)
        .points(&points)
        .build()
        .unwrap();
    she_driver.run().unwrap();
    let she_res = she_driver.result().unwrap();

    for (n, point) in points.iter().enumerate() {
        let r2 = point.coords.norm_squared();
        for l in 0..=6u32 {
            let li32 = l as i32;
            let sum: f64 = (-li32..=li32)
                .map(|m| she_res.value(n, l, m).unwrap().powi(2))
                .sum();
            assert_relative_eq!(sum, r2.powi(li32), max_relative = 1e-12);
        }
    }
}

#[test]
fn test_drivers_solid_harmonic_evaluation_no_points() {
    let params = SolidHarmonicEvaluationParams::builder()
        .max_degree(2)
        .build()
        .unwrap();
    let points: Vec<Point3<f64>> = vec![];
    let mut she_driver = SolidHarmonicEvaluationDriver::builder()
        .parameters(&params)
        .points(&points)
        .build()
        .unwrap();
    she_driver.run().unwrap();
    let she_res = she_driver.result().unwrap();
    assert_eq!(she_res.values.dim(), (0, 9));
    assert!(she_res
        .to_string()
        .starts_with("Evaluated 9 solid harmonics at 0 points."));
}

#[test]
fn test_drivers_solid_harmonic_evaluation_too_large() {
    let points = vec![Point3::new(1.0, 1.0, 1.0)];
    for lmax in [crate::harmonics::MAX_DEGREE + 1, 4_000_000, u32::MAX] {
        let params = SolidHarmonicEvaluationParams::builder()
            .max_degree(lmax)
            .build()
            .unwrap();
        assert!(params
            .to_string()
            .starts_with(&format!("Maximum degree: {lmax} (")));
        let mut she_driver = SolidHarmonicEvaluationDriver::builder()
            .parameters(&params)
            .points(&points)
            .build()
            .unwrap();
        let err = she_driver.run().unwrap_err();
        assert!(err.to_string().contains("exceeds the supported bound"));
        assert!(she_driver.result().is_err());
    }
}

#[test]
fn test_drivers_solid_harmonic_evaluation_result_display() {
    let params = SolidHarmonicEvaluationParams::builder()
        .max_degree(2)
        .build()
        .unwrap();
    let points = vec![Point3::new(1.0, 2.0, 3.0)];
    let mut she_driver = SolidHarmonicEvaluationDriver::builder()
        .parameters(&params)
        .points(&points)
        .build()
        .unwrap();
    she_driver.run().unwrap();
    let res_str = she_driver.result().unwrap().to_string();
    assert!(res_str.starts_with("Evaluated 9 solid harmonics at 1 point."));
    for label in ["S", "P-1", "P0", "P+1", "D-2", "D0", "D+2"] {
        assert!(res_str.contains(label), "Label `{label}` missing.");
    }
}

#[test]
fn test_drivers_solid_harmonic_evaluation_save() {
    let name = std::env::temp_dir().join(format!(
        "solharm_driver_save_test_{}",
        std::process::id()
    ));
    let params = SolidHarmonicEvaluationParams::builder()
        .max_degree(3)
        .result_save_name(Some(name.to_string_lossy().to_string()))
        .build()
        .unwrap();
    let points = vec![Point3::new(0.5, -0.5, 2.0), Point3::new(1.0, 1.0, 1.0)];
    let mut she_driver = SolidHarmonicEvaluationDriver::builder()
        .parameters(&params)
        .points(&points)
        .build()
        .unwrap();
    she_driver.run().unwrap();
    let she_res = she_driver.result().unwrap();

    let read_res: SolidHarmonicEvaluationResult =
        read_solharm_binary(&name, SolHarmFileType::Val).unwrap();
    assert_eq!(read_res.points, she_res.points);
    assert_eq!(read_res.values, she_res.values);
    assert_eq!(read_res.parameters.max_degree, 3);

    let mut path = name.clone();
    path.set_extension(SolHarmFileType::Val.ext());
    std::fs::remove_file(path).unwrap();
}
