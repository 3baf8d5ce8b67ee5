use std::path::PathBuf;

use nalgebra::Point3;

use crate::interfaces::input::{Input, PointsSource};
use crate::interfaces::InputHandle;

#[test]
fn test_interfaces_input_default() {
    let inp = Input::default();
    assert_eq!(inp.evaluation.max_degree, 15);
    assert_eq!(
        inp.points,
        PointsSource::Inline(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ])
    );

    let inp_empty: Input = serde_yaml::from_str("{}").unwrap();
    assert_eq!(inp_empty.evaluation.max_degree, 15);
    assert_eq!(inp_empty.points, inp.points);
}

#[test]
fn test_interfaces_input_inline_points() {
    let yaml = r#"
evaluation:
  max_degree: 4
  write_polynomials: true
points: !Inline
  - [0.5, -1.0, 2.0]
  - [1.0, 1.0, 1.0]
"#;
    let inp: Input = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(inp.evaluation.max_degree, 4);
    assert!(inp.evaluation.write_polynomials);
    assert!(inp.evaluation.write_values);
    let points = inp.points.resolve().unwrap();
    assert_eq!(
        points,
        vec![Point3::new(0.5, -1.0, 2.0), Point3::new(1.0, 1.0, 1.0)]
    );
    inp.handle().unwrap();
}

#[test]
fn test_interfaces_input_points_from_file() {
    let yaml = r#"
evaluation:
  max_degree: 2
points: !FromFile some/points.txt
"#;
    let inp: Input = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        inp.points,
        PointsSource::FromFile(PathBuf::from("some/points.txt"))
    );
    assert!(inp.points.resolve().is_err());
    assert!(inp.handle().is_err());
}

#[test]
fn test_interfaces_input_max_degree_too_large() {
    for lmax in [crate::harmonics::MAX_DEGREE + 1, 4_000_000] {
        let yaml = format!("evaluation:\n  max_degree: {lmax}\n");
        let inp: Input = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(inp.evaluation.max_degree, lmax);
        assert!(inp.handle().is_err());
    }
}

#[test]
fn test_interfaces_input_yaml_roundtrip() {
    let inp = Input::default();
    let yaml = serde_yaml::to_string(&inp).unwrap();
    assert!(yaml.contains("!Inline"));
    let inp_read: Input = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(inp_read.evaluation.max_degree, inp.evaluation.max_degree);
    assert_eq!(inp_read.points, inp.points);
}
