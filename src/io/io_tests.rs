use std::io::Cursor;

use nalgebra::Point3;

use crate::io::parse_points;

#[test]
fn test_io_parse_points() {
    let text = "# x y z\n0 0 0\n\n  1.0   -2.5 3e-1\n";
    let points = parse_points(Cursor::new(text)).unwrap();
    assert_eq!(
        points,
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, -2.5, 0.3)]
    );

    assert!(parse_points(Cursor::new("")).unwrap().is_empty());
}

#[test]
fn test_io_parse_points_malformed() {
    let err = parse_points(Cursor::new("0 0 0\n1 2\n")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Line 2: expected three coordinates, but found 2."
    );

    let err = parse_points(Cursor::new("1 two 3\n")).unwrap_err();
    assert!(err.to_string().starts_with("Line 1: `two` is not a number"));
}
