use rustplot::{
    assemble, evaluate, parse, plot, sample, CoordinateMapper, DisplayRange, Domain,
    DrawingPrimitive, EvalError, Phase, PlotConfig, PlotError, Point, Raster, Viewport,
};

fn eval(expression: &str, x: f64) -> f64 {
    evaluate(&parse(expression).unwrap(), x).unwrap()
}

fn polylines(primitives: &[DrawingPrimitive]) -> Vec<Vec<Point>> {
    primitives
        .iter()
        .filter_map(|p| match p {
            DrawingPrimitive::Polyline(points) => Some(points.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_arithmetic_matches_ieee() {
    assert_eq!(eval("2*x+1", 3.0), 7.0);
    assert_eq!(eval("1+2*3", 0.0), 7.0);
    assert_eq!(eval("(1+2)*3", 0.0), 9.0);
    assert_eq!(eval("2^3^2", 0.0), 512.0);
    assert_eq!(eval("x/3 - x*0.1", 2.0), 2.0 / 3.0 - 2.0 * 0.1);
}

#[test]
fn test_unknown_function_is_an_error() {
    let node = parse("foo(x)").unwrap();
    assert_eq!(
        evaluate(&node, 0.0),
        Err(EvalError::UnknownFunction("foo".to_string()))
    );
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse("sin(x").unwrap_err();
    assert_eq!(err.phase(), Phase::Parse);
    assert!(matches!(err, PlotError::Parse(_)));
}

#[test]
fn test_identity_samples() {
    let node = parse("x").unwrap();
    let samples = sample(&node, 0.0, 10.0, 100).unwrap();
    assert_eq!(samples.len(), 100);
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(s.y, Some(s.x));
        assert!((s.x - i as f64 * 0.1).abs() < 1e-12);
    }
}

#[test]
fn test_reciprocal_has_a_gap_at_zero() {
    let viewport = Viewport::new(200, 100);
    let primitives = assemble("1/x", -1.0, 1.0, viewport, &PlotConfig::default()).unwrap();
    let curve = polylines(&primitives);
    assert_eq!(curve.len(), 2);

    // x = 0 maps to column 100; no segment crosses it.
    let left = &curve[0];
    let right = &curve[1];
    assert!(left.iter().all(|p| p.x < 100.0));
    assert!(right.iter().all(|p| p.x > 100.0));
    assert_eq!(left.len() + right.len(), 199);
}

#[test]
fn test_ceiling_clamps_range_and_points() {
    let viewport = Viewport::new(100, 50);
    let config = PlotConfig::default().with_sample_count(Some(11));
    let result = plot("100*x", 0.0, 11.0, viewport, &config).unwrap();
    assert_eq!(result.detected, DisplayRange { y_min: 0.0, y_max: 1000.0 });
    assert_eq!(result.display, DisplayRange { y_min: 0.0, y_max: 10.0 });

    let curve = polylines(&result.primitives);
    assert_eq!(curve.len(), 1);
    assert_eq!(curve[0].len(), 11);
    assert!(curve[0][1..].iter().all(|p| p.y == 0.0));

    let wider = config.with_ceiling(2000.0);
    let result = plot("100*x", 0.0, 11.0, viewport, &wider).unwrap();
    assert_eq!(result.display.y_max, 1000.0);
}

#[test]
fn test_pixel_round_trip() {
    let mapper = CoordinateMapper::new(
        Domain { x_min: -4.0, x_max: 7.5 },
        DisplayRange { y_min: -1.25, y_max: 3.0 },
        Viewport::new(640, 480),
    )
    .unwrap();
    for &(x, y) in &[(-4.0, -1.25), (0.1, 0.2), (7.5, 3.0), (3.3, -0.7)] {
        let (bx, by) = mapper.from_pixel(mapper.to_pixel(x, y));
        assert!((bx - x).abs() < 1e-9);
        assert!((by - y).abs() < 1e-9);
    }
}

#[test]
fn test_constant_function_gets_unit_span() {
    let result = plot("3", -1.0, 1.0, Viewport::new(10, 10), &PlotConfig::default()).unwrap();
    assert_eq!(result.display, DisplayRange { y_min: 3.0, y_max: 4.0 });
    let curve = polylines(&result.primitives);
    assert!(curve[0].iter().all(|p| p.y == 10.0));
}

#[test]
fn test_character_raster() {
    let raster = Raster::from_expression("x", -2.0, 2.0, 8, 4, &PlotConfig::cells()).unwrap();
    let lines = raster.lines();
    assert_eq!(lines.len(), 4);
    // y axis sits at column 4, the curve ends in the top right corner.
    assert_eq!(raster.cell(7, 0), Some("*"));
    assert_eq!(raster.cell(1, 3), Some("*"));
    assert!(lines.iter().all(|line| line.chars().nth(4).map_or(false, |c| c != ' ')));
}

#[test]
fn test_errors_are_reported_by_phase() {
    let viewport = Viewport::new(20, 20);
    let config = PlotConfig::default();
    let phase = |expression: &str| plot(expression, -1.0, 1.0, viewport, &config).unwrap_err().phase();
    assert_eq!(phase("2 ? x"), Phase::Lex);
    assert_eq!(phase("(x"), Phase::Parse);
    assert_eq!(phase("x +"), Phase::Parse);
    assert_eq!(phase("1 2"), Phase::Parse);
    assert_eq!(phase("y"), Phase::Parse);
    assert_eq!(phase("cosh(x)"), Phase::Evaluate);
    assert_eq!(phase("log(x - 5)"), Phase::Range);
}
