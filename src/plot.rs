use crate::calc_engine::parse;
use crate::config::PlotConfig;
use crate::errors::PlotError;
use crate::mapper::{CoordinateMapper, Domain, Point, Viewport};
use crate::sampler::{clamp_value, estimate_range, sample, DisplayRange, SamplePoint};

/// Renderer-agnostic drawing instruction in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingPrimitive {
    Line(Point, Point),
    Polyline(Vec<Point>),
    Text(Point, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub primitives: Vec<DrawingPrimitive>,
    /// Range of the defined samples before clamping.
    pub detected: DisplayRange,
    /// Range the mapper used.
    pub display: DisplayRange,
}

/// Parses `expression` once, samples it across `[x_min, x_max]` and lays out
/// axes, ticks, labels and the curve for `viewport`.
pub fn plot(
    expression: &str,
    x_min: f64,
    x_max: f64,
    viewport: Viewport,
    config: &PlotConfig,
) -> Result<Plot, PlotError> {
    config.validate()?;
    let node = parse(expression)?;

    let samples = sample(&node, x_min, x_max, config.samples_for(viewport.width))?;
    let detected = estimate_range(&samples)?;
    let display = detected.clamp_to(config.display_y_ceiling)?;
    let mapper = CoordinateMapper::new(Domain { x_min, x_max }, display, viewport)?;

    let mut primitives = Vec::new();
    let width = viewport.width as f64;
    let height = viewport.height as f64;
    let row = mapper.x_axis_row();
    let column = mapper.y_axis_column();

    primitives.push(DrawingPrimitive::Line(Point::new(0.0, row), Point::new(width, row)));
    primitives.push(DrawingPrimitive::Line(
        Point::new(column, 0.0),
        Point::new(column, height),
    ));

    let half = config.tick_half_length;
    let (dx, dy) = config.x_label_offset;
    for tick in mapper.x_ticks(config.max_ticks) {
        primitives.push(DrawingPrimitive::Line(
            Point::new(tick.pixel, row - half),
            Point::new(tick.pixel, row + half),
        ));
        primitives.push(DrawingPrimitive::Text(
            Point::new(tick.pixel + dx, row + dy),
            tick.value.to_string(),
        ));
    }

    let (dx, dy) = config.y_label_offset;
    for tick in mapper.y_ticks(config.max_ticks) {
        primitives.push(DrawingPrimitive::Line(
            Point::new(column - half, tick.pixel),
            Point::new(column + half, tick.pixel),
        ));
        primitives.push(DrawingPrimitive::Text(
            Point::new(column + dx, tick.pixel + dy),
            tick.value.to_string(),
        ));
    }

    primitives.extend(
        curve_segments(&samples, &mapper, config.display_y_ceiling)
            .into_iter()
            .map(DrawingPrimitive::Polyline),
    );

    Ok(Plot {
        primitives,
        detected,
        display,
    })
}

pub fn assemble(
    expression: &str,
    x_min: f64,
    x_max: f64,
    viewport: Viewport,
    config: &PlotConfig,
) -> Result<Vec<DrawingPrimitive>, PlotError> {
    plot(expression, x_min, x_max, viewport, config).map(|p| p.primitives)
}

/// Splits the defined samples into runs; an undefined sample ends a run.
fn curve_segments(
    samples: &[SamplePoint],
    mapper: &CoordinateMapper,
    ceiling: f64,
) -> Vec<Vec<Point>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for s in samples {
        match s.y {
            Some(y) => current.push(mapper.to_pixel(s.x, clamp_value(y, ceiling))),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
