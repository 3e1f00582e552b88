use crate::errors::MapError;
use crate::sampler::DisplayRange;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

/// Pixel position; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An integer data value and where it lands on its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: i64,
    pub pixel: f64,
}

/// Linear map from data space to pixel space.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    domain: Domain,
    range: DisplayRange,
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    pub fn new(
        domain: Domain,
        range: DisplayRange,
        viewport: Viewport,
    ) -> Result<Self, MapError> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(MapError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        check_span('x', domain.x_min, domain.x_max)?;
        check_span('y', range.y_min, range.y_max)?;

        Ok(CoordinateMapper {
            domain,
            range,
            width: viewport.width as f64,
            height: viewport.height as f64,
        })
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.column(x),
            y: self.row(y),
        }
    }

    pub fn from_pixel(&self, point: Point) -> (f64, f64) {
        let x = self.domain.x_min + point.x / self.width * self.x_span();
        let y = self.range.y_min + (self.height - point.y) / self.height * self.range.span();
        (x, y)
    }

    fn x_span(&self) -> f64 {
        self.domain.x_max - self.domain.x_min
    }

    fn column(&self, x: f64) -> f64 {
        (x - self.domain.x_min) / self.x_span() * self.width
    }

    fn row(&self, y: f64) -> f64 {
        self.height - (y - self.range.y_min) / self.range.span() * self.height
    }

    /// Row of the line `y = 0`, extrapolated when 0 is out of range.
    pub fn x_axis_row(&self) -> f64 {
        self.row(0.0)
    }

    /// Column of the line `x = 0`, extrapolated when 0 is out of the domain.
    pub fn y_axis_column(&self) -> f64 {
        self.column(0.0)
    }

    pub fn x_ticks(&self, max_ticks: usize) -> Vec<Tick> {
        integer_ticks(self.domain.x_min, self.domain.x_max, max_ticks)
            .into_iter()
            .map(|value| Tick {
                value,
                pixel: self.column(value as f64),
            })
            .collect()
    }

    pub fn y_ticks(&self, max_ticks: usize) -> Vec<Tick> {
        integer_ticks(self.range.y_min, self.range.y_max, max_ticks)
            .into_iter()
            .map(|value| Tick {
                value,
                pixel: self.row(value as f64),
            })
            .collect()
    }
}

fn check_span(axis: char, min: f64, max: f64) -> Result<(), MapError> {
    if max > min && (max - min).is_finite() {
        Ok(())
    } else {
        Err(MapError::Degenerate { axis, min, max })
    }
}

/// Integers in `[ceil(min), floor(max)]`, thinned to multiples of a stride
/// when there would be more than `max_ticks` of them. Bounds beyond the
/// `i64` range saturate, so ticks never leave it.
fn integer_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<i64> {
    // `as` saturates; the arithmetic below runs in i128 so it cannot overflow.
    let first = min.ceil() as i64 as i128;
    let last = max.floor() as i64 as i128;
    if last < first || max_ticks == 0 {
        return Vec::new();
    }

    let count = last - first + 1;
    let max_ticks = max_ticks as i128;
    let stride = (count + max_ticks - 1) / max_ticks;

    let start = first.div_euclid(stride) * stride;
    let mut value = if start < first { start + stride } else { start };
    let mut ticks = Vec::new();
    while value <= last {
        ticks.push(value as i64);
        value += stride;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> CoordinateMapper {
        CoordinateMapper::new(
            Domain { x_min, x_max },
            DisplayRange { y_min, y_max },
            Viewport::new(400, 200),
        )
        .unwrap()
    }

    #[test]
    fn corners() {
        let m = mapper(-10.0, 10.0, -5.0, 5.0);
        assert_eq!(m.to_pixel(-10.0, -5.0), Point::new(0.0, 200.0));
        assert_eq!(m.to_pixel(10.0, 5.0), Point::new(400.0, 0.0));
        assert_eq!(m.to_pixel(0.0, 0.0), Point::new(200.0, 100.0));
    }

    #[test]
    fn round_trip() {
        let m = mapper(-3.7, 12.1, -2.25, 9.5);
        for &(x, y) in &[(-3.7, -2.25), (0.0, 0.0), (1.234, 5.678), (12.0, 9.4), (7.5, -1.0)] {
            let (bx, by) = m.from_pixel(m.to_pixel(x, y));
            assert!((bx - x).abs() < 1e-9, "x: {} vs {}", bx, x);
            assert!((by - y).abs() < 1e-9, "y: {} vs {}", by, y);
        }
    }

    #[test]
    fn axes_are_extrapolated() {
        let m = mapper(2.0, 6.0, 1.0, 3.0);
        assert_eq!(m.y_axis_column(), -200.0);
        assert_eq!(m.x_axis_row(), 300.0);
    }

    #[test]
    fn ticks_cover_integers_in_bounds() {
        let m = mapper(-2.5, 3.2, 0.5, 4.0);
        let xs: Vec<i64> = m.x_ticks(100).iter().map(|t| t.value).collect();
        assert_eq!(xs, [-2, -1, 0, 1, 2, 3]);
        let ys: Vec<i64> = m.y_ticks(100).iter().map(|t| t.value).collect();
        assert_eq!(ys, [1, 2, 3, 4]);

        let zero = m.x_ticks(100)[2];
        assert_eq!(zero.pixel, m.y_axis_column());
        let four = m.y_ticks(100)[3];
        assert_eq!(four.pixel, 0.0);
    }

    #[test]
    fn no_ticks_between_integers() {
        let m = mapper(0.1, 0.9, 0.2, 0.8);
        assert!(m.x_ticks(100).is_empty());
        assert!(m.y_ticks(100).is_empty());
    }

    #[test]
    fn wide_domains_are_thinned() {
        assert_eq!(integer_ticks(-10.0, 10.0, 5), [-10, -5, 0, 5, 10]);
        let ticks = integer_ticks(-1e6, 1e6, 100);
        assert!(ticks.len() <= 101);
        assert!(ticks.contains(&0));
        assert_eq!(integer_ticks(-3.0, 3.0, 0), Vec::<i64>::new());
    }

    #[test]
    fn ticks_near_the_i64_limits() {
        let ticks = integer_ticks(-1e19, 1e19, 100);
        assert!(!ticks.is_empty() && ticks.len() <= 101);
        assert!(ticks.contains(&0));
        assert!(ticks.windows(2).all(|w| w[1] > w[0]));

        assert_eq!(integer_ticks(-1e19, 1e19, 1), [0]);
        assert_eq!(integer_ticks(-1e308, 1e308, 2).len(), 2);
        let high = integer_ticks(9e18, 1e19, 100);
        assert!(!high.is_empty());
        assert!(high.iter().all(|&t| t >= 9_000_000_000_000_000_000));

        let m = CoordinateMapper::new(
            Domain { x_min: -1e19, x_max: 1e19 },
            DisplayRange { y_min: -1.0, y_max: 1.0 },
            Viewport::new(80, 24),
        )
        .unwrap();
        let zero = m.x_ticks(100).into_iter().find(|t| t.value == 0).unwrap();
        assert_eq!(zero.pixel, 40.0);
    }

    #[test]
    fn rejects_overflowing_spans() {
        let range = DisplayRange { y_min: 0.0, y_max: 1.0 };
        let wide = Domain { x_min: -1e308, x_max: 1e308 };
        assert_eq!(
            CoordinateMapper::new(wide, range, Viewport::new(10, 10)).unwrap_err(),
            MapError::Degenerate { axis: 'x', min: -1e308, max: 1e308 }
        );
        let domain = Domain { x_min: 0.0, x_max: 1.0 };
        let tall = DisplayRange { y_min: -f64::MAX, y_max: f64::MAX };
        assert!(CoordinateMapper::new(domain, tall, Viewport::new(10, 10)).is_err());
    }

    #[test]
    fn rejects_unusable_inputs() {
        let domain = Domain { x_min: 0.0, x_max: 1.0 };
        let range = DisplayRange { y_min: 0.0, y_max: 1.0 };
        assert_eq!(
            CoordinateMapper::new(domain, range, Viewport::new(0, 10)).unwrap_err(),
            MapError::EmptyViewport { width: 0, height: 10 }
        );
        let flat = DisplayRange { y_min: 2.0, y_max: 2.0 };
        assert_eq!(
            CoordinateMapper::new(domain, flat, Viewport::new(10, 10)).unwrap_err(),
            MapError::Degenerate { axis: 'y', min: 2.0, max: 2.0 }
        );
    }
}
