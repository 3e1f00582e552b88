use crate::calc_engine::{evaluate, Node};
use crate::errors::{PlotError, RangeError};

/// One evaluation of the expression. `y` is `None` where the result was NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Vertical extent of the data, `y_max >= y_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub y_min: f64,
    pub y_max: f64,
}

impl DisplayRange {
    /// Clamps both bounds into `[-ceiling, ceiling]`, then widens a
    /// degenerate range to a unit span above `y_min`.
    pub fn clamp_to(self, ceiling: f64) -> Result<DisplayRange, RangeError> {
        check_ceiling(ceiling)?;
        let clamped = DisplayRange {
            y_min: self.y_min.clamp(-ceiling, ceiling),
            y_max: self.y_max.clamp(-ceiling, ceiling),
        };
        Ok(clamped.widened())
    }

    pub fn widened(self) -> DisplayRange {
        if self.y_max > self.y_min {
            self
        } else {
            DisplayRange {
                y_min: self.y_min,
                y_max: self.y_min + 1.0,
            }
        }
    }

    pub fn span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

fn check_ceiling(ceiling: f64) -> Result<(), RangeError> {
    if ceiling.is_finite() && ceiling > 0.0 {
        Ok(())
    } else {
        Err(RangeError::InvalidCeiling(ceiling))
    }
}

pub fn clamp_value(y: f64, ceiling: f64) -> f64 {
    y.clamp(-ceiling, ceiling)
}

/// Accepts `x_min < x_max` only when the span itself is finite.
pub fn check_domain(x_min: f64, x_max: f64) -> Result<(), RangeError> {
    if x_min < x_max && (x_max - x_min).is_finite() {
        Ok(())
    } else {
        Err(RangeError::InvalidDomain { x_min, x_max })
    }
}

/// Evaluates `node` at `count` evenly spaced points starting at `x_min`.
///
/// The step is `(x_max - x_min) / count` and each x is computed from its
/// index, so the last sample lands one step short of `x_max`.
pub fn sample(
    node: &Node,
    x_min: f64,
    x_max: f64,
    count: usize,
) -> Result<Vec<SamplePoint>, PlotError> {
    check_domain(x_min, x_max)?;
    if count < 2 {
        return Err(RangeError::TooFewSamples(count).into());
    }

    let step = (x_max - x_min) / count as f64;
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let x = x_min + i as f64 * step;
        let y = evaluate(node, x)?;
        samples.push(SamplePoint {
            x,
            y: y.is_finite().then_some(y),
        });
    }
    Ok(samples)
}

/// Min and max over the defined samples, before any clamping.
pub fn estimate_range(samples: &[SamplePoint]) -> Result<DisplayRange, RangeError> {
    let mut defined = samples.iter().filter_map(|s| s.y);
    let first = defined.next().ok_or(RangeError::NoValidSamples)?;

    let (y_min, y_max) = defined.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Ok(DisplayRange { y_min, y_max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::parse;

    #[test]
    fn identity_is_evenly_spaced() {
        let samples = sample(&Node::Variable, 0.0, 10.0, 100).unwrap();
        assert_eq!(samples.len(), 100);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.x, i as f64 * 0.1);
            assert_eq!(s.y, Some(s.x));
        }
        for pair in samples.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!((pair[1].x - pair[0].x - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_bad_requests() {
        let node = Node::Variable;
        assert_eq!(
            sample(&node, 1.0, 1.0, 10),
            Err(PlotError::Range(RangeError::InvalidDomain { x_min: 1.0, x_max: 1.0 }))
        );
        assert!(matches!(
            sample(&node, 5.0, -5.0, 10),
            Err(PlotError::Range(RangeError::InvalidDomain { .. }))
        ));
        assert!(matches!(
            sample(&node, f64::NAN, 1.0, 10),
            Err(PlotError::Range(RangeError::InvalidDomain { .. }))
        ));
        assert_eq!(
            sample(&node, 0.0, 1.0, 1),
            Err(PlotError::Range(RangeError::TooFewSamples(1)))
        );
    }

    #[test]
    fn span_must_be_finite() {
        let node = Node::Variable;
        assert_eq!(
            sample(&node, -1e308, 1e308, 4),
            Err(PlotError::Range(RangeError::InvalidDomain { x_min: -1e308, x_max: 1e308 }))
        );
        assert!(check_domain(f64::MIN, 0.0).is_ok());
        assert!(check_domain(f64::MIN, f64::MAX).is_err());

        let samples = sample(&node, -1e19, 1e19, 4).unwrap();
        let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
        assert_eq!(xs, [-1e19, -5e18, 0.0, 5e18]);
    }

    #[test]
    fn unknown_function_aborts_sampling() {
        let node = parse("2 * foo(x)").unwrap();
        assert!(matches!(sample(&node, 0.0, 1.0, 10), Err(PlotError::Evaluate(_))));
    }

    #[test]
    fn non_finite_values_are_undefined() {
        let node = parse("1/x").unwrap();
        let samples = sample(&node, -1.0, 1.0, 4).unwrap();
        let ys: Vec<_> = samples.iter().map(|s| s.y).collect();
        assert_eq!(ys, [Some(-1.0), Some(-2.0), None, Some(2.0)]);

        let range = estimate_range(&samples).unwrap();
        assert_eq!(range, DisplayRange { y_min: -2.0, y_max: 2.0 });
    }

    #[test]
    fn no_valid_samples() {
        let node = parse("log(x)").unwrap();
        let samples = sample(&node, -3.0, -1.0, 8).unwrap();
        assert_eq!(estimate_range(&samples), Err(RangeError::NoValidSamples));
        assert_eq!(estimate_range(&[]), Err(RangeError::NoValidSamples));
    }

    #[test]
    fn clamping() {
        let raw = DisplayRange { y_min: -3.0, y_max: 1000.0 };
        assert_eq!(raw.clamp_to(10.0).unwrap(), DisplayRange { y_min: -3.0, y_max: 10.0 });

        // Entirely above the ceiling: collapses onto it, then widens.
        let raw = DisplayRange { y_min: 20.0, y_max: 30.0 };
        assert_eq!(raw.clamp_to(10.0).unwrap(), DisplayRange { y_min: 10.0, y_max: 11.0 });

        let flat = DisplayRange { y_min: 3.0, y_max: 3.0 };
        assert_eq!(flat.clamp_to(10.0).unwrap(), DisplayRange { y_min: 3.0, y_max: 4.0 });

        assert_eq!(clamp_value(1000.0, 10.0), 10.0);
        assert_eq!(clamp_value(-1000.0, 10.0), -10.0);
        assert_eq!(clamp_value(2.5, 10.0), 2.5);

        assert_eq!(raw.clamp_to(0.0), Err(RangeError::InvalidCeiling(0.0)));
        assert!(raw.clamp_to(f64::INFINITY).is_err());
    }
}
