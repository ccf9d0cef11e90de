use nalgebra::DMatrix;

/// Contour levels drawn around an optimum, as fractions of its value.
pub const CONTOUR_FRACTIONS: [f64; 8] = [0.2, 0.4, 0.6, 0.8, 0.9, 0.95, 0.99, 1.05];

pub type Segment = [[f64; 2]; 2];

/// Iso-line segments of one field at one level.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    pub level: f64,
    pub segments: Vec<Segment>,
}

impl ContourSet {
    /// Where to put the level label: midpoint of the longest segment.
    pub fn label_anchor(&self) -> Option<[f64; 2]> {
        let len2 = |s: &Segment| (s[1][0] - s[0][0]).powi(2) + (s[1][1] - s[0][1]).powi(2);
        self.segments
            .iter()
            .max_by(|a, b| len2(a).total_cmp(&len2(b)))
            .map(|s| [(s[0][0] + s[1][0]) / 2.0, (s[0][1] + s[1][1]) / 2.0])
    }
}

/// Absolute levels for `fractions` of `best`.
pub fn contour_levels(best: f64, fractions: &[f64]) -> Vec<f64> {
    fractions.iter().map(|f| f * best).collect()
}

/// Largest finite value of `field`, if any.
pub fn finite_max(field: &DMatrix<f64>) -> Option<f64> {
    field.iter().copied().filter(|v| v.is_finite()).reduce(f64::max)
}

/// `count` levels evenly spaced strictly inside the finite range of `field`.
pub fn even_levels(field: &DMatrix<f64>, count: usize) -> Vec<f64> {
    let finite = || field.iter().copied().filter(|v| v.is_finite());
    let (Some(lo), Some(hi)) = (finite().reduce(f64::min), finite().reduce(f64::max)) else {
        return Vec::new();
    };
    let step = (hi - lo) / (count + 1) as f64;
    (1..=count).map(|k| lo + k as f64 * step).collect()
}

/// Contours of `field` at every level in `levels`.
pub fn contour_sets(xs: &[f64], ys: &[f64], field: &DMatrix<f64>, levels: &[f64]) -> Vec<ContourSet> {
    levels
        .iter()
        .map(|&level| ContourSet {
            level,
            segments: contour_segments(xs, ys, field, level),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Marching squares
// ---------------------------------------------------------------------------
//
// `field[(i, j)]` sits at `(xs[i], ys[j])`. Corners of cell (i, j):
//   c0 = (i, j)  c1 = (i+1, j)  c2 = (i+1, j+1)  c3 = (i, j+1)
// Edges: e0 = c0-c1, e1 = c1-c2, e2 = c2-c3, e3 = c3-c0.

/// Line segments where `field` crosses `level`.
///
/// Cells with any non-finite corner are skipped, so infeasible regions leave
/// gaps instead of spurious lines.
pub fn contour_segments(xs: &[f64], ys: &[f64], field: &DMatrix<f64>, level: f64) -> Vec<Segment> {
    let mut out = Vec::new();
    if field.nrows() != xs.len() || field.ncols() != ys.len() {
        return out;
    }

    for i in 0..xs.len().saturating_sub(1) {
        for j in 0..ys.len().saturating_sub(1) {
            let corners = [
                ([xs[i], ys[j]], field[(i, j)]),
                ([xs[i + 1], ys[j]], field[(i + 1, j)]),
                ([xs[i + 1], ys[j + 1]], field[(i + 1, j + 1)]),
                ([xs[i], ys[j + 1]], field[(i, j + 1)]),
            ];
            if corners.iter().any(|(_, v)| !v.is_finite()) {
                continue;
            }

            let case = corners
                .iter()
                .enumerate()
                .fold(0u8, |acc, (k, (_, v))| if *v >= level { acc | 1 << k } else { acc });

            let edge = |e: usize| {
                let (pa, va) = corners[e];
                let (pb, vb) = corners[(e + 1) % 4];
                let t = (level - va) / (vb - va);
                [pa[0] + t * (pb[0] - pa[0]), pa[1] + t * (pb[1] - pa[1])]
            };
            let centre_high = || corners.iter().map(|(_, v)| v).sum::<f64>() / 4.0 >= level;

            let pairs: &[(usize, usize)] = match case {
                0 | 15 => &[],
                1 | 14 => &[(3, 0)],
                2 | 13 => &[(0, 1)],
                3 | 12 => &[(3, 1)],
                4 | 11 => &[(1, 2)],
                6 | 9 => &[(0, 2)],
                7 | 8 => &[(3, 2)],
                5 if centre_high() => &[(0, 1), (2, 3)],
                5 => &[(3, 0), (1, 2)],
                10 if centre_high() => &[(3, 0), (1, 2)],
                10 => &[(0, 1), (2, 3)],
                _ => &[],
            };
            out.extend(pairs.iter().map(|&(a, b)| [edge(a), edge(b)]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> (Vec<f64>, Vec<f64>, DMatrix<f64>) {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![10.0, 20.0, 30.0];
        let f = DMatrix::from_fn(3, 3, |i, _| xs[i]);
        (xs, ys, f)
    }

    #[test]
    fn ramp_gives_straight_line() {
        let (xs, ys, f) = ramp();
        let segs = contour_segments(&xs, &ys, &f, 0.5);
        assert_eq!(segs.len(), 2);
        for s in &segs {
            assert_relative_eq!(s[0][0], 0.5);
            assert_relative_eq!(s[1][0], 0.5);
        }
    }

    #[test]
    fn level_outside_range_gives_nothing() {
        let (xs, ys, f) = ramp();
        assert!(contour_segments(&xs, &ys, &f, 5.0).is_empty());
        assert!(contour_segments(&xs, &ys, &f, -1.0).is_empty());
    }

    #[test]
    fn nan_corners_are_skipped() {
        let (xs, ys, mut f) = ramp();
        f[(0, 0)] = f64::NAN;
        let segs = contour_segments(&xs, &ys, &f, 0.5);
        // only the upper-left cell still crosses
        assert_eq!(segs.len(), 1);
        assert!(segs[0].iter().all(|p| p[1] >= 20.0));
    }

    #[test]
    fn saddle_gives_two_segments() {
        let xs = vec![0.0, 1.0];
        let ys = vec![0.0, 1.0];
        let f = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(contour_segments(&xs, &ys, &f, 0.5).len(), 2);
    }

    #[test]
    fn shape_mismatch_gives_nothing() {
        let (xs, _, f) = ramp();
        assert!(contour_segments(&xs, &[1.0, 2.0], &f, 0.5).is_empty());
    }

    #[test]
    fn levels_scale_the_optimum() {
        let levels = contour_levels(200.0, &CONTOUR_FRACTIONS);
        assert_eq!(levels.len(), 8);
        assert_relative_eq!(levels[0], 40.0);
        assert_relative_eq!(levels[7], 210.0);
    }

    #[test]
    fn even_levels_ignore_nan() {
        let f = DMatrix::from_row_slice(2, 2, &[f64::NAN, 0.0, 10.0, 5.0]);
        assert_eq!(finite_max(&f), Some(10.0));
        let levels = even_levels(&f, 4);
        assert_eq!(levels.len(), 4);
        assert_relative_eq!(levels[0], 2.0);
        assert_relative_eq!(levels[3], 8.0);
        assert!(even_levels(&DMatrix::from_element(2, 2, f64::NAN), 3).is_empty());
    }

    #[test]
    fn anchor_on_longest_segment() {
        let set = ContourSet {
            level: 1.0,
            segments: vec![[[0.0, 0.0], [0.0, 1.0]], [[1.0, 0.0], [1.0, 4.0]]],
        };
        assert_eq!(set.label_anchor(), Some([1.0, 2.0]));
    }
}
