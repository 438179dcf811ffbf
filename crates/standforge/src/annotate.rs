//! Dimension lines: measured segment, label anchor, and end ticks.
//!
//! Ticks are perpendicular to the line in the horizontal plane (the line's
//! direction turned 90° about +Y). A vertical line has no horizontal
//! direction; its ticks run along +X.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cfg::DIMENSION_TICK_CM;
use crate::spec::Spec;

const EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLine {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    pub label: String,
    /// Midpoint raised by the requested offset.
    pub label_anchor: Vector3<f64>,
    /// At `start`, then at `end`.
    pub ticks: [Tick; 2],
    pub length: f64,
}

/// Unit tick direction for a segment along `dir`.
fn tick_direction(dir: &Vector3<f64>) -> Vector3<f64> {
    let perp = Vector3::new(-dir.z, 0.0, dir.x);
    let n = perp.norm();
    if n > EPS {
        perp / n
    } else {
        Vector3::x()
    }
}

fn tick_at(p: Vector3<f64>, along: &Vector3<f64>) -> Tick {
    let half = along * (DIMENSION_TICK_CM / 2.0);
    Tick {
        a: p - half,
        b: p + half,
    }
}

pub fn dimension_line(
    start: Vector3<f64>,
    end: Vector3<f64>,
    label: impl Into<String>,
    offset: f64,
) -> DimensionLine {
    let delta = end - start;
    let length = delta.norm();
    let perp = tick_direction(&delta);
    let mid = (start + end) / 2.0;
    DimensionLine {
        start,
        end,
        label: label.into(),
        label_anchor: mid + Vector3::new(0.0, offset, 0.0),
        ticks: [tick_at(start, &perp), tick_at(end, &perp)],
        length,
    }
}

/// Width, depth and height lines along the front-right edges of the stand block.
pub fn stand_dimension_lines(spec: &Spec, offset: f64) -> [DimensionLine; 3] {
    let s = &spec.stand;
    let (hw, hd) = (s.width / 2.0, s.depth / 2.0);
    let front_left = Vector3::new(-hw, 0.0, hd);
    let front_right = Vector3::new(hw, 0.0, hd);
    [
        dimension_line(front_left, front_right, format!("W {} cm", s.width), offset),
        dimension_line(
            front_right,
            Vector3::new(hw, 0.0, -hd),
            format!("D {} cm", s.depth),
            offset,
        ),
        dimension_line(
            front_right,
            Vector3::new(hw, s.height, hd),
            format!("H {} cm", s.height),
            offset,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{generate_spec_from_form_data, FormData};

    fn close(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn horizontal_line_ticks_cross_it() {
        let line = dimension_line(Vector3::zeros(), Vector3::new(10.0, 0.0, 0.0), "ten", 2.0);
        assert_eq!(line.length, 10.0);
        assert!(close(&line.label_anchor, &Vector3::new(5.0, 2.0, 0.0)));
        let [t0, t1] = line.ticks;
        assert!(close(&t0.a, &Vector3::new(0.0, 0.0, -0.5)));
        assert!(close(&t0.b, &Vector3::new(0.0, 0.0, 0.5)));
        assert!(close(&t1.a, &Vector3::new(10.0, 0.0, -0.5)));
    }

    #[test]
    fn vertical_line_falls_back_to_x_ticks() {
        let line = dimension_line(Vector3::zeros(), Vector3::new(0.0, 4.0, 0.0), "up", 0.0);
        let t = line.ticks[1];
        assert!(close(&t.a, &Vector3::new(-0.5, 4.0, 0.0)));
        assert!(close(&t.b, &Vector3::new(0.5, 4.0, 0.0)));
    }

    #[test]
    fn ticks_are_horizontal_and_perpendicular() {
        let start = Vector3::new(1.0, 2.0, 3.0);
        let end = Vector3::new(4.0, 6.0, -1.0);
        let line = dimension_line(start, end, "", 1.0);
        for t in line.ticks {
            let d = t.b - t.a;
            assert!(d.y.abs() < 1e-12);
            assert!((d.norm() - DIMENSION_TICK_CM).abs() < 1e-12);
            let flat = Vector3::new(end.x - start.x, 0.0, end.z - start.z);
            assert!(d.dot(&flat).abs() < 1e-9);
        }
    }

    #[test]
    fn stand_lines_measure_the_block() {
        let spec = generate_spec_from_form_data(&FormData::default());
        let [w, d, h] = stand_dimension_lines(&spec, 3.0);
        assert_eq!((w.length, d.length, h.length), (15.0, 30.0, 30.0));
        assert_eq!(w.label, "W 15 cm");
        assert_eq!(d.label, "D 30 cm");
        assert_eq!(h.label, "H 30 cm");
        assert!(close(&h.label_anchor, &Vector3::new(7.5, 18.0, 15.0)));
    }
}
