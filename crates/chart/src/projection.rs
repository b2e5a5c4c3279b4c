use formats::topology::{BoundaryCollection, BoundaryFeature};
use std::fmt::Write;

/// Uniform-scale fit of document coordinates into a viewport.
///
/// Region atlases ship pre-projected planar coordinates (y grows downward),
/// so `fit_planar` is the usual constructor; `fit_geographic` handles raw
/// lon/lat by inverting the y axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitProjection {
    scale: f64,
    min: [f64; 2],
    offset: [f64; 2],
    flip_y: bool,
    max_y: f64,
}

impl FitProjection {
    pub fn fit_planar(collection: &BoundaryCollection, width: f64, height: f64) -> Option<Self> {
        Self::fit(collection, width, height, false)
    }

    pub fn fit_geographic(
        collection: &BoundaryCollection,
        width: f64,
        height: f64,
    ) -> Option<Self> {
        Self::fit(collection, width, height, true)
    }

    fn fit(
        collection: &BoundaryCollection,
        width: f64,
        height: f64,
        flip_y: bool,
    ) -> Option<Self> {
        let mut bounds: Option<([f64; 2], [f64; 2])> = None;
        for feature in &collection.features {
            for [x, y] in feature.points() {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => ([x, y], [x, y]),
                    Some((min, max)) => (
                        [min[0].min(x), min[1].min(y)],
                        [max[0].max(x), max[1].max(y)],
                    ),
                });
            }
        }
        let (min, max) = bounds?;

        let span_x = max[0] - min[0];
        let span_y = max[1] - min[1];
        let scale_x = if span_x > 0.0 { width / span_x } else { f64::INFINITY };
        let scale_y = if span_y > 0.0 { height / span_y } else { f64::INFINITY };
        let scale = match scale_x.min(scale_y) {
            s if s.is_finite() => s,
            // Degenerate content (a single point) centers unscaled.
            _ => 1.0,
        };

        let offset = [
            (width - span_x * scale) / 2.0,
            (height - span_y * scale) / 2.0,
        ];
        Some(Self {
            scale,
            min,
            offset,
            flip_y,
            max_y: max[1],
        })
    }

    pub fn project(&self, point: [f64; 2]) -> (f64, f64) {
        let x = (point[0] - self.min[0]) * self.scale + self.offset[0];
        let y = if self.flip_y {
            (self.max_y - point[1]) * self.scale + self.offset[1]
        } else {
            (point[1] - self.min[1]) * self.scale + self.offset[1]
        };
        (x, y)
    }
}

/// SVG path data for a boundary feature: one closed subpath per ring.
pub fn path_data(feature: &BoundaryFeature, projection: &FitProjection) -> String {
    let mut d = String::new();
    for polygon in &feature.polygons {
        for ring in polygon {
            for (i, &point) in ring.iter().enumerate() {
                let (x, y) = projection.project(point);
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{x:.2},{y:.2}");
            }
            if !ring.is_empty() {
                d.push('Z');
            }
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::{FitProjection, path_data};
    use formats::topology::{BoundaryCollection, BoundaryFeature};
    use pretty_assertions::assert_eq;

    fn rect_feature() -> BoundaryFeature {
        BoundaryFeature {
            id: None,
            polygons: vec![vec![vec![
                [0.0, 0.0],
                [10.0, 0.0],
                [10.0, 5.0],
                [0.0, 5.0],
                [0.0, 0.0],
            ]]],
        }
    }

    fn collection() -> BoundaryCollection {
        BoundaryCollection {
            features: vec![rect_feature()],
        }
    }

    #[test]
    fn planar_fit_preserves_aspect_and_centers() {
        // 10x5 content into 100x100: scale 10, centered vertically.
        let proj = FitProjection::fit_planar(&collection(), 100.0, 100.0).unwrap();
        assert_eq!(proj.project([0.0, 0.0]), (0.0, 25.0));
        assert_eq!(proj.project([10.0, 5.0]), (100.0, 75.0));
    }

    #[test]
    fn geographic_fit_inverts_y() {
        let proj = FitProjection::fit_geographic(&collection(), 100.0, 100.0).unwrap();
        // The top of the content (max y) maps to the top of the viewport.
        assert_eq!(proj.project([0.0, 5.0]), (0.0, 25.0));
        assert_eq!(proj.project([0.0, 0.0]), (0.0, 75.0));
    }

    #[test]
    fn empty_collection_has_no_fit() {
        let empty = BoundaryCollection::default();
        assert!(FitProjection::fit_planar(&empty, 100.0, 100.0).is_none());
    }

    #[test]
    fn path_data_opens_and_closes_each_ring() {
        let proj = FitProjection::fit_planar(&collection(), 100.0, 100.0).unwrap();
        let d = path_data(&rect_feature(), &proj);
        assert!(d.starts_with("M0.00,25.00"));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('L').count(), 4);
    }
}
