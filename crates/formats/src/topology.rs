use foundation::ids::GeoId;
use serde_json::Value;

/// One decoded boundary: a multipolygon in document coordinates.
///
/// `polygons[p][r]` is ring `r` of polygon `p`; ring 0 is the outer ring.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: Option<GeoId>,
    pub polygons: Vec<Vec<Vec<[f64; 2]>>>,
}

impl BoundaryFeature {
    /// Iterates every vertex of every ring.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.polygons
            .iter()
            .flat_map(|poly| poly.iter())
            .flat_map(|ring| ring.iter().copied())
    }
}

/// Boundary features in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryCollection {
    pub features: Vec<BoundaryFeature>,
}

#[derive(Debug)]
pub enum TopologyError {
    Parse(String),
    NotATopology,
    MissingObject(String),
    InvalidArc { index: usize, reason: String },
    InvalidGeometry { index: usize, reason: String },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::Parse(reason) => write!(f, "JSON parse error: {reason}"),
            TopologyError::NotATopology => write!(f, "expected a TopoJSON Topology"),
            TopologyError::MissingObject(name) => {
                write!(f, "topology has no object named {name:?}")
            }
            TopologyError::InvalidArc { index, reason } => {
                write!(f, "invalid arc at index {index}: {reason}")
            }
            TopologyError::InvalidGeometry { index, reason } => {
                write!(f, "invalid geometry at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Decodes one named geometry collection of a TopoJSON document into
/// boundary features.
///
/// Supports the subset region atlases use: an optional quantization
/// transform, delta-encoded arcs, and Polygon/MultiPolygon geometries
/// referencing arcs by index (a negative index `i` means arc `!i`
/// reversed).
pub fn decode_boundaries(
    payload: &str,
    object_name: &str,
) -> Result<BoundaryCollection, TopologyError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| TopologyError::Parse(e.to_string()))?;
    decode_boundaries_value(&value, object_name)
}

pub fn decode_boundaries_value(
    value: &Value,
    object_name: &str,
) -> Result<BoundaryCollection, TopologyError> {
    let root = value.as_object().ok_or(TopologyError::NotATopology)?;
    let ty = root
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(TopologyError::NotATopology)?;
    if ty != "Topology" {
        return Err(TopologyError::NotATopology);
    }

    let transform = parse_transform(root.get("transform"))?;
    let arcs = decode_arcs(root.get("arcs"), transform.as_ref())?;

    let object = root
        .get("objects")
        .and_then(|v| v.as_object())
        .and_then(|objs| objs.get(object_name))
        .and_then(|v| v.as_object())
        .ok_or_else(|| TopologyError::MissingObject(object_name.to_string()))?;

    let geometries = object
        .get("geometries")
        .and_then(|v| v.as_array())
        .ok_or_else(|| TopologyError::MissingObject(object_name.to_string()))?;

    let mut features = Vec::with_capacity(geometries.len());
    for (index, geom_val) in geometries.iter().enumerate() {
        let geom = geom_val
            .as_object()
            .ok_or_else(|| TopologyError::InvalidGeometry {
                index,
                reason: "geometry must be an object".to_string(),
            })?;

        let id = match geom.get("id") {
            Some(Value::String(s)) => GeoId::parse(s),
            Some(Value::Number(n)) => n.as_u64().map(|v| GeoId::new(v as u32)),
            _ => None,
        };

        let geom_type =
            geom.get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| TopologyError::InvalidGeometry {
                    index,
                    reason: "geometry missing type".to_string(),
                })?;

        let arc_lists = geom.get("arcs").ok_or_else(|| TopologyError::InvalidGeometry {
            index,
            reason: "geometry missing arcs".to_string(),
        })?;

        let polygons = match geom_type {
            "Polygon" => vec![
                parse_rings(arc_lists, &arcs)
                    .map_err(|reason| TopologyError::InvalidGeometry { index, reason })?,
            ],
            "MultiPolygon" => {
                let polys = arc_lists
                    .as_array()
                    .ok_or_else(|| TopologyError::InvalidGeometry {
                        index,
                        reason: "MultiPolygon arcs must be an array".to_string(),
                    })?;
                let mut out = Vec::with_capacity(polys.len());
                for poly in polys {
                    out.push(
                        parse_rings(poly, &arcs)
                            .map_err(|reason| TopologyError::InvalidGeometry { index, reason })?,
                    );
                }
                out
            }
            other => {
                return Err(TopologyError::InvalidGeometry {
                    index,
                    reason: format!("unsupported geometry type: {other}"),
                });
            }
        };

        features.push(BoundaryFeature { id, polygons });
    }

    Ok(BoundaryCollection { features })
}

struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

fn parse_transform(value: Option<&Value>) -> Result<Option<Transform>, TopologyError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let obj = value.as_object().ok_or(TopologyError::NotATopology)?;
    let pair = |key: &str| -> Option<[f64; 2]> {
        let arr = obj.get(key)?.as_array()?;
        Some([arr.first()?.as_f64()?, arr.get(1)?.as_f64()?])
    };
    let scale = pair("scale").ok_or(TopologyError::NotATopology)?;
    let translate = pair("translate").ok_or(TopologyError::NotATopology)?;
    Ok(Some(Transform { scale, translate }))
}

/// Decodes the arc table. With a transform, arc points are quantized deltas;
/// without one, they are absolute positions.
fn decode_arcs(
    value: Option<&Value>,
    transform: Option<&Transform>,
) -> Result<Vec<Vec<[f64; 2]>>, TopologyError> {
    let arcs = value
        .and_then(|v| v.as_array())
        .ok_or(TopologyError::NotATopology)?;

    let mut out = Vec::with_capacity(arcs.len());
    for (index, arc_val) in arcs.iter().enumerate() {
        let points = arc_val
            .as_array()
            .ok_or_else(|| TopologyError::InvalidArc {
                index,
                reason: "arc must be an array of positions".to_string(),
            })?;

        let mut decoded = Vec::with_capacity(points.len());
        let mut acc = [0.0f64, 0.0f64];
        for point_val in points {
            let pair = point_val
                .as_array()
                .filter(|a| a.len() >= 2)
                .and_then(|a| Some([a[0].as_f64()?, a[1].as_f64()?]))
                .ok_or_else(|| TopologyError::InvalidArc {
                    index,
                    reason: "arc position must be [x, y]".to_string(),
                })?;

            match transform {
                Some(t) => {
                    acc[0] += pair[0];
                    acc[1] += pair[1];
                    decoded.push([
                        acc[0] * t.scale[0] + t.translate[0],
                        acc[1] * t.scale[1] + t.translate[1],
                    ]);
                }
                None => decoded.push(pair),
            }
        }
        out.push(decoded);
    }
    Ok(out)
}

fn parse_rings(value: &Value, arcs: &[Vec<[f64; 2]>]) -> Result<Vec<Vec<[f64; 2]>>, String> {
    let rings = value
        .as_array()
        .ok_or("Polygon arcs must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let indices = ring
            .as_array()
            .ok_or("ring must be an array of arc indices".to_string())?;
        out.push(stitch_ring(indices, arcs)?);
    }
    Ok(out)
}

/// Concatenates referenced arcs into one closed ring.
///
/// Adjacent arcs share their junction vertex; the duplicate is dropped when
/// appending.
fn stitch_ring(indices: &[Value], arcs: &[Vec<[f64; 2]>]) -> Result<Vec<[f64; 2]>, String> {
    let mut ring: Vec<[f64; 2]> = Vec::new();
    for index_val in indices {
        let raw = index_val
            .as_i64()
            .ok_or("arc index must be an integer".to_string())?;
        let (arc_index, reversed) = if raw < 0 {
            ((-1 - raw) as usize, true)
        } else {
            (raw as usize, false)
        };
        let arc = arcs
            .get(arc_index)
            .ok_or_else(|| format!("arc index {raw} out of range"))?;

        let skip_junction = usize::from(!ring.is_empty());
        if reversed {
            ring.extend(arc.iter().rev().skip(skip_junction));
        } else {
            ring.extend(arc.iter().skip(skip_junction));
        }
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::{BoundaryCollection, TopologyError, decode_boundaries};
    use foundation::ids::GeoId;
    use pretty_assertions::assert_eq;

    /// Two quadrilaterals sharing one vertical edge (arc 0), quantized with
    /// a 0.5 scale. Mirrors the layout region topologies use.
    const SHARED_EDGE_DOC: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [0.5, 0.5], "translate": [10.0, 20.0]},
        "objects": {
            "regions": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "06", "arcs": [[0, 1]]},
                    {"type": "Polygon", "id": 32, "arcs": [[-1, 2]]}
                ]
            }
        },
        "arcs": [
            [[2, 0], [0, 2]],
            [[2, 2], [-2, 0], [0, -2], [2, 0]],
            [[2, 0], [2, 0], [0, 2], [-2, 0]]
        ]
    }"#;

    fn decode(doc: &str) -> BoundaryCollection {
        decode_boundaries(doc, "regions").expect("decode topology")
    }

    #[test]
    fn dequantizes_with_transform() {
        let got = decode(SHARED_EDGE_DOC);
        // Arc 0 deltas (2,0),(0,2) accumulate to (2,0),(2,2), then scale by
        // 0.5 and translate by (10,20).
        let first_ring = &got.features[0].polygons[0][0];
        assert_eq!(first_ring[0], [11.0, 20.0]);
        assert_eq!(first_ring[1], [11.0, 21.0]);
    }

    #[test]
    fn stitches_shared_arc_without_duplicate_junctions() {
        let got = decode(SHARED_EDGE_DOC);
        let ring = &got.features[0].polygons[0][0];
        // Two arcs of 2 and 4 points share one junction vertex.
        assert_eq!(ring.len(), 5);
        for window in ring.windows(2) {
            assert_ne!(window[0], window[1], "adjacent duplicate in {ring:?}");
        }
    }

    #[test]
    fn negative_index_walks_the_shared_arc_backwards() {
        let got = decode(SHARED_EDGE_DOC);
        let left = &got.features[0].polygons[0][0];
        let right = &got.features[1].polygons[0][0];
        // The shared edge appears in both rings with opposite orientation.
        assert_eq!(left[0], right[1]);
        assert_eq!(left[1], right[0]);
    }

    #[test]
    fn feature_ids_parse_from_strings_and_numbers() {
        let got = decode(SHARED_EDGE_DOC);
        assert_eq!(got.features[0].id, Some(GeoId::new(6)));
        assert_eq!(got.features[1].id, Some(GeoId::new(32)));
    }

    #[test]
    fn absolute_arcs_without_transform() {
        let doc = r#"{
            "type": "Topology",
            "objects": {
                "regions": {
                    "type": "GeometryCollection",
                    "geometries": [{"type": "Polygon", "arcs": [[0]]}]
                }
            },
            "arcs": [[[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 0.0]]]
        }"#;
        let got = decode(doc);
        assert_eq!(got.features[0].id, None);
        assert_eq!(
            got.features[0].polygons[0][0],
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn multi_polygon_decodes_each_part() {
        let doc = r#"{
            "type": "Topology",
            "objects": {
                "regions": {
                    "type": "GeometryCollection",
                    "geometries": [{
                        "type": "MultiPolygon",
                        "id": "15",
                        "arcs": [[[0]], [[1]]]
                    }]
                }
            },
            "arcs": [
                [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]],
                [[5.0, 5.0], [6.0, 5.0], [5.0, 6.0], [5.0, 5.0]]
            ]
        }"#;
        let got = decode(doc);
        assert_eq!(got.features[0].polygons.len(), 2);
    }

    #[test]
    fn rejects_non_topology_documents() {
        let err = decode_boundaries(r#"{"type": "FeatureCollection"}"#, "regions").unwrap_err();
        assert!(matches!(err, TopologyError::NotATopology));
    }

    #[test]
    fn reports_missing_objects_by_name() {
        let doc = r#"{"type": "Topology", "objects": {}, "arcs": []}"#;
        let err = decode_boundaries(doc, "regions").unwrap_err();
        assert!(matches!(err, TopologyError::MissingObject(name) if name == "regions"));
    }

    #[test]
    fn reports_out_of_range_arc_indices() {
        let doc = r#"{
            "type": "Topology",
            "objects": {
                "regions": {
                    "type": "GeometryCollection",
                    "geometries": [{"type": "Polygon", "arcs": [[7]]}]
                }
            },
            "arcs": []
        }"#;
        let err = decode_boundaries(doc, "regions").unwrap_err();
        assert!(matches!(err, TopologyError::InvalidGeometry { index: 0, .. }));
    }
}
