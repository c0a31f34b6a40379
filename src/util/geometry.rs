//! Free functions over planes, bounds and matrices.
#[allow(unused_imports)]
use crate::core::prelude::*;

/// Fits a plane to the vertices of a polygon.
///
/// Triangles go through [`Plane::from_points`]. Larger polygons use Newell's method, which
/// tolerates slightly non-planar input; the plane's distance is averaged over every vertex.
/// Returns `None` for fewer than three vertices or a degenerate polygon.
pub fn try_create_plane_from_polygon(vertices: &[Vec3]) -> Option<Plane> {
    match vertices.len() {
        0..=2 => None,
        3 => {
            let plane = Plane::from_points(vertices[0], vertices[1], vertices[2]);
            (plane.normal.len_squared() > 0.0).then_some(plane)
        }
        _ => {
            let normal = vertices
                .iter()
                .circular_tuple_windows()
                .map(|(cur, next)| {
                    Vec3::new(
                        (cur.y - next.y) * (cur.z + next.z),
                        (cur.z - next.z) * (cur.x + next.x),
                        (cur.x - next.x) * (cur.y + next.y),
                    )
                })
                .sum::<Vec3>()
                .normed();
            if normal.len_squared() <= 0.0 {
                return None;
            }
            let distance =
                vertices.iter().map(|v| -normal.dot(*v)).sum::<f32>() / vertices.len() as f32;
            Some(Plane { normal, distance })
        }
    }
}

/// Extracts the six clip planes of a world-to-clip matrix, in the order left, right, bottom,
/// top, near, far. Normals point into the frustum.
pub fn calculate_frustum_planes(world_to_clip: &Mat4x4) -> [Plane; 6] {
    let row3 = world_to_clip.row(3);
    let plane_from = |v: Vec4| {
        let normal = v.xyz();
        let len = normal.len();
        if len <= 0.0 {
            warn!("degenerate frustum plane: {v}");
            return Plane::default();
        }
        Plane {
            normal: normal / len,
            distance: v.w / len,
        }
    };
    let (row0, row1, row2) = (
        world_to_clip.row(0),
        world_to_clip.row(1),
        world_to_clip.row(2),
    );
    [
        plane_from(row3 + row0),
        plane_from(row3 - row0),
        plane_from(row3 + row1),
        plane_from(row3 - row1),
        plane_from(row3 + row2),
        plane_from(row3 - row2),
    ]
}

/// Returns false if the box lies entirely on the negative side of any plane. Conservative:
/// a box near a frustum corner can pass without touching the frustum.
pub fn test_planes_aabb(planes: &[Plane], bounds: &Bounds) -> bool {
    let centre = bounds.centre();
    let extents = bounds.extents();
    planes.iter().all(|plane| {
        let radius = extents.dot(plane.normal.abs());
        plane.distance_to_point(centre) + radius >= 0.0
    })
}

/// The axis-aligned bounds of `points` after transformation by `transform`. Empty input gives
/// zero-size bounds at the transformed origin.
pub fn calculate_bounds(points: &[Vec3], transform: &Mat4x4) -> Bounds {
    let mut transformed = points.iter().map(|p| transform.multiply_point3x4(*p));
    let Some(first) = transformed.next() else {
        return Bounds::new(transform.position(), Vec3::zero());
    };
    let mut bounds = Bounds::new(first, Vec3::zero());
    for p in transformed {
        bounds.encapsulate_point(p);
    }
    bounds
}
