//! Stable time-step estimation from mesh geometry.

use crate::Error;

/// A mesh element: ordered node coordinates, local wave speed, and volume.
pub struct Element {
    pub nodes: Vec<[f32; 3]>,
    pub speed: f32,
    pub volume: f32,
}

/// Read-only mesh geometry consumed by the estimator.
pub struct Mesh {
    /// Polynomial order of the discretization. One of 1, 3, or 5.
    pub order: u32,
    pub elements: Vec<Element>,
}

fn half_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    f32::sqrt(dx * dx + dy * dy + dz * dz) / 2.0
}

/// Estimates the largest time step for which the scheme stays stable on
/// `mesh`.
///
/// The node offsets per order select the reference-element nodes that act
/// as axis-aligned half-extent proxies; they are a node-ordering convention
/// of the reference element, kept as a plain lookup table.
///
/// Every element is subject to two independent checks: the local radii only
/// refine the minimum when the element is smaller in volume than the first
/// element, while the wave-speed maximum is updated unconditionally.
pub fn stable_time_step(mesh: &Mesh) -> Result<f32, Error> {
    let (nx, ny, nz) = match mesh.order {
        1 => (1, 2, 4),
        3 => (3, 12, 48),
        5 => (5, 30, 180),
        order => return Err(Error::UnsupportedOrder(order)),
    };

    let first = mesh.elements.first().ok_or(Error::EmptyMesh)?;
    for (index, element) in mesh.elements.iter().enumerate() {
        if element.nodes.len() <= nz {
            return Err(Error::BadElement {
                index,
                node_count: element.nodes.len(),
                required: nz + 1,
            });
        }
    }

    let mut h = half_distance(first.nodes[0], first.nodes[nx]);
    let mut v_max = first.speed;
    let reference_volume = first.volume;

    for element in &mesh.elements {
        if element.volume < reference_volume {
            let radii = [
                half_distance(element.nodes[0], element.nodes[nx]),
                half_distance(element.nodes[0], element.nodes[ny]),
                half_distance(element.nodes[0], element.nodes[nz]),
            ];
            for radius in radii {
                if radius < h {
                    h = radius;
                }
            }
        }

        if element.speed > v_max {
            v_max = element.speed;
        }
    }

    if v_max <= 0.0 {
        return Err(Error::NonPositiveParameter {
            name: "max wave speed",
            value: v_max,
        });
    }

    Ok(h / (v_max * mesh.order as f32))
}
