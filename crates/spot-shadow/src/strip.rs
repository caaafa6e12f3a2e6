//! Triangle-strip generation from a shadow field.
//!
//! Layout (one continuous strip)
//! - Bands from the outermost inward. Band `l` (between layers `l+1` and `l`)
//!   walks every ray `i` emitting `(i, l+1), (i, l)`, then repeats ray 0 to close
//!   the ring. The next band starts on that last vertex, which only adds
//!   degenerate triangles at the seam.
//! - The umbra interior is a zig-zag over the layer-0 ring: rays
//!   `0, n-1, 1, n-2, …`, all at layer-0 opacity.
//! - Length: `2 · layers · (rays + 1) + rays` (see `strip_len`).

use crate::field::ShadowField;
use crate::geom::Point2;

/// Mesh vertex with scalar opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaVertex {
    pub position: Point2,
    pub alpha: f64,
}

impl AlphaVertex {
    #[inline]
    pub fn new(position: Point2, alpha: f64) -> Self {
        Self { position, alpha }
    }
}

/// Triangle strip returned to the host. Empty means "nothing to draw".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    pub vertices: Vec<AlphaVertex>,
}

impl VertexBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Strip triangles with at least one repeated vertex removed.
    pub fn triangles(&self) -> impl Iterator<Item = [AlphaVertex; 3]> + '_ {
        self.vertices
            .windows(3)
            .map(|w| [w[0], w[1], w[2]])
            .filter(|[a, b, c]| {
                a.position != b.position && b.position != c.position && a.position != c.position
            })
    }

    /// Interleaved `[x, y, alpha]` per vertex, narrowed for GPU upload.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x as f32, v.position.y as f32, v.alpha as f32])
            .collect()
    }
}

/// Number of vertices `generate_triangle_strip` emits for a non-empty field.
#[inline]
pub fn strip_len(rays: usize, layers: usize) -> usize {
    2 * layers * (rays + 1) + rays
}

/// Ray visited at step `k` of the umbra zig-zag.
#[inline]
fn zigzag(k: usize, rays: usize) -> usize {
    let i = k / 2;
    if k % 2 == 1 {
        rays - i - 1
    } else {
        i
    }
}

/// Walk the field and emit the strip. An empty field gives an empty buffer.
pub fn generate_triangle_strip(field: &ShadowField) -> VertexBuffer {
    if field.is_empty() {
        return VertexBuffer::default();
    }
    let (rays, layers) = (field.rays(), field.layers());
    let cell = |ray: usize, layer: usize| {
        AlphaVertex::new(field.position(ray, layer), field.alpha(ray, layer))
    };
    let mut vertices = Vec::with_capacity(strip_len(rays, layers));
    for l in (0..layers).rev() {
        for i in (0..rays).chain(std::iter::once(0)) {
            vertices.push(cell(i, l + 1));
            vertices.push(cell(i, l));
        }
    }
    vertices.extend((0..rays).map(|k| cell(zigzag(k, rays), 0)));
    debug_assert_eq!(vertices.len(), strip_len(rays, layers));
    VertexBuffer { vertices }
}
