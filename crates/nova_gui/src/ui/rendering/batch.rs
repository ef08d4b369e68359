//! # Geometry Batch
//!
//! Accumulates the indexed geometry drawn with one texture during a frame.
//!
//! Each `add` receives indices that refer to the vertices passed in the same
//! call. They are rebased by the number of vertices already in the batch so that
//! after concatenation every stored index still addresses its own vertex.

use super::vertex::VERTEX_STRIDE;
use crate::error::DrawError;

/// Index and vertex data for one texture within one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBatch {
    /// Rebased indices into `vertices`
    indices: Vec<u32>,
    /// Flattened x,y,z,u,v scalars
    vertices: Vec<f32>,
}

impl GeometryBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a draw call's geometry
    ///
    /// `indices` address the vertices in `vertices` (5 scalars each). They are
    /// offset by the batch's current vertex count before being stored. Invalid
    /// input is rejected and leaves the batch untouched. Returns the batch so
    /// calls can be chained.
    pub fn add(&mut self, indices: &[u32], vertices: &[f32]) -> Result<&mut Self, DrawError> {
        let call_vertices = validate(indices, vertices)?;
        if indices.is_empty() && vertices.is_empty() {
            return Ok(self);
        }

        let base = self.vertex_count();
        if u32::try_from(base + call_vertices).is_err() {
            return Err(DrawError::IndexOverflow {
                vertex_count: base + call_vertices,
            });
        }
        let base = base as u32;

        self.indices.reserve(indices.len());
        self.indices.extend(indices.iter().map(|&index| index + base));
        self.vertices.extend_from_slice(vertices);

        Ok(self)
    }

    /// Rebased indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Flattened vertex scalars
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Number of indices
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of whole vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Whether nothing has been added
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.vertices.is_empty()
    }
}

/// Check one draw call and return its vertex count
fn validate(indices: &[u32], vertices: &[f32]) -> Result<usize, DrawError> {
    if vertices.len() % VERTEX_STRIDE != 0 {
        return Err(DrawError::PartialVertex {
            len: vertices.len(),
            stride: VERTEX_STRIDE,
        });
    }

    let vertex_count = vertices.len() / VERTEX_STRIDE;
    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertex_count)
    {
        return Err(DrawError::IndexOutOfRange {
            index,
            position,
            vertex_count,
        });
    }

    Ok(vertex_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices(offset: f32) -> Vec<f32> {
        let mut vertices = Vec::new();
        for corner in 0..4 {
            let c = corner as f32;
            vertices.extend_from_slice(&[offset + c, offset - c, 0.0, c / 4.0, 1.0 - c / 4.0]);
        }
        vertices
    }

    #[test]
    fn test_first_add_keeps_indices() {
        let mut batch = GeometryBatch::new();
        batch.add(&[0, 1, 2, 2, 1, 3], &quad_vertices(0.0)).unwrap();

        assert_eq!(batch.indices(), &[0, 1, 2, 2, 1, 3]);
        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.vertices().len(), 20);
    }

    #[test]
    fn test_second_add_is_rebased() {
        let mut batch = GeometryBatch::new();
        batch
            .add(&[0, 1, 2, 2, 1, 3], &quad_vertices(0.0))
            .unwrap()
            .add(&[0, 1, 2, 2, 1, 3], &quad_vertices(10.0))
            .unwrap();

        assert_eq!(batch.indices(), &[0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
        assert_eq!(batch.vertex_count(), 8);
        assert_eq!(&batch.vertices()[20..25], &quad_vertices(10.0)[0..5]);
    }

    #[test]
    fn test_no_dangling_indices_after_many_adds() {
        let mut batch = GeometryBatch::new();
        let calls: [(&[u32], usize); 5] = [
            (&[0, 1, 2], 3),
            (&[], 2),
            (&[1, 0], 2),
            (&[0, 0, 0, 3], 4),
            (&[0], 1),
        ];

        for (indices, vertex_count) in calls {
            let vertices = vec![0.5; vertex_count * VERTEX_STRIDE];
            batch.add(indices, &vertices).unwrap();
            let vertex_count = batch.vertex_count() as u32;
            assert!(batch.indices().iter().all(|&i| i < vertex_count));
        }

        assert_eq!(batch.vertex_count(), 12);
        assert_eq!(batch.indices(), &[0, 1, 2, 6, 5, 7, 7, 7, 10, 11]);
    }

    #[test]
    fn test_empty_add_is_noop() {
        let mut batch = GeometryBatch::new();
        batch.add(&[], &[]).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_partial_vertex_rejected() {
        let mut batch = GeometryBatch::new();
        let err = batch.add(&[0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, DrawError::PartialVertex { len: 3, stride: 5 });
        assert!(batch.is_empty());
    }

    #[test]
    fn test_out_of_range_index_rejected_without_mutation() {
        let mut batch = GeometryBatch::new();
        batch.add(&[0, 1, 2, 2, 1, 3], &quad_vertices(0.0)).unwrap();
        let before = batch.clone();

        // Index 4 would be valid after rebasing but not within its own call
        let err = batch.add(&[0, 4], &quad_vertices(1.0)).unwrap_err();
        assert_eq!(
            err,
            DrawError::IndexOutOfRange { index: 4, position: 1, vertex_count: 4 }
        );
        assert_eq!(batch, before);
    }
}
