//! Contains the loaded model data.

use ultraviolet::Vec3;

/// Flattened result of a successful load.
///
/// `positions` and `normals` hold xyz triples; `face_indices` holds three
/// 0-based position indices per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    positions: Box<[f32]>,
    normals: Box<[f32]>,
    face_indices: Box<[u32]>,
}

impl Model {
    pub(crate) fn new(positions: Vec<f32>, normals: Vec<f32>, face_indices: Vec<u32>) -> Model {
        Model {
            positions: positions.into_boxed_slice(),
            normals: normals.into_boxed_slice(),
            face_indices: face_indices.into_boxed_slice(),
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn face_indices(&self) -> &[u32] {
        &self.face_indices
    }

    /// Number of positions (not floats).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of normals (not floats).
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.face_indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.normals.is_empty() && self.face_indices.is_empty()
    }

    /// Returns the position at given 0-based index.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        take_triple(&self.positions, index)
    }

    /// Returns the normal at given 0-based index.
    pub fn normal(&self, index: usize) -> Option<Vec3> {
        take_triple(&self.normals, index)
    }

    /// Iterates over the corner positions of each triangle.
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles(self, 0)
    }

    /// Splits into flattened positions, normals and face indices.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        (
            self.positions.into_vec(),
            self.normals.into_vec(),
            self.face_indices.into_vec(),
        )
    }
}

fn take_triple(values: &[f32], index: usize) -> Option<Vec3> {
    let start = index.checked_mul(3)?;
    let end = start.checked_add(3)?;
    match values.get(start..end)? {
        &[x, y, z] => Some(Vec3::new(x, y, z)),
        _ => None,
    }
}

/// The iterator adaptor for `Model::triangles`.
/// Corners referencing undefined positions are `None`.
#[derive(Debug)]
pub struct Triangles<'a>(&'a Model, usize);

impl<'a> Iterator for Triangles<'a> {
    type Item = [Option<Vec3>; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let face = self.0.face_indices.get(self.1 * 3..self.1 * 3 + 3)?;
        let result = [
            self.0.position(face[0] as usize),
            self.0.position(face[1] as usize),
            self.0.position(face[2] as usize),
        ];
        self.1 += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.triangle_count().saturating_sub(self.1);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Model {
        Model::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn counts() {
        let model = quad();
        assert_eq!(model.vertex_count(), 4);
        assert_eq!(model.normal_count(), 1);
        assert_eq!(model.triangle_count(), 2);
        assert!(!model.is_empty());
        assert!(Model::default().is_empty());
    }

    #[test]
    fn lookup_by_index() {
        let model = quad();
        assert_eq!(model.position(2), Some(Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(model.position(4), None);
        assert_eq!(model.normal(0), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(model.normal(1), None);
    }

    #[test]
    fn lookup_past_addressable_range() {
        let model = quad();
        assert_eq!(model.position(usize::MAX / 3), None);
        assert_eq!(model.position(usize::MAX), None);
        assert_eq!(model.normal(usize::MAX / 3), None);
        assert_eq!(model.normal(usize::MAX), None);
    }

    #[test]
    fn triangles_resolve_corners() {
        let model = quad();
        let triangles: Vec<_> = model.triangles().collect();

        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1][2], Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn triangles_mark_dangling_corners() {
        let model = Model::new(vec![0.0; 3], vec![], vec![0, 0, 5]);
        let triangle = model.triangles().next().unwrap();

        assert_eq!(triangle[0], Some(Vec3::zero()));
        assert_eq!(triangle[2], None);
    }
}
