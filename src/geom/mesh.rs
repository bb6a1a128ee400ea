#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl GeomMesh {
    /// Create a new mesh with positions and a triangle-list index buffer.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions.iter().any(|p| {
            !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite()
        })
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Checks index structure. Non-finite vertices are reported but allowed,
    /// since formulas may legitimately evaluate to NaN or infinity.
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self.has_invalid_vertices() {
            log::debug!("mesh has invalid vertex coordinates (NaN/Inf)");
        }
        Ok(())
    }

    /// Triangles as index triples.
    #[must_use]
    pub fn faces(&self) -> Vec<[u32; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_bounds_indices() {
        let mesh = GeomMesh::new(vec![[0.0; 3]; 3], vec![0, 1, 3]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_allows_non_finite_vertices() {
        let mesh = GeomMesh::new(
            vec![[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        assert!(mesh.has_invalid_vertices());
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.faces(), vec![[0, 1, 2]]);
    }
}
