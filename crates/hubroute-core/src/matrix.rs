//! Square matrices addressed by location id
//!
//! Cost, flow, inter-hub cost and hub distance tables all share this shape:
//! an ordered list of location ids labels both rows and columns, and each
//! cell is either a value or missing. Missing cells are never replaced by a
//! default; reading one through [`LocationMatrix::try_get`] is a
//! data-integrity error.

use crate::{HubRouteError, HubRouteResult, LocationId};
use std::collections::HashMap;

/// Dense square matrix over an ordered set of locations.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatrix {
    name: String,
    ids: Vec<LocationId>,
    index: HashMap<LocationId, usize>,
    values: Vec<Option<f64>>,
}

impl LocationMatrix {
    /// Create an empty matrix (every cell missing).
    pub fn new(name: impl Into<String>, ids: Vec<LocationId>) -> HubRouteResult<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(ids.len());
        for (pos, id) in ids.iter().enumerate() {
            if index.insert(*id, pos).is_some() {
                return Err(HubRouteError::data(
                    name,
                    format!("duplicate location id {}", id),
                ));
            }
        }
        let n = ids.len();
        Ok(Self {
            name,
            ids,
            index,
            values: vec![None; n * n],
        })
    }

    /// Build from row-major data; every row must have exactly `ids.len()` cells.
    pub fn from_rows(
        name: impl Into<String>,
        ids: Vec<LocationId>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> HubRouteResult<Self> {
        let mut matrix = Self::new(name, ids)?;
        let n = matrix.ids.len();
        if rows.len() != n {
            return Err(HubRouteError::data(
                &matrix.name,
                format!("expected {} rows, found {}", n, rows.len()),
            ));
        }
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(HubRouteError::data(
                    &matrix.name,
                    format!(
                        "row {} has {} columns, expected {} (matrix must be square)",
                        matrix.ids[r],
                        row.len(),
                        n
                    ),
                ));
            }
            matrix.values[r * n..(r + 1) * n].copy_from_slice(&row);
        }
        Ok(matrix)
    }

    /// Build a fully populated matrix from a function of (row, col).
    pub fn from_fn<F>(name: impl Into<String>, ids: Vec<LocationId>, mut f: F) -> HubRouteResult<Self>
    where
        F: FnMut(LocationId, LocationId) -> f64,
    {
        let mut matrix = Self::new(name, ids)?;
        let n = matrix.ids.len();
        for r in 0..n {
            for c in 0..n {
                matrix.values[r * n + c] = Some(f(matrix.ids[r], matrix.ids[c]));
            }
        }
        Ok(matrix)
    }

    /// Table name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.index.contains_key(&id)
    }

    fn offset(&self, row: LocationId, col: LocationId) -> Option<usize> {
        let r = *self.index.get(&row)?;
        let c = *self.index.get(&col)?;
        Some(r * self.ids.len() + c)
    }

    /// Set a cell; both ids must label a row/column of this matrix.
    pub fn set(&mut self, row: LocationId, col: LocationId, value: f64) -> HubRouteResult<()> {
        let offset = self.offset(row, col).ok_or_else(|| {
            HubRouteError::data(
                &self.name,
                format!("({}, {}) is outside the matrix", row, col),
            )
        })?;
        self.values[offset] = Some(value);
        Ok(())
    }

    /// Cell value, `None` when missing or out of range.
    pub fn get(&self, row: LocationId, col: LocationId) -> Option<f64> {
        self.offset(row, col).and_then(|o| self.values[o])
    }

    /// Cell value, or a data-integrity error naming the table and pair.
    pub fn try_get(&self, row: LocationId, col: LocationId) -> HubRouteResult<f64> {
        self.get(row, col).ok_or_else(|| {
            let detail = if self.offset(row, col).is_none() {
                format!("no row/column for pair ({}, {})", row, col)
            } else {
                format!("missing entry for pair ({}, {})", row, col)
            };
            HubRouteError::data(&self.name, detail)
        })
    }

    /// Check that every (row, col) over `rows × cols` is present, finite and
    /// nonnegative.
    pub fn check_block(&self, rows: &[LocationId], cols: &[LocationId]) -> HubRouteResult<()> {
        for &r in rows {
            for &c in cols {
                let value = self.try_get(r, c)?;
                if !value.is_finite() || value < 0.0 {
                    return Err(HubRouteError::data(
                        &self.name,
                        format!("entry ({}, {}) = {} is not a finite nonnegative value", r, c, value),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Sum of all present cells.
    pub fn sum(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location_ids;

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let ids = location_ids([1, 2]);
        let err = LocationMatrix::from_rows("cost", ids, vec![vec![Some(0.0), Some(1.0)], vec![Some(2.0)]])
            .unwrap_err();
        assert!(matches!(err, HubRouteError::DataIntegrity { ref table, .. } if table == "cost"));
        assert!(err.to_string().contains("square"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = LocationMatrix::new("flow", location_ids([3, 3])).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_entry_is_reported_not_defaulted() {
        let ids = location_ids([1, 2]);
        let m = LocationMatrix::from_rows(
            "flow",
            ids,
            vec![vec![Some(0.0), None], vec![Some(4.0), Some(0.0)]],
        )
        .unwrap();
        assert_eq!(m.get(LocationId::new(2), LocationId::new(1)), Some(4.0));
        assert!(m.get(LocationId::new(1), LocationId::new(2)).is_none());
        let err = m.try_get(LocationId::new(1), LocationId::new(2)).unwrap_err();
        assert!(err.to_string().contains("missing entry for pair (1, 2)"));
        let err = m.try_get(LocationId::new(1), LocationId::new(9)).unwrap_err();
        assert!(err.to_string().contains("no row/column"));
    }

    #[test]
    fn test_check_block_rejects_negative() {
        let ids = location_ids([1, 2]);
        let mut m = LocationMatrix::from_fn("cost", ids.clone(), |_, _| 1.0).unwrap();
        m.set(LocationId::new(2), LocationId::new(2), -3.0).unwrap();
        assert!(m.check_block(&ids[..1], &ids).is_ok());
        assert!(m.check_block(&ids, &ids).is_err());
    }

    #[test]
    fn test_sum_skips_missing() {
        let ids = location_ids([1, 2]);
        let mut m = LocationMatrix::new("flow", ids).unwrap();
        m.set(LocationId::new(1), LocationId::new(2), 2.5).unwrap();
        m.set(LocationId::new(2), LocationId::new(1), 1.5).unwrap();
        assert_eq!(m.sum(), 4.0);
    }
}
