use crate::domain::error::DomainError;

/// Embedding width fixed for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension(usize);

impl Dimension {
    pub fn new(value: usize) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidInput(
                "Dimension must be a positive integer".into(),
            ));
        }
        Ok(Dimension(value))
    }

    pub fn value(&self) -> usize {
        self.0
    }

    pub fn check(&self, embedding: &[f32]) -> Result<(), DomainError> {
        if embedding.len() != self.0 {
            return Err(DomainError::DimensionMismatch {
                expected: self.0,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}
