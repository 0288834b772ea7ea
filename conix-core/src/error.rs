#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConicError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Conic matrix is not a pair of lines (adjugate has no nonzero diagonal entry)")]
    NotSplittable,

    #[error("Pencil of conics has no real eigenvalue")]
    NoRealEigenvalues,

    #[error("Conics are coincident; their intersection is the whole curve")]
    Coincident,
}

pub type Result<T> = std::result::Result<T, ConicError>;
