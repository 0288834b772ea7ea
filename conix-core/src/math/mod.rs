pub mod bisect;
pub mod mat3;
