pub mod circle;
pub mod ellipse;
pub mod line;
pub mod parabola;
pub mod r2;
pub mod shape;
