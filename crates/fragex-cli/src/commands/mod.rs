pub mod expand;
pub mod intersections;
pub mod weights;
