pub mod encode;
pub mod solver;
pub mod tour;
