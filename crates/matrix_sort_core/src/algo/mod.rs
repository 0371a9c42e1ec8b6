pub mod clean;
pub mod distance;
pub mod rearrange;
