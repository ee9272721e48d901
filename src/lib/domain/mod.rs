pub mod export;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod order;
pub mod pipelines;
