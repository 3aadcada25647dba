pub mod filter;
pub mod group;
pub mod sort;
