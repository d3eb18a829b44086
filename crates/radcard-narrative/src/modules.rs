pub mod brain;
pub mod liver;
