pub mod common;

pub mod a001_commerce;
pub mod a002_product;
