pub mod u501_import_products;
pub mod u502_publish_assistant;
