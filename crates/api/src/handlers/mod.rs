pub mod certificates;
pub mod extract;
pub mod images;
pub mod templates;
