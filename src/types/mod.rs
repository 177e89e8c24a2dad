pub mod date;
pub mod row;

pub mod book;
pub mod rating;
pub mod theme;
