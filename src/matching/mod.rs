pub mod manager;
pub mod name;
pub mod pairs;
pub mod similarity;
