pub mod calendar;
pub mod distinct;
pub mod entities;
pub mod pagination;
