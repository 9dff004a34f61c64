pub mod draft;
pub mod filters;
pub mod quote;
pub mod wizard;
