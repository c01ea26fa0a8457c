pub mod explain;
pub mod logical_empty;
pub mod logical_filter;
pub mod logical_limit;
pub mod logical_project;
pub mod logical_scan;
pub mod operator;
