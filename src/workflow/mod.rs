pub mod changelog;
pub mod history;
