pub mod classifier;
pub mod commit;
pub mod metadata;
pub mod registry;
pub mod report;
