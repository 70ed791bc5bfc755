pub mod candidate;
pub mod dossier;
pub mod job;
