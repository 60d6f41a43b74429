pub mod animal_speeds;
pub mod catalog;
pub mod completion;
pub mod metrics_manager;
pub mod species_chat;
