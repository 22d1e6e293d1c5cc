pub mod categorization;
pub mod documents;
pub mod groups;
pub mod identification;
pub mod intelligence;
pub mod lots;
pub mod object;
pub mod opinions;
pub mod settings;
pub mod timeline;
