pub mod categorization;
pub mod dates;
pub mod document;
pub mod group;
pub mod lot;
pub mod opinion;
pub mod opportunity;
pub mod reference;
pub mod status;
