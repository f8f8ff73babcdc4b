//! Business-rule services
//!
//! Pure domain helpers used by the report pipeline: the montant-en-lettres
//! conversion and the capability states of surrounding-application features.

pub mod amount_words;
pub mod features;

pub use amount_words::{amount_to_words, number_to_words};
pub use features::FeatureState;
