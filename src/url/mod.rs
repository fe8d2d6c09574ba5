//! URL canonicalization
//!
//! Every lookup key in the index is a canonical URL produced by this module.

mod normalize;

pub use normalize::normalize_url;
