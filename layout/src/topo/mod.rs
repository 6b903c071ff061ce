//! The layering passes: labeling, the two layer assignment strategies, the
//! dummy insertion pass, and the layout object that runs them.

pub mod dummies;
pub mod heuristic;
pub mod labeling;
pub mod layout;
pub mod optimal;
pub mod verifier;
