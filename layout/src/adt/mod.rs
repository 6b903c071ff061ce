//! Data structures that are shared by the layering passes.

pub mod dag;
pub mod slots;
