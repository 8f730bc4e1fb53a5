//! Report rendering for neuroeval cohort runs.

pub mod html;
