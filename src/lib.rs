//! Cricsheet Narrative: ball-by-ball match commentary from Cricsheet JSON.
//!
//! Loads a match record, folds every delivery into a sentence and a running
//! score, groups the sentences into overs and innings, and writes the whole
//! story out as a plain-text file.

pub mod core;
pub mod schema;
