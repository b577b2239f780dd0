//! Artifact emitters.
//!
//! Four pure, side-effect-free renderers over the analysis data: the token
//! listing, the token table, the debug trace, and the tree dump. None of
//! them mutate their inputs; calling them twice on the same data yields
//! byte-identical output.

pub mod listing;
pub mod table;
pub mod trace;
pub mod treeviz;
