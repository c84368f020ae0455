//! Detection result types
//!
//! Candidates, validated events, diagnostic metadata, and the result
//! structure handed to downstream review tools.

pub mod result;
