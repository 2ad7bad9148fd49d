//! Tabscore: Batch Scoring Library
//!
//! A library for scoring tabular datasets with fitted preprocessing
//! artifacts and a pretrained model, with drift checks against the
//! training-time statistics.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
