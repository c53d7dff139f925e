#![allow(dead_code)]

pub mod dataset_helpers;
pub mod source_fixtures;
