//! Unit tests for the recommendation pipeline.

mod support;
