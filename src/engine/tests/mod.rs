//! Tests for the functor engine
//!
//! Organized by node kind / feature area

mod helpers;

mod condition_tests;
mod serialize_tests;
mod stdlib_tests;
