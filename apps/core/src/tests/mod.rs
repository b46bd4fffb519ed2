//! Test Module
//!
//! Cross-module tests for the responder.
//!
//! ## Test Categories
//! - `brain_tests`: rule table behavior on realistic utterances
//! - `dispatcher_tests`: actions, pools and collaborator failures
//! - `responder_tests`: the actor end to end, both reply timings
//! - `client_tests`: HTTP collaborators against a mock server


pub mod client_tests;
