//! Unit tests for the transition engine.

mod validator_tests;
