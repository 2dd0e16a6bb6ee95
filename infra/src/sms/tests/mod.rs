//! Unit tests for SMS providers

mod create_sender_tests;
