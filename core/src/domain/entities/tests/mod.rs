mod session_tests;
mod verification_code_tests;
