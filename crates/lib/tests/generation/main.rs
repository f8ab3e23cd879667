mod common;
mod glob_tests;
mod live_tests;
mod names_tests;
