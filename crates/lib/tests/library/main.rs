mod cluster_tests;
mod common;
mod network_tests;
mod sql_tests;
mod strategy_tests;
