//! Workspace root package. It carries the rusty-hook pre-commit configuration;
//! the route planner itself lives in `crates/routeplanner-lib` and
//! `crates/routeplanner-cli`.
