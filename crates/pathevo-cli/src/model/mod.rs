pub mod run_summary;
