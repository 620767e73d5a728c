
mod decode_tests;
mod edge_case_tests;
