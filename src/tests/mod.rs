mod utils_tests;
