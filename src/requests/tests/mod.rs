mod handlers_tests;
