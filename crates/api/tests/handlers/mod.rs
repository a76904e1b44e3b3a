mod appointments_test;
mod middleware_test;
