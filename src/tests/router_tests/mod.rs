mod auth_tests;
mod booking_tests;
mod search_tests;
mod wizard_tests;
