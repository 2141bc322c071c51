//! Deck tests: editing sessions driven through selections

mod session;
