// ABOUTME: API module containing all HTTP handler functions for the tickler API.
// ABOUTME: Organized into sub-modules for the to-do list, tool invocation, and shared error responses.

pub mod error;
pub mod todos;
pub mod tools;
