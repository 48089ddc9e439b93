//! HTTP front end for the essay grader.
//!
//! - [`routes`]: the `/api` router and the fully layered application.
//! - [`state`]: shared configuration and the optional grading provider.
//! - [`response`]: the JSON response envelope.
//! - [`middleware`]: request logging.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
