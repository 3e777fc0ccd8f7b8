//! Client-side behaviour of the portfolio site.
//!
//! The contact form submit cycle talks to the relay over HTTP. The other
//! modules hold the state behind the page's interactive elements.

pub mod highlight;
pub mod nav;
pub mod reveal;
pub mod submit;
pub mod theme;
pub mod year;

pub use submit::{ContactClient, FormState, Submission, SubmitFailure, SubmitOutcome};
