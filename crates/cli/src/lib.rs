//! Terminal presentation for the Retrievix command line
//!
//! - Status lines and headers
//! - Item rows and match percentage badges
//! - Spinners around slow remote calls

#![warn(missing_docs)]

pub mod output;
pub mod progress;
