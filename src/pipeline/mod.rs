//! Pipeline stages for mARkdown-to-plain-text conversion.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ line ──▶ rules ──▶ assemble ──▶ segment
//! (marker)  (classify) (clean)  (paragraphs) (sentences)
//! ```
//!
//! 1. [`input`]    — read the file, check the OpenITI marker line
//! 2. [`line`]     — classify each raw line before any substitution
//! 3. [`rules`]    — the ordered mARkdown rule table
//! 4. [`assemble`] — join cleaned lines with paragraph dividers and joiners
//! 5. [`segment`]  — split paragraphs into sentences through a
//!    [`segment::SentenceSegmenter`]; [`model`] provides the rule-based one

pub mod assemble;
pub mod input;
pub mod line;
pub mod model;
pub mod rules;
pub mod segment;
