//! FAQ content transforms over the markdown AST.
//!
//! # Pipeline
//!
//! ```text
//! Document (Vec<Node>)
//!     ├── transform_faqs_to_accordion_data → Vec<FaqRecord>   (question, answer, isNew, newDate)
//!     └── wrap_faq_questions_into_cards    → Vec<Node>        (div.qa-card groups)
//! ```
//!
//! | Module      | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `node`      | AST node model and JSON boundary                  |
//! | `classify`  | Section boundaries and question headings          |
//! | `text`      | Plain-text flattening                             |
//! | `tag`       | `{new:DATE}` / `<!-- new:DATE -->` tags           |
//! | `deadline`  | Deadline countdown placeholder                    |
//! | `filter`    | Answer clean-up (tags out, countdown in)          |
//! | `card`      | Card wrapper                                      |
//! | `accordion` | FAQ record extraction                             |
//!
//! Every transform is pure: time enters only through [`FaqContext`].

mod accordion;
mod card;
mod classify;
mod context;
mod deadline;
mod filter;
pub mod node;
pub mod tag;
mod text;

pub use accordion::{FaqRecord, transform_faqs_to_accordion_data, transform_value};
pub use card::{card_count, wrap_cards_value, wrap_faq_questions_into_cards};
pub use classify::question_sections;
pub use context::{CARD_CLASS, FaqContext};
pub use node::{Element, Node};
pub use text::extract_text;
