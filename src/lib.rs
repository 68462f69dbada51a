//! Flavor text: procedural character and event descriptions from
//! categorized word lists.
//!
//! Word lists are merged into a `WordPool`; a whitespace-delimited template
//! names categories with sigils (`:jj`, `:!person`, `@item`) and the
//! `TemplateRenderer` fills them in, one private working copy of the pool
//! per rendered line.

pub mod core;
pub mod schema;
