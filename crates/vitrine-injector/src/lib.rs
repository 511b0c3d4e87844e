/* crates/vitrine-injector/src/lib.rs */

mod locate;
mod page_context;
mod sanitize;

pub use locate::{
  ensure_head_tag, has_head_tag, inject_at_closing_tag, inject_at_opening_tag, inject_begin,
  inject_end,
};
pub use page_context::{
  PAGE_CONTEXT_SCRIPT_OPEN, has_page_context, inject_page_context, page_context_script,
};
pub use sanitize::sanitize_json;

#[cfg(test)]
mod tests;
