//! Helper functions shared by the view, templates and feed

mod html;
mod url;

pub use html::*;
pub use url::*;
