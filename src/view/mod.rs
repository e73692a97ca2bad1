//! Page views built as element trees

mod node;
mod post;

pub use node::{Element, Node, Style};
pub use post::PostView;
