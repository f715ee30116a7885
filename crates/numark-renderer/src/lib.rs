//! Rule-table renderer from markdown token streams to custom markup.
//!
//! A parser produces a flat [`Token`] stream; the [`Renderer`] walks it and
//! asks the [`Rule`] registered for each token type for one markup fragment.
//!
//! # Architecture
//!
//! - [`RuleTable`]: token type to rule dispatch, overridable per renderer
//! - [`FenceRules`]: custom fence renderers selected by the info string
//! - [`breaks`]: lookahead deciding the trailing line break after block closes
//! - [`markup`]: tag names and fixed attributes per output [`Dialect`]
//! - [`events`]: adapter from pulldown-cmark events to tokens
//!
//! # Example
//!
//! ```
//! use numark_renderer::{Options, Renderer};
//!
//! let html = Renderer::new()
//!     .render_markdown("- one\n- two\n", &Options::default())
//!     .unwrap();
//! assert_eq!(
//!     html,
//!     "<nu-list>\n<nu-listitem>one</nu-listitem>\n<nu-listitem>two</nu-listitem>\n</nu-list>\n"
//! );
//! ```

pub mod breaks;
mod error;
mod escape;
pub mod events;
mod fence;
pub mod markup;
mod options;
mod renderer;
mod rule;
mod rules;
mod token;
mod util;

pub use error::RenderError;
pub use escape::{escape_html, has, replace_entities, unescape_md};
pub use fence::{FenceRules, default_close_tag, default_open_tag};
pub use markup::{Dialect, MarkupTable};
pub use options::{Highlighter, Options};
pub use renderer::Renderer;
pub use rule::{Rule, RuleContext, RuleTable};
pub use token::{Align, Token, TokenType};
