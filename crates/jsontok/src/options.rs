//! Tokenizer configuration.

use crate::grammar::Dialect;

/// Configuration for a [`Tokenizer`](crate::Tokenizer), fixed at
/// construction.
///
/// # Examples
///
/// ```rust
/// use jsontok::{Dialect, Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions {
///     dialect: Dialect::Permissive,
///     parent_links: true,
///     ..Default::default()
/// });
/// ```
///
/// # Default
///
/// Strict dialect, both link kinds disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenizerOptions {
    /// Which grammar the tokenizer enforces.
    ///
    /// The two dialects share one scanner set and one transition table;
    /// they differ only in the entries documented on [`Dialect`].
    ///
    /// # Default
    ///
    /// [`Dialect::Strict`]
    pub dialect: Dialect,

    /// Whether each token records the pool index of its super-token.
    ///
    /// With parent links a tree builder can walk from any token to the
    /// document root without an auxiliary stack, and the tokenizer
    /// locates enclosing containers by following the chain instead of
    /// scanning the pool backwards.
    ///
    /// # Default
    ///
    /// `false`
    pub parent_links: bool,

    /// Whether each token records the pool index of the next token
    /// under the same super-token.
    ///
    /// Sibling links let a tree builder enumerate a container's
    /// children in source order without inspecting intervening
    /// descendants.
    ///
    /// # Default
    ///
    /// `false`
    pub sibling_links: bool,
}
