//! Token records and the composable token classification mask.

use bitflags::bitflags;
use bstr::BStr;
use core::ops::Range;

/// Sentinel for unset offsets and absent indices inside [`Token`].
pub(crate) const UNSET: usize = usize::MAX;

bitflags! {
    /// Classification mask for [`Token`]s and for the tokenizer's
    /// "expected next token" state.
    ///
    /// A stored token type is exactly one base category ([`OBJECT`],
    /// [`ARRAY`], [`STRING`], [`PRIMITIVE`]) plus, once resolved,
    /// exactly one role bit ([`KEY`] or [`VALUE`]). [`CLOSE`] and
    /// [`DELIMITER`] never appear on stored tokens; they occur only in
    /// expectation masks.
    ///
    /// Queries test bitwise containment, not equality: a token typed
    /// `STRING | KEY` matches a query for `STRING` and a query for
    /// `KEY` alike. Compare [`Token::kind`] against a named union such
    /// as [`STRING_KEY`] for an exact test.
    ///
    /// [`OBJECT`]: TokenType::OBJECT
    /// [`ARRAY`]: TokenType::ARRAY
    /// [`STRING`]: TokenType::STRING
    /// [`PRIMITIVE`]: TokenType::PRIMITIVE
    /// [`KEY`]: TokenType::KEY
    /// [`VALUE`]: TokenType::VALUE
    /// [`CLOSE`]: TokenType::CLOSE
    /// [`DELIMITER`]: TokenType::DELIMITER
    /// [`STRING_KEY`]: TokenType::STRING_KEY
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct TokenType: u8 {
        /// Object container.
        const OBJECT = 0x01;
        /// Array container.
        const ARRAY = 0x02;
        /// Quote-delimited literal.
        const STRING = 0x04;
        /// Unquoted literal: number, boolean or `null`, or any bare
        /// word under the permissive dialect.
        const PRIMITIVE = 0x08;
        /// Role bit: the token names the member value that follows it.
        const KEY = 0x10;
        /// Role bit: the token stands in value position.
        const VALUE = 0x20;
        /// Expectation only: a closing `}` or `]` would be legal next.
        const CLOSE = 0x40;
        /// Expectation only: a `:` or `,` would be legal next.
        const DELIMITER = 0x80;

        /// Either container category.
        const CONTAINER = Self::OBJECT.bits() | Self::ARRAY.bits();
        /// Every base category, i.e. anything that can stand as a value.
        const ANY_VALUE = Self::OBJECT.bits()
            | Self::ARRAY.bits()
            | Self::STRING.bits()
            | Self::PRIMITIVE.bits();

        /// An object in value position.
        const OBJECT_VALUE = Self::OBJECT.bits() | Self::VALUE.bits();
        /// An array in value position.
        const ARRAY_VALUE = Self::ARRAY.bits() | Self::VALUE.bits();
        /// A string used as an object key.
        const STRING_KEY = Self::STRING.bits() | Self::KEY.bits();
        /// A string in value position.
        const STRING_VALUE = Self::STRING.bits() | Self::VALUE.bits();
        /// A primitive in value position.
        const PRIMITIVE_VALUE = Self::PRIMITIVE.bits() | Self::VALUE.bits();
    }
}

/// One lexical unit of a JSON document (a container, string, or
/// primitive), described by its byte span in the input buffer plus
/// structural metadata.
///
/// Offsets index into the original input; no text is copied, so the
/// buffer must outlive any interpretation of the token. String spans
/// exclude the surrounding quotes, container spans run from opening to
/// closing bracket inclusive, and primitive spans cover the literal's
/// exact bytes.
///
/// A default token is unclassified with an unset span: the state a pool
/// slot holds before the tokenizer fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub(crate) kind: TokenType,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) size: usize,
    pub(crate) parent: usize,
    pub(crate) next_sibling: usize,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenType::empty(),
            start: UNSET,
            end: UNSET,
            size: 0,
            parent: UNSET,
            next_sibling: UNSET,
        }
    }
}

impl Token {
    /// The stored classification mask.
    #[must_use]
    pub fn kind(&self) -> TokenType {
        self.kind
    }

    /// Byte offset of the first span byte, once the token is filled.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        (self.start != UNSET).then_some(self.start)
    }

    /// Byte offset one past the last span byte, once the token closed.
    #[must_use]
    pub fn end(&self) -> Option<usize> {
        (self.end != UNSET).then_some(self.end)
    }

    /// Half-open byte range of the token within the input buffer, once
    /// the token closed.
    #[must_use]
    pub fn span(&self) -> Option<Range<usize>> {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => Some(start..end),
            _ => None,
        }
    }

    /// Number of direct children recorded under this token while it was
    /// the current super-token.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pool index of the super-token, when parent links are enabled.
    ///
    /// `None` for top-level tokens and whenever parent links are
    /// disabled.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        (self.parent != UNSET).then_some(self.parent)
    }

    /// Pool index of the next token under the same super-token, when
    /// sibling links are enabled.
    #[must_use]
    pub fn next_sibling(&self) -> Option<usize> {
        (self.next_sibling != UNSET).then_some(self.next_sibling)
    }

    /// Whether this container token is still awaiting its closing
    /// bracket.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.start != UNSET && self.end == UNSET
    }

    /// Tests the stored type against `mask` by bitwise containment.
    ///
    /// The test is permissive: a `STRING | KEY` token answers `true`
    /// for a `STRING` query and for a `KEY` query. For an exact test,
    /// compare [`Token::kind`] with the combined mask instead.
    #[must_use]
    pub fn is(&self, mask: TokenType) -> bool {
        self.kind.intersects(mask)
    }

    /// The token's verbatim bytes within `input`, or `None` while the
    /// token is open or unfilled.
    ///
    /// Returned as a [`BStr`] so spans display losslessly whether or
    /// not they are valid UTF-8; it dereferences to `&[u8]`.
    #[must_use]
    pub fn bytes<'b>(&self, input: &'b [u8]) -> Option<&'b BStr> {
        input.get(self.span()?).map(BStr::new)
    }
}
