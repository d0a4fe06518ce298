//! The tokenizer: scan loop, string and primitive scanners, container
//! tracking, and link maintenance.
//!
//! The driver owns a single cursor over the input bytes. Each dispatch
//! consumes one token's worth of input (or one structural byte) and
//! either commits the state advance or returns an error with the
//! cursor rewound to the start of the failing token, which is what
//! makes a retained [`Tokenizer`] resumable: after
//! [`Capacity`](TokenizeError::Capacity) the caller grows the pool,
//! after [`Truncated`](TokenizeError::Truncated) the caller appends
//! input, and the next call picks up exactly where scanning stopped.
//!
//! Nesting is handled iteratively. The innermost open container is
//! located either by walking parent links up from the most recently
//! allocated token or, with links disabled, by scanning the pool
//! backwards for the last token whose span is still open; only
//! container tokens are ever open.

use crate::{
    error::TokenizeError,
    grammar::Dialect,
    options::TokenizerOptions,
    pool::TokenPool,
    token::{Token, TokenType, UNSET},
};

// ------------------------------------------------------------------------------------------------
// Tokenizer state & public entry points
// ------------------------------------------------------------------------------------------------

/// An incremental, allocation-free JSON tokenizer.
///
/// The tokenizer scans a byte buffer and appends lightweight token
/// records (type, byte span, child count, optional links) to a
/// caller-supplied pool. It never allocates, never copies text, and
/// builds no tree; spans index into the original buffer.
///
/// The value holds the complete parser state and is designed to be
/// retained across calls: a scan that stops on a recoverable error
/// resumes from the same state instead of rescanning from the start.
///
/// # Examples
///
/// ```rust
/// use jsontok::{Token, TokenType, Tokenizer, TokenizerOptions};
///
/// let input = br#"{"a":1}"#;
/// let mut tokens = [Token::default(); 8];
/// let mut tokenizer = Tokenizer::new(TokenizerOptions::default());
///
/// let produced = tokenizer.tokenize(input, &mut tokens).unwrap();
/// assert_eq!(produced, 3);
/// assert_eq!(tokens[0].kind(), TokenType::OBJECT_VALUE);
/// assert_eq!(tokens[1].bytes(input).unwrap(), "a");
/// assert_eq!(tokens[2].bytes(input).unwrap(), "1");
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    options: TokenizerOptions,
    /// Byte offset the next scan starts from.
    cursor: usize,
    /// Next pool slot to claim; doubles as the cumulative token count.
    next_token: usize,
    /// Pool index of the current super-token: the open container, or
    /// the key awaiting its value.
    super_token: Option<usize>,
    /// Token categories that are grammatically legal at the cursor.
    expected: TokenType,
    /// Number of currently open containers.
    depth: usize,
}

impl Tokenizer {
    /// Creates a tokenizer with freshly initialized state.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            cursor: 0,
            next_token: 0,
            super_token: None,
            expected: options.dialect.initial(),
            depth: 0,
        }
    }

    /// Restores the freshly initialized state, keeping the
    /// configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.options);
    }

    /// The configuration this tokenizer was built with.
    #[must_use]
    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    /// Byte offset the next scan starts from; useful when reporting
    /// where a resumable stop occurred.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of currently open containers; exposed for the fuzz
    /// harness.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scans from the current cursor to the end of `input` (or an
    /// embedded NUL byte), appending token records to `tokens`.
    ///
    /// Returns the total number of tokens produced so far, including
    /// tokens from earlier resumed calls. When resuming after
    /// [`TokenizeError::Capacity`], the new pool must still hold the
    /// previously produced records in its leading slots; the scanner
    /// reads them to match brackets and classify keys.
    ///
    /// # Errors
    ///
    /// [`TokenizeError::Capacity`] when the pool is full,
    /// [`TokenizeError::Invalid`] on malformed or unexpected input, and
    /// [`TokenizeError::Truncated`] when the input ends mid-token or
    /// with containers still open.
    pub fn tokenize(
        &mut self,
        input: &[u8],
        tokens: &mut [Token],
    ) -> Result<usize, TokenizeError> {
        self.scan(input, &mut TokenPool::new(tokens))
    }

    /// Dry run: scans exactly like [`tokenize`](Tokenizer::tokenize)
    /// and returns the token count, without writing any record.
    ///
    /// Character-level validation and bracket balance are still
    /// checked, but the per-token grammar acceptance checks are
    /// skipped. A successful count therefore sizes a pool correctly
    /// for a well-formed document, yet does not imply the document is
    /// grammatically valid: the real run over the same bytes may still
    /// fail with [`TokenizeError::Invalid`].
    ///
    /// # Errors
    ///
    /// [`TokenizeError::Invalid`] on malformed characters or escapes
    /// and on unbalanced closing brackets;
    /// [`TokenizeError::Truncated`] when the input ends mid-token or
    /// with brackets still open.
    pub fn count(&mut self, input: &[u8]) -> Result<usize, TokenizeError> {
        self.scan(input, &mut TokenPool::counting())
    }

    // --------------------------------------------------------------------------------------------
    // Driver
    // --------------------------------------------------------------------------------------------

    fn scan(
        &mut self,
        input: &[u8],
        pool: &mut TokenPool<'_>,
    ) -> Result<usize, TokenizeError> {
        while let Some(&c) = input.get(self.cursor) {
            if c == 0 {
                // Embedded NUL ends the meaningful input.
                break;
            }
            match c {
                b'{' | b'[' => self.open_container(c, pool)?,
                b'}' | b']' => self.close_container(c, pool)?,
                b'"' => {
                    self.scan_string(input, pool)?;
                    self.bump_super_size(pool);
                }
                b' ' | b'\t' | b'\n' | b'\r' => {}
                b':' => self.colon(pool)?,
                b',' => self.comma(pool)?,
                _ => {
                    if self.options.dialect == Dialect::Strict
                        && !matches!(c, b'-' | b'0'..=b'9' | b't' | b'f' | b'n')
                    {
                        return Err(TokenizeError::Invalid);
                    }
                    self.scan_primitive(input, pool)?;
                    self.bump_super_size(pool);
                }
            }
            self.cursor += 1;
        }

        if self.depth > 0 {
            return Err(TokenizeError::Truncated);
        }
        Ok(self.next_token)
    }

    // --------------------------------------------------------------------------------------------
    // Container tracking
    // --------------------------------------------------------------------------------------------

    fn open_container(
        &mut self,
        c: u8,
        pool: &mut TokenPool<'_>,
    ) -> Result<(), TokenizeError> {
        let kind = if c == b'{' {
            TokenType::OBJECT
        } else {
            TokenType::ARRAY
        };
        if pool.is_counting() {
            self.next_token += 1;
            self.depth += 1;
            return Ok(());
        }

        if !self.expected.intersects(kind) {
            return Err(TokenizeError::Invalid);
        }
        let idx = pool.alloc(&mut self.next_token)?;
        let sup = self.super_token;
        if let Some(sup) = sup {
            if let Some(parent) = pool.get_mut(sup) {
                parent.size += 1;
            }
        }
        if self.options.sibling_links {
            self.link_sibling(pool);
        }
        if let Some(token) = pool.get_mut(idx) {
            token.kind = kind | TokenType::VALUE;
            token.start = self.cursor;
            if self.options.parent_links {
                if let Some(sup) = sup {
                    token.parent = sup;
                }
            }
        }
        self.expected = self.options.dialect.after_open(kind);
        self.super_token = Some(idx);
        self.depth += 1;
        Ok(())
    }

    fn close_container(
        &mut self,
        c: u8,
        pool: &mut TokenPool<'_>,
    ) -> Result<(), TokenizeError> {
        let kind = if c == b'}' {
            TokenType::OBJECT
        } else {
            TokenType::ARRAY
        };
        if pool.is_counting() {
            // Structural balance is still enforced without a pool;
            // category matching needs the records and is deferred to
            // the real run.
            if self.depth == 0 {
                return Err(TokenizeError::Invalid);
            }
            self.depth -= 1;
            return Ok(());
        }

        if !self.expected.intersects(TokenType::CLOSE) {
            return Err(TokenizeError::Invalid);
        }
        let Some(idx) = self.innermost_open(pool) else {
            return Err(TokenizeError::Invalid);
        };
        if !pool.get(idx).is_some_and(|token| token.is(kind)) {
            return Err(TokenizeError::Invalid);
        }
        if let Some(token) = pool.get_mut(idx) {
            token.end = self.cursor + 1;
        }
        self.depth -= 1;
        self.super_token = self.innermost_open(pool);

        if self.super_token.is_none() && self.options.dialect.is_permissive() {
            // The outermost value just completed; resolve the last
            // token's role.
            if let Some(last) = self.next_token.checked_sub(1) {
                if let Some(token) = pool.get_mut(last) {
                    token.kind.insert(TokenType::VALUE);
                }
            }
        }
        self.expected = self
            .options
            .dialect
            .after_close(self.super_token.is_some());
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Delimiters
    // --------------------------------------------------------------------------------------------

    fn colon(&mut self, pool: &mut TokenPool<'_>) -> Result<(), TokenizeError> {
        if pool.is_counting() {
            return Ok(());
        }
        if !self.expected.intersects(TokenType::DELIMITER) {
            return Err(TokenizeError::Invalid);
        }
        let Some(prev) = self.next_token.checked_sub(1) else {
            return Err(TokenizeError::Invalid);
        };
        match self.options.dialect {
            Dialect::Strict => {
                let prev_is_key = pool.get(prev).is_some_and(|token| token.is(TokenType::KEY));
                if self.super_token.is_none() || !prev_is_key {
                    return Err(TokenizeError::Invalid);
                }
            }
            Dialect::Permissive => {
                // Any token becomes a key when a colon follows it.
                if let Some(token) = pool.get_mut(prev) {
                    token.kind.remove(TokenType::VALUE);
                    token.kind.insert(TokenType::KEY);
                }
            }
        }
        self.super_token = Some(prev);
        self.expected = self.options.dialect.after_colon();
        Ok(())
    }

    fn comma(&mut self, pool: &mut TokenPool<'_>) -> Result<(), TokenizeError> {
        // A comma outside any container separates nothing; top-level
        // values are delimited by the grammar table alone.
        if pool.is_counting() || self.super_token.is_none() {
            return Ok(());
        }
        if !self.expected.intersects(TokenType::DELIMITER) {
            return Err(TokenizeError::Invalid);
        }
        let prev = self.next_token - 1;
        match self.options.dialect {
            Dialect::Strict => {
                if pool.get(prev).is_some_and(|token| token.is(TokenType::KEY)) {
                    return Err(TokenizeError::Invalid);
                }
            }
            Dialect::Permissive => {
                if let Some(token) = pool.get_mut(prev) {
                    token.kind.insert(TokenType::VALUE);
                }
            }
        }
        // Walk up past the key (and any just-closed value) so the next
        // member is accounted to the container itself.
        self.super_token = self.innermost_open(pool);
        let in_object = self
            .super_token
            .and_then(|idx| pool.get(idx))
            .is_some_and(|token| token.is(TokenType::OBJECT));
        self.expected = self.options.dialect.after_comma(in_object);
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // String scanner
    // --------------------------------------------------------------------------------------------

    fn scan_string(
        &mut self,
        input: &[u8],
        pool: &mut TokenPool<'_>,
    ) -> Result<(), TokenizeError> {
        if !pool.is_counting() {
            if !self.expected.intersects(TokenType::STRING) {
                return Err(TokenizeError::Invalid);
            }
            self.repair_missing_comma(pool);
        }

        // The cursor stays on the opening quote until the whole string
        // is accepted, so every failure rewinds for free.
        let start = self.cursor;
        let mut i = start + 1;
        loop {
            let Some(&c) = input.get(i) else {
                return Err(TokenizeError::Truncated);
            };
            match c {
                0 => return Err(TokenizeError::Truncated),
                b'"' => break,
                b'\\' => {
                    let Some(&esc) = input.get(i + 1) else {
                        return Err(TokenizeError::Truncated);
                    };
                    match esc {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => i += 2,
                        b'u' => {
                            for k in 0..4 {
                                match input.get(i + 2 + k) {
                                    None | Some(&0) => return Err(TokenizeError::Truncated),
                                    Some(&h) if h.is_ascii_hexdigit() => {}
                                    Some(_) => return Err(TokenizeError::Invalid),
                                }
                            }
                            i += 6;
                        }
                        _ => return Err(TokenizeError::Invalid),
                    }
                }
                _ => i += 1,
            }
        }

        // `i` sits on the closing quote.
        if pool.is_counting() {
            self.next_token += 1;
            self.cursor = i;
            return Ok(());
        }

        let idx = pool.alloc(&mut self.next_token)?;
        let role = self.string_role(idx, pool);
        if self.options.sibling_links {
            self.link_sibling(pool);
        }
        if let Some(token) = pool.get_mut(idx) {
            token.kind = TokenType::STRING | role;
            token.start = start + 1;
            token.end = i;
            if self.options.parent_links {
                if let Some(sup) = self.super_token {
                    token.parent = sup;
                }
            }
        }
        self.expected = self
            .options
            .dialect
            .after_string(role == TokenType::KEY);
        self.cursor = i;
        Ok(())
    }

    /// KEY, VALUE, or (permissive, not yet resolved) empty.
    fn string_role(&self, idx: usize, pool: &TokenPool<'_>) -> TokenType {
        let prev = idx.checked_sub(1).and_then(|p| pool.get(p));
        match self.options.dialect {
            Dialect::Strict => {
                let in_object = self
                    .super_token
                    .and_then(|sup| pool.get(sup))
                    .is_some_and(|token| token.is(TokenType::OBJECT));
                // Directly after the object opened, or after a prior
                // member's value: this string is the next key.
                let after_member =
                    prev.is_some_and(|token| token.is(TokenType::OBJECT | TokenType::VALUE));
                if in_object && after_member {
                    TokenType::KEY
                } else {
                    TokenType::VALUE
                }
            }
            Dialect::Permissive => {
                if prev.is_some_and(|token| token.is(TokenType::KEY)) {
                    TokenType::VALUE
                } else {
                    TokenType::empty()
                }
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Primitive scanner
    // --------------------------------------------------------------------------------------------

    fn scan_primitive(
        &mut self,
        input: &[u8],
        pool: &mut TokenPool<'_>,
    ) -> Result<(), TokenizeError> {
        if !pool.is_counting() {
            if !self.expected.intersects(TokenType::PRIMITIVE) {
                return Err(TokenizeError::Invalid);
            }
            self.repair_missing_comma(pool);
        }

        let permissive = self.options.dialect.is_permissive();
        let start = self.cursor;
        let mut i = start;
        let end = loop {
            match input.get(i) {
                None | Some(&0) if permissive => break i,
                None | Some(&0) => return Err(TokenizeError::Truncated),
                Some(&(b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}')) => break i,
                Some(&b':') if permissive => break i,
                Some(&c) if !(32..127).contains(&c) => return Err(TokenizeError::Invalid),
                Some(_) => i += 1,
            }
        };

        if pool.is_counting() {
            self.next_token += 1;
            self.cursor = end - 1;
            return Ok(());
        }

        let idx = pool.alloc(&mut self.next_token)?;
        // Strict primitives are always values. Permissive ones are only
        // resolved here when they complete a key/value pair; otherwise
        // a later colon, comma, or close settles the role.
        let is_value = !permissive
            || self
                .super_token
                .and_then(|sup| pool.get(sup))
                .is_some_and(|token| token.is(TokenType::KEY));
        if self.options.sibling_links {
            self.link_sibling(pool);
        }
        if let Some(token) = pool.get_mut(idx) {
            token.kind = TokenType::PRIMITIVE;
            if is_value {
                token.kind.insert(TokenType::VALUE);
            }
            token.start = start;
            token.end = end;
            if self.options.parent_links {
                if let Some(sup) = self.super_token {
                    token.parent = sup;
                }
            }
        }
        let enclosed = !permissive || self.innermost_open(pool).is_some();
        self.expected = self.options.dialect.after_primitive(enclosed);
        self.cursor = end - 1;
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Shared helpers
    // --------------------------------------------------------------------------------------------

    /// Index of the innermost token still awaiting its closing bracket.
    fn innermost_open(&self, pool: &TokenPool<'_>) -> Option<usize> {
        if self.options.parent_links {
            let mut idx = self.next_token.checked_sub(1)?;
            loop {
                let token = pool.get(idx)?;
                if token.is_open() {
                    return Some(idx);
                }
                if token.parent == UNSET {
                    return None;
                }
                idx = token.parent;
            }
        } else {
            (0..self.next_token)
                .rev()
                .find(|&idx| pool.get(idx).is_some_and(Token::is_open))
        }
    }

    /// Counts the accepted token as a child of the current super-token.
    fn bump_super_size(&self, pool: &mut TokenPool<'_>) {
        if let Some(sup) = self.super_token {
            if let Some(token) = pool.get_mut(sup) {
                token.size += 1;
            }
        }
    }

    /// Permissive inputs may separate members with whitespace alone.
    /// When a new token arrives while a delimiter was still legal and
    /// the last two tokens form a key/value pair, the super-token is
    /// re-derived past the completed pair.
    fn repair_missing_comma(&mut self, pool: &TokenPool<'_>) {
        if !self.options.dialect.is_permissive()
            || !self.expected.intersects(TokenType::DELIMITER)
        {
            return;
        }
        let after_pair = self
            .next_token
            .checked_sub(2)
            .and_then(|idx| pool.get(idx))
            .is_some_and(|token| token.is(TokenType::KEY));
        if after_pair {
            self.super_token = self.innermost_open(pool);
        }
    }

    /// Points the previous sibling under the current super-token at the
    /// most recently allocated token.
    fn link_sibling(&self, pool: &mut TokenPool<'_>) {
        let current = self.next_token - 1;
        let first = match self.super_token {
            Some(sup) => sup + 1,
            None => 0,
        };
        if first == current {
            return;
        }
        let mut idx = first;
        while let Some(next) = pool.get(idx).and_then(Token::next_sibling) {
            idx = next;
        }
        if let Some(token) = pool.get_mut(idx) {
            token.next_sibling = current;
        }
    }
}
