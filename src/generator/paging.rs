use crate::generator::text::Token;

/// Tokens shown per page.
pub const PAGE_WIDTH: usize = 80;

/// Align page boundaries with word boundaries.
///
/// A page whose last slot would hold a non-space token is cut one short and
/// closed with a synthetic space; the deferred token opens the next page. The
/// final page always ends with a space so the block wraps on a word boundary.
pub fn add_page_end_spaces(tokens: &[Token], width: usize) -> Vec<Token> {
    let width = width.max(2);
    let mut out = Vec::with_capacity(tokens.len() + tokens.len() / width + 1);
    let mut idx = 0;

    while idx < tokens.len() {
        let remaining = tokens.len() - idx;

        if remaining < width {
            let slice = &tokens[idx..];
            out.extend_from_slice(slice);
            if !slice.last().is_some_and(Token::is_space) {
                out.push(Token::space());
            }
            break;
        }

        if tokens[idx + width - 1].is_space() {
            out.extend_from_slice(&tokens[idx..idx + width]);
            idx += width;
            continue;
        }

        out.extend_from_slice(&tokens[idx..idx + width - 1]);
        out.push(Token::space());
        idx += width - 1;
    }

    out
}

/// The page containing `cursor`, and the cursor relative to it.
pub fn viewport(tokens: &[Token], cursor: usize, width: usize) -> (&[Token], usize) {
    if tokens.is_empty() || width == 0 {
        return (&[], 0);
    }
    let start = (cursor / width) * width;
    let start = start.min(tokens.len());
    let end = tokens.len().min(start + width);
    (&tokens[start..end], cursor - start)
}
