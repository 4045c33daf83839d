//! Splitting input into `>`-delimited chunks
//!
//! The `>` is the only terminator the parser trusts: every chunk is the text
//! between two of them, with the terminator dropped. Each chunk remembers where
//! its first non-whitespace character sits so errors can point at it.

/// One `>`-delimited piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Raw text, leading whitespace included
    pub text: &'a str,
    /// Line of the first non-whitespace character (1-based)
    pub line: usize,
    /// Column of the first non-whitespace character (1-based)
    pub column: usize,
    /// Whether a `>` followed the chunk
    pub terminated: bool,
}

/// What a chunk looks like, judged by its first non-whitespace characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkClass {
    /// Does not start with `<`
    Text,
    /// `</name`
    Closing,
    /// `<!--...--`
    Comment,
    /// `<name ...`
    Element,
    /// Any other markup, e.g. `<!DOCTYPE` or `<?pi`
    Unknown,
}

impl<'a> Chunk<'a> {
    pub fn trimmed(&self) -> &'a str {
        self.text.trim_start()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn class(&self) -> ChunkClass {
        classify(self.trimmed())
    }

    /// The first non-whitespace character is also the last one, as in `<>`
    pub fn is_lone_character(&self) -> bool {
        let mut chars = self.trimmed().chars();
        chars.next().is_some() && chars.next().is_none()
    }

    /// Split off the part starting at byte `mid`, keeping its position right
    pub fn tail(&self, mid: usize) -> Option<Self> {
        let head = self.text.get(..mid)?;
        let tail = self.text.get(mid..)?;
        let (mut line, mut column) = (self.line, self.column);
        // position tracking starts at the first non-whitespace character
        let skipped = leading_whitespace(self.text);
        for ch in head.chars().skip(skipped) {
            advance(ch, &mut line, &mut column);
        }
        for ch in tail.chars().take(leading_whitespace(tail)) {
            advance(ch, &mut line, &mut column);
        }
        Some(Self {
            text: tail,
            line,
            column,
            terminated: self.terminated,
        })
    }
}

pub fn classify(trimmed: &str) -> ChunkClass {
    let Some(markup) = trimmed.strip_prefix('<') else {
        return ChunkClass::Text;
    };
    if markup.starts_with('/') {
        ChunkClass::Closing
    } else if markup.starts_with("!--") {
        ChunkClass::Comment
    } else if markup.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        ChunkClass::Element
    } else {
        ChunkClass::Unknown
    }
}

/// Number of whitespace characters before the first other character
fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

fn advance(ch: char, line: &mut usize, column: &mut usize) {
    if ch == '\n' {
        *line += 1;
        *column = 1;
    } else {
        *column += 1;
    }
}

/// Iterator over the chunks of an input string
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: Option<&'a str>,
    line: usize,
    column: usize,
}

impl<'a> Chunks<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: Some(input),
            line: 1,
            column: 1,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let rest = self.rest?;
        let (text, terminated) = match rest.split_once('>') {
            Some((text, remainder)) => {
                self.rest = Some(remainder);
                (text, true)
            }
            None => {
                self.rest = None;
                (rest, false)
            }
        };

        let lead = leading_whitespace(text);
        let mut chars = text.chars();
        for ch in chars.by_ref().take(lead) {
            advance(ch, &mut self.line, &mut self.column);
        }
        let chunk = Chunk {
            text,
            line: self.line,
            column: self.column,
            terminated,
        };
        for ch in chars {
            advance(ch, &mut self.line, &mut self.column);
        }
        if terminated {
            advance('>', &mut self.line, &mut self.column);
        }
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_gt() {
        let chunks: Vec<&str> = Chunks::new("<a><b>hi</b></a>").map(|c| c.text).collect();
        assert_eq!(chunks, vec!["<a", "<b", "hi</b", "</a", ""]);
    }

    #[test]
    fn test_terminated_flag() {
        let chunks: Vec<Chunk<'_>> = Chunks::new("<a>tail").collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.first().is_some_and(|c| c.terminated));
        assert!(chunks.last().is_some_and(|c| !c.terminated));
    }

    #[test]
    fn test_positions_skip_leading_whitespace() {
        let chunks: Vec<Chunk<'_>> = Chunks::new("<a>\n  <b/>\n</a>").collect();
        let positions: Vec<(usize, usize)> = chunks.iter().map(|c| (c.line, c.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (3, 1), (3, 5)]);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("hello</a"), ChunkClass::Text);
        assert_eq!(classify("</a"), ChunkClass::Closing);
        assert_eq!(classify("<!-- c --"), ChunkClass::Comment);
        assert_eq!(classify("<a id=\"1\""), ChunkClass::Element);
        assert_eq!(classify("<_x"), ChunkClass::Element);
        assert_eq!(classify("<!DOCTYPE html"), ChunkClass::Unknown);
        assert_eq!(classify("<?pi data?"), ChunkClass::Unknown);
        assert_eq!(classify("<1abc"), ChunkClass::Unknown);
    }

    #[test]
    fn test_lone_character() {
        let chunks: Vec<Chunk<'_>> = Chunks::new("<a>\n <>x").collect();
        assert!(!chunks.first().is_some_and(Chunk::is_lone_character));
        assert!(chunks.get(1).is_some_and(Chunk::is_lone_character));
        assert!(chunks.get(2).is_some_and(Chunk::is_lone_character));
    }

    #[test]
    fn test_tail_position() {
        let chunk = Chunks::new("<a>text\nmore<b/>").nth(1);
        let tail = chunk.and_then(|c| c.text.find('<').and_then(|i| c.tail(i)));
        assert_eq!(tail.map(|t| (t.text, t.line, t.column)), Some(("<b/", 2, 5)));
    }
}
