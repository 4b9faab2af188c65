/// One analyzed term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,      // Term text after filtering
    pub position: u32,     // Word position in the source text
    pub offset: usize,     // Byte offset in the source text
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32, offset: usize) -> Self {
        Token {
            text: text.into(),
            position,
            offset,
        }
    }
}
