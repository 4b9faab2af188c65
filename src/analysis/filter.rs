use crate::analysis::token::Token;

/// Rewrites, drops or expands tokens
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token>;

    fn name(&self) -> &str;
}
