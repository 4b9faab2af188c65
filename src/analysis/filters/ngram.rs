use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Expands each token into its character n-grams, shortest first
pub struct NGramFilter {
    min_gram: usize,
    max_gram: usize,
}

impl NGramFilter {
    /// Bounds are swapped when given out of order
    pub fn new(min_gram: usize, max_gram: usize) -> Self {
        let (min_gram, max_gram) = if min_gram > max_gram {
            (max_gram, min_gram)
        } else {
            (min_gram, max_gram)
        };
        NGramFilter {
            min_gram: min_gram.max(1),
            max_gram: max_gram.max(1),
        }
    }
}

impl TokenFilter for NGramFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::new();

        for token in tokens {
            let chars: Vec<(usize, char)> = token.text.char_indices().collect();

            for n in self.min_gram..=self.max_gram.min(chars.len()) {
                for start in 0..=chars.len() - n {
                    let gram: String = chars[start..start + n].iter().map(|(_, c)| c).collect();
                    result.push(Token::new(gram, token.position, token.offset + chars[start].0));
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        "ngram"
    }
}
