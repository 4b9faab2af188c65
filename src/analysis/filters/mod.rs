pub mod lowercase;
pub mod stopword;
pub mod stemmer;
pub mod ngram;
