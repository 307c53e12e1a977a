//! Keyword-based genre detection for imported files.
//!
//! The title is checked first: any genre keyword appearing anywhere in it
//! decides the genre, in the order news, literature, conversation. Otherwise
//! each genre scores the number of content words (edge punctuation removed,
//! longer than 3 characters) equal to one of its keywords. The best score
//! wins if it is above [`MIN_CONTENT_SCORE`]; ties go to the earlier genre.

use corpus_core::models::Genre;

/// A content score must exceed this to pick a genre.
pub const MIN_CONTENT_SCORE: usize = 2;

const NEWS_KEYWORDS: &[&str] = &[
    "news", "izindaba", "sports", "game", "umdlalo", "goal", "team", "soccer", "football", "match",
];

const LITERATURE_KEYWORDS: &[&str] = &[
    "book", "incwadi", "story", "literature", "umlando", "tale", "folklore", "chapter", "novel",
];

const CONVERSATION_KEYWORDS: &[&str] = &[
    "conversation",
    "ingxoxo",
    "dialogue",
    "chat",
    "sawubona",
    "yebo",
    "hamba kahle",
    "hello",
    "greeting",
];

const RULES: [(Genre, &[&str]); 3] = [
    (Genre::News, NEWS_KEYWORDS),
    (Genre::Literature, LITERATURE_KEYWORDS),
    (Genre::Conversation, CONVERSATION_KEYWORDS),
];

const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '\'', '(', ')'];

/// How an ingested file gets its genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreChoice {
    Fixed(Genre),
    /// Detect from title and text with [`detect_genre`].
    Auto,
}

impl GenreChoice {
    /// `"auto"` (any case) selects detection; anything else is a genre name.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            GenreChoice::Auto
        } else {
            GenreChoice::Fixed(Genre::parse(value))
        }
    }

    pub fn resolve(&self, title: &str, text: &str) -> Genre {
        match self {
            GenreChoice::Fixed(genre) => *genre,
            GenreChoice::Auto => detect_genre(title, text),
        }
    }
}

impl Default for GenreChoice {
    fn default() -> Self {
        GenreChoice::Fixed(Genre::Other)
    }
}

impl From<Genre> for GenreChoice {
    fn from(genre: Genre) -> Self {
        GenreChoice::Fixed(genre)
    }
}

/// Guess a document's genre from its title and text.
pub fn detect_genre(title: &str, text: &str) -> Genre {
    let title = title.to_lowercase();
    for (genre, keywords) in RULES {
        if keywords.iter().any(|k| title.contains(k)) {
            return genre;
        }
    }

    let mut scores = [0usize; 3];
    for word in text.split_whitespace() {
        let word = word.trim_matches(EDGE_PUNCTUATION).to_lowercase();
        if word.chars().count() <= 3 {
            continue;
        }
        for (score, (_, keywords)) in scores.iter_mut().zip(RULES.iter()) {
            if keywords.contains(&word.as_str()) {
                *score += 1;
            }
        }
    }

    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    if scores[best] > MIN_CONTENT_SCORE {
        RULES[best].0
    } else {
        Genre::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_keyword_wins() {
        assert_eq!(detect_genre("Izindaba zanamuhla", ""), Genre::News);
        assert_eq!(detect_genre("My Storybook", "hello hello hello hello"), Genre::Literature);
        assert_eq!(detect_genre("Chat log", ""), Genre::Conversation);
    }

    #[test]
    fn test_title_checks_genres_in_order() {
        // "news" and "story" both appear; news is checked first.
        assert_eq!(detect_genre("News story", ""), Genre::News);
    }

    #[test]
    fn test_content_score_must_exceed_threshold() {
        assert_eq!(detect_genre("untitled", "The soccer team won."), Genre::Other);
        assert_eq!(
            detect_genre("untitled", "The soccer team scored a goal."),
            Genre::News
        );
    }

    #[test]
    fn test_content_words_are_cleaned_and_matched_exactly() {
        let text = "\"Sawubona!\" she said. Yebo, hello (greeting) ... greetings";
        assert_eq!(detect_genre("notes", text), Genre::Conversation);
        // Only whole words count in content.
        assert_eq!(detect_genre("notes", "teams games goals matches"), Genre::Other);
    }

    #[test]
    fn test_content_highest_score_wins_ties_go_first() {
        let text = "book story novel tale soccer team goal";
        assert_eq!(detect_genre("x", text), Genre::Literature);
        let tied = "book story novel soccer team goal";
        assert_eq!(detect_genre("x", tied), Genre::News);
    }

    #[test]
    fn test_fallback_is_other() {
        assert_eq!(detect_genre("", ""), Genre::Other);
        assert_eq!(detect_genre("report", "nothing matches here at all"), Genre::Other);
    }

    #[test]
    fn test_choice_parse_and_resolve() {
        assert_eq!(GenreChoice::parse("AUTO"), GenreChoice::Auto);
        assert_eq!(GenreChoice::parse("news"), GenreChoice::Fixed(Genre::News));
        assert_eq!(GenreChoice::parse("poetry"), GenreChoice::Fixed(Genre::Other));
        assert_eq!(GenreChoice::Auto.resolve("Football", ""), Genre::News);
        assert_eq!(
            GenreChoice::Fixed(Genre::Literature).resolve("Football", ""),
            Genre::Literature
        );
    }
}
