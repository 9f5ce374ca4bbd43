use rand::Rng;

use crate::faker::FakerCorpus;

const MAX_TEXT_ATTEMPTS: usize = 16;

/// Generate a capitalized lorem sentence of at most `max_chars` characters,
/// ending in a period.
///
/// Words are appended until the running length reaches `max_chars`; the word
/// that crossed the limit is dropped.
pub fn short_text<R: Rng + ?Sized>(corpus: &FakerCorpus, max_chars: usize, rng: &mut R) -> String {
    for _ in 0..MAX_TEXT_ATTEMPTS {
        let mut words: Vec<String> = Vec::new();
        let mut size = 0;
        while size < max_chars {
            let word = corpus.word(rng);
            size += word.chars().count() + usize::from(!words.is_empty());
            words.push(word);
        }
        words.pop();
        if !words.is_empty() {
            return finish_sentence(&words.join(" "));
        }
    }

    // Limit shorter than every word drawn: fall back to a clipped word.
    let word = corpus.word(rng);
    finish_sentence(&truncate_chars(&word, max_chars.saturating_sub(1).max(1)))
}

/// Turn generated text into a book title: clip to `max_chars` characters and
/// strip a single trailing period.
pub fn book_title(text: &str, max_chars: usize) -> String {
    let clipped = truncate_chars(text, max_chars);
    let clipped = clipped.trim_end();
    clipped.strip_suffix('.').unwrap_or(clipped).to_string()
}

fn finish_sentence(text: &str) -> String {
    let mut chars = text.chars();
    let mut sentence: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    sentence.push('.');
    sentence
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::faker::LocaleKey;

    #[test]
    fn short_text_respects_limit_and_punctuation() {
        let corpus = FakerCorpus::new(LocaleKey::EnUs);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let text = short_text(&corpus, 20, &mut rng);
            assert!(text.chars().count() <= 20, "too long: {text}");
            assert!(text.ends_with('.'));
            assert!(text.chars().next().is_some_and(char::is_uppercase));
        }
    }

    #[test]
    fn tiny_limits_still_produce_text() {
        let corpus = FakerCorpus::new(LocaleKey::EnUs);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let title = book_title(&short_text(&corpus, 1, &mut rng), 1);
        assert_eq!(title.chars().count(), 1);
    }

    #[test]
    fn title_strips_only_one_period() {
        assert_eq!(book_title("Dolor sit amet.", 20), "Dolor sit amet");
        assert_eq!(book_title("Etc..", 20), "Etc.");
        assert_eq!(book_title("Quae voluptas", 20), "Quae voluptas");
    }

    #[test]
    fn title_clips_on_char_boundaries() {
        assert_eq!(book_title("Ação rápida e direta.", 8), "Ação ráp");
    }
}
