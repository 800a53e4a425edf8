// ============================================================
// Layer 4 — Review Text Preprocessor
// ============================================================
// The word index that defines the vocabulary was built from
// lowercase words with punctuation removed. Free text has to be
// brought into the same shape before the whitespace tokenizer
// sees it, otherwise "Great!" and "great" become different words
// and the first one falls out of the vocabulary.
//
// Cleaning steps (applied in order):
//   1. Lowercase
//   2. Replace HTML line breaks (<br />) with a space
//   3. Keep letters and digits; keep an apostrophe only when it
//      sits inside a word ("don't"); everything else → space
//   4. Collapse runs of whitespace and trim
//
// Reference: Rust Book §8 (Strings in Rust)

const LINE_BREAKS: [&str; 3] = ["<br />", "<br/>", "<br>"];

#[derive(Debug, Clone, Copy)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw review for downstream tokenisation.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1 + 2: lowercase, drop line-break markup ────────────────────
        let mut lowered = text.to_lowercase();
        for tag in LINE_BREAKS {
            lowered = lowered.replace(tag, " ");
        }

        // ── Step 3: character filter ─────────────────────────────────────────
        let chars: Vec<char> = lowered.chars().collect();
        let mut filtered = String::with_capacity(lowered.len());

        for (i, &c) in chars.iter().enumerate() {
            if c.is_alphanumeric() {
                filtered.push(c);
            } else if c == '\'' && is_inside_word(&chars, i) {
                filtered.push(c);
            } else {
                filtered.push(' ');
            }
        }

        // ── Step 4: collapse whitespace ──────────────────────────────────────
        filtered.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_inside_word(chars: &[char], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|j| chars.get(j));
    let after  = chars.get(i + 1);
    matches!((before, after), (Some(b), Some(a)) if b.is_alphanumeric() && a.is_alphanumeric())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("This movie was GREAT!"), "this movie was great");
    }

    #[test]
    fn test_removes_line_break_markup() {
        let p = Preprocessor::new();
        assert_eq!(
            p.clean("Loved it.<br /><br />Would watch again"),
            "loved it would watch again"
        );
    }

    #[test]
    fn test_keeps_intra_word_apostrophes_only() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("I don't think 'so'"), "i don't think so");
    }

    #[test]
    fn test_collapses_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  a \t\n  b  "), "a b");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert_eq!(p.clean("?!..."), "");
    }
}
