/*!
 * Tests for sentence-aligned chunking
 */

use tarjama::translation::{DEFAULT_MAX_CHUNK_CHARS, Segmenter, split_text};

fn sentences(text: &str) -> Vec<String> {
    text.replace(['\r', '\n'], " ")
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_split_text_withShortSentences_shouldPackIntoOneChunk() {
    assert_eq!(split_text("Hello. World.", 400), vec!["Hello. World."]);
}

#[test]
fn test_split_text_withEmptyOrBlankText_shouldReturnNoChunks() {
    assert!(split_text("", 400).is_empty());
    assert!(split_text("   \n\t ", 400).is_empty());
    assert!(split_text("...", 400).is_empty());
}

#[test]
fn test_split_text_withoutPeriod_shouldTerminateSingleChunk() {
    assert_eq!(split_text("  just one line  ", 400), vec!["just one line."]);
}

#[test]
fn test_split_text_atLimit_shouldStartNewChunk() {
    // "Hello. " and "World. " are 7 characters each; packing requires strictly less than the limit
    assert_eq!(split_text("Hello. World.", 14), vec!["Hello.", "World."]);
    assert_eq!(split_text("Hello. World.", 15), vec!["Hello. World."]);
}

#[test]
fn test_split_text_withOversizedSentence_shouldKeepItWhole() {
    let chunks = split_text("Short. This sentence is far longer than the limit. End.", 10);
    assert_eq!(chunks, vec!["Short.", "This sentence is far longer than the limit.", "End."]);
}

#[test]
fn test_split_text_withLineBreaks_shouldJoinSentenceAcrossLines() {
    let chunks = split_text("First part\r\nof sentence. Second\nsentence.", 400);
    assert_eq!(chunks, vec!["First part  of sentence. Second sentence."]);
}

#[test]
fn test_split_text_withArabic_shouldCountCharactersNotBytes() {
    // 13 characters but 25 bytes
    let sentence = "مرحبا بالعالم";
    assert_eq!(split_text(&format!("{}.", sentence), 16), vec![format!("{}.", sentence)]);

    let two = format!("{}. {}.", sentence, sentence);
    assert_eq!(split_text(&two, 31).len(), 1);
    assert_eq!(split_text(&two, 30).len(), 2);
}

#[test]
fn test_split_text_withManySentences_shouldRespectLimitAndKeepOrder() {
    let text: String = (1..=60)
        .map(|i| format!("Sentence number {} has a few words in it. ", i))
        .collect();
    let max_len = 120;

    let chunks = split_text(&text, max_len);
    assert!(chunks.len() > 1);

    for chunk in &chunks {
        assert!(chunk.chars().count() < max_len, "chunk too long: {:?}", chunk);
        assert!(chunk.ends_with('.'));
        assert!(!chunk.starts_with(' '));
    }

    let rejoined: Vec<String> = chunks.iter().flat_map(|c| sentences(c)).collect();
    assert_eq!(rejoined, sentences(&text));
}

#[test]
fn test_segmenter_segment_shouldIndexFromOne() {
    let segmenter = Segmenter::new(14);
    let chunks = segmenter.segment("Hello. World. Again.");

    let indexes: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(chunks[0].text, "Hello.");
    assert_eq!(chunks[0].char_len, 6);
}

#[test]
fn test_segmenter_default_shouldUseDefaultLimit() {
    assert_eq!(Segmenter::default().max_len(), DEFAULT_MAX_CHUNK_CHARS);
}
