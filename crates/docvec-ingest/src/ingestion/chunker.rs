//! Boundary-aware text chunking with fixed overlap

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// Characters treated as sentence terminators
const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Text chunker with configurable window size and overlap
///
/// Splits text into windows of at most `chunk_size` characters. When a
/// sentence terminator falls in the second half of a window, the window
/// shrinks to end right after it, trading exact overlap for chunks that
/// do not cut a sentence in half.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Characters of the previous window repeated at the next window's head
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    ///
    /// Bounds are validated by [`ChunkingConfig::validate`]; callers
    /// constructing directly must uphold `0 < chunk_size` and
    /// `overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Split text into ordered, bounded, overlapping chunks
    ///
    /// Chunk indices are contiguous from 0 over the emitted chunks;
    /// windows that are empty after whitespace trimming are dropped.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if total == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut index = 0u32;
        let mut start = 0usize;

        while start < total {
            // Tentative end, left unclamped so the overlap advance below
            // steps a full window past the final chunk.
            let mut end = start + self.chunk_size;

            // Only shrink to a sentence boundary when more text remains.
            if end < total {
                let window = &chars[start..end];
                if let Some(last_sentence) = window
                    .iter()
                    .rposition(|c| SENTENCE_TERMINATORS.contains(c))
                {
                    if last_sentence as f64 > self.chunk_size as f64 * 0.5 {
                        end = start + last_sentence + 1;
                    }
                }
            }

            let window: String = chars[start..end.min(total)].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(Chunk::new(index, trimmed));
                index += 1;
            }

            // Advance with overlap; the cursor must strictly increase so
            // a sentence shrink near the window start cannot stall.
            let next = end.saturating_sub(self.overlap);
            start = next.max(start + 1);
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(500, 50);
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_whitespace_only_chunks_are_dropped() {
        let chunker = TextChunker::new(10, 2);
        assert!(chunker.chunk("   \n\t   ").is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.chunk("A short note.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].text, "A short note.");
    }

    #[test]
    fn test_hard_split_overlap_and_coverage() {
        // No terminators and no whitespace, so splits land exactly on the
        // hard boundary and overlap is exact.
        let chunker = TextChunker::new(500, 50);
        let text = "x".repeat(1200);
        let chunks = chunker.chunk(&text);

        // Windows: [0, 500), [450, 950), [900, 1200)
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.len(), 500);
        assert_eq!(chunks[1].text.len(), 500);
        assert_eq!(chunks[2].text.len(), 300);

        // Indices are contiguous from zero.
        let indices: Vec<u32> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        // Dropping each successor's 50-char overlap head reconstructs the input.
        let mut rebuilt = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            rebuilt.push_str(&chunk.text[50..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_sentence_boundary_in_second_half_shrinks_window() {
        let chunker = TextChunker::new(20, 5);
        // Terminator at position 15 of a 20-char window, past the midpoint.
        let text = format!("{}. {}", "a".repeat(15), "b".repeat(30));
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks[0].text, format!("{}.", "a".repeat(15)));
    }

    #[test]
    fn test_sentence_boundary_in_first_half_is_ignored() {
        let chunker = TextChunker::new(20, 5);
        // Terminator at position 2, well before the midpoint: hard split.
        let text = format!("ab.{}", "c".repeat(40));
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks[0].text.chars().count(), 20);
    }

    #[test]
    fn test_terminates_with_maximal_overlap() {
        // overlap = chunk_size - 1 advances one position per iteration;
        // the guard keeps this finite.
        let chunker = TextChunker::new(10, 9);
        let chunks = chunker.chunk(&"a".repeat(30));
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= 30);
    }

    #[test]
    fn test_sentence_shrink_does_not_stall_cursor() {
        // A terminator just past the midpoint with a large overlap makes
        // end - overlap lag behind the cursor; the clamp must still advance.
        let chunker = TextChunker::new(20, 15);
        let text = format!("{}.{}", "a".repeat(11), "b".repeat(100));
        let chunks = chunker.chunk(&text);
        assert!(!chunks.is_empty());

        // Boundaries move monotonically forward.
        for pair in chunks.windows(2) {
            assert!(pair[1].index == pair[0].index + 1);
        }
    }

    #[test]
    fn test_question_and_exclamation_terminators() {
        let chunker = TextChunker::new(20, 5);
        let text = format!("{}? {}", "a".repeat(14), "b".repeat(30));
        let chunks = chunker.chunk(&text);
        assert_eq!(chunks[0].text, format!("{}?", "a".repeat(14)));

        let text = format!("{}! {}", "a".repeat(14), "b".repeat(30));
        let chunks = chunker.chunk(&text);
        assert_eq!(chunks[0].text, format!("{}!", "a".repeat(14)));
    }

    #[test]
    fn test_multibyte_text_splits_on_character_positions() {
        let chunker = TextChunker::new(10, 2);
        let text = "é".repeat(25);
        let chunks = chunker.chunk(&text);
        assert_eq!(chunks[0].text.chars().count(), 10);
        // Every emitted chunk respects the size bound.
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 10);
        }
    }

    #[test]
    fn test_bounded_chunk_sizes() {
        let chunker = TextChunker::new(50, 10);
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let chunks = chunker.chunk(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
            assert!(!chunk.text.trim().is_empty());
        }
    }
}
