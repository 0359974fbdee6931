//! Character-window chunking for projected documents.
//!
//! Goals:
//! - Chunks never exceed `chunk_size` characters.
//! - Consecutive chunks share up to `chunk_overlap` characters of trailing text.
//! - Line boundaries are preferred; lines longer than a chunk are hard-split.
//!
//! Lengths are counted in `char`s, not bytes, so CJK text chunks the same
//! way as ASCII. The result depends only on the input text.

use std::collections::VecDeque;

use tracing::trace;

use crate::record::ProjectedDocument;

/// Splits text into overlapping windows.
#[derive(Clone, Copy, Debug)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// `chunk_size == 0` is lifted to 1; overlap is clamped below the size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Splits `text` into chunks. Blank input yields no chunks; text that
    /// already fits yields exactly one chunk equal to the trimmed input.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut out = Vec::new();
        let mut window: VecDeque<(String, usize)> = VecDeque::new();
        let mut window_len = 0usize;

        for piece in self.pieces(text) {
            let piece_len = char_len(&piece);

            if window_len + piece_len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut out, &window);
                // Keep a tail of at most `chunk_overlap` chars that still
                // leaves room for the incoming piece.
                while window_len > self.chunk_overlap
                    || (window_len > 0 && window_len + piece_len > self.chunk_size)
                {
                    match window.pop_front() {
                        Some((_, len)) => window_len -= len,
                        None => break,
                    }
                }
            }

            window_len += piece_len;
            window.push_back((piece, piece_len));
        }
        push_chunk(&mut out, &window);

        trace!(
            chunks = out.len(),
            chunk_size = self.chunk_size,
            chunk_overlap = self.chunk_overlap,
            "chunker::split"
        );
        out
    }

    /// Splits every document; chunks inherit the parent's metadata unchanged.
    pub fn chunk_documents(&self, docs: &[ProjectedDocument]) -> Vec<ProjectedDocument> {
        docs.iter()
            .flat_map(|doc| {
                self.split(&doc.content)
                    .into_iter()
                    .map(move |content| ProjectedDocument {
                        content,
                        metadata: doc.metadata.clone(),
                    })
            })
            .collect()
    }

    /// Lines with terminators preserved; over-long lines become overlapping
    /// `chunk_size` windows.
    fn pieces(&self, text: &str) -> Vec<String> {
        let step = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        let mut pieces = Vec::new();

        for line in text.split_inclusive('\n') {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() <= self.chunk_size {
                pieces.push(line.to_string());
                continue;
            }
            let mut start = 0usize;
            loop {
                let end = (start + self.chunk_size).min(chars.len());
                pieces.push(chars[start..end].iter().collect());
                if end == chars.len() {
                    break;
                }
                start += step;
            }
        }
        pieces
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(500, 100)
    }
}

fn push_chunk(out: &mut Vec<String>, window: &VecDeque<(String, usize)>) {
    let joined: String = window.iter().map(|(s, _)| s.as_str()).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DocMetadata, DocType};

    fn numbered_lines(n: usize) -> String {
        (0..n)
            .map(|i| format!("line {i:03} of the product description"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let c = TextChunker::default();
        assert_eq!(c.split("  PhoneX\nMemory: 8GB \n"), vec!["PhoneX\nMemory: 8GB"]);
        assert!(c.split(" \n ").is_empty());
    }

    #[test]
    fn chunks_respect_size_limit() {
        let c = TextChunker::new(120, 40);
        let text = numbered_lines(40);
        let chunks = c.split(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|ch| ch.chars().count() <= 120));
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let c = TextChunker::new(120, 40);
        let chunks = c.split(&numbered_lines(20));
        for pair in chunks.windows(2) {
            let last_line = pair[0].lines().last().unwrap_or_default();
            assert!(pair[1].starts_with(last_line), "{pair:?}");
        }
    }

    #[test]
    fn every_line_survives_chunking() {
        let c = TextChunker::new(120, 40);
        let text = numbered_lines(25);
        let chunks = c.split(&text);
        for line in text.lines() {
            assert!(chunks.iter().any(|ch| ch.contains(line)), "lost {line}");
        }
    }

    #[test]
    fn long_lines_are_hard_split_by_chars() {
        let c = TextChunker::new(10, 2);
        let text = "耳機".repeat(12);
        let chunks = c.split(&text);
        assert!(chunks.iter().all(|ch| ch.chars().count() <= 10));
        assert_eq!(chunks[0].chars().count(), 10);
        let tail: String = chunks[0].chars().skip(8).collect();
        assert!(chunks[1].starts_with(&tail));
    }

    #[test]
    fn splitting_is_idempotent() {
        let c = TextChunker::new(80, 20);
        let text = numbered_lines(15);
        assert_eq!(c.split(&text), c.split(&text));
    }

    #[test]
    fn chunks_inherit_metadata() {
        let c = TextChunker::new(60, 10);
        let doc = ProjectedDocument {
            content: numbered_lines(6),
            metadata: DocMetadata {
                id: "p1".into(),
                name: "PhoneX".into(),
                doc_type: DocType::Description,
            },
        };
        let chunks = c.chunk_documents(std::slice::from_ref(&doc));
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|ch| ch.metadata == doc.metadata));
    }
}
