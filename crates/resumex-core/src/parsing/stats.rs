use crate::extraction::{PageContent, TextFragment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-document typography computed once and passed to every later stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Character-weighted mode of fragment font sizes.
    pub body_font_size: f32,
    /// Character-weighted mode of font names.
    pub common_font_name: String,
    /// Average glyph width of body text (common font at body size).
    pub typical_char_width: f32,
    pub fragment_count: usize,
}

impl DocumentStats {
    pub fn from_pages(pages: &[PageContent]) -> Self {
        Self::from_fragments(pages.iter().flat_map(|p| p.fragments.iter()))
    }

    pub fn from_fragments<'a, I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = &'a TextFragment>,
    {
        let fragments: Vec<&TextFragment> = fragments
            .into_iter()
            .filter(|f| !f.text.trim().is_empty())
            .collect();
        if fragments.is_empty() {
            return Self::default();
        }

        let mut size_weight: BTreeMap<i32, usize> = BTreeMap::new();
        let mut font_weight: BTreeMap<&str, usize> = BTreeMap::new();
        for fragment in &fragments {
            let chars = fragment.text.chars().count();
            *size_weight.entry(size_bucket(fragment.font_size)).or_default() += chars;
            *font_weight.entry(fragment.font_name.as_str()).or_default() += chars;
        }

        let body_bucket = mode(&size_weight).unwrap_or_default();
        let common_font_name = mode(&font_weight).unwrap_or_default().to_string();

        let (total_width, total_chars) = fragments
            .iter()
            .filter(|f| {
                f.font_name == common_font_name && size_bucket(f.font_size) == body_bucket
            })
            .fold((0.0f32, 0usize), |(width, chars), f| {
                (width + f.width, chars + f.text.chars().count())
            });

        let body_font_size = body_bucket as f32 / 10.0;
        let typical_char_width = if total_chars > 0 && total_width > 0.0 {
            total_width / total_chars as f32
        } else {
            // Backends without widths: half an em is a fair average glyph.
            body_font_size * 0.5
        };

        DocumentStats {
            body_font_size,
            common_font_name,
            typical_char_width,
            fragment_count: fragments.len(),
        }
    }
}

/// Font sizes bucketed to a tenth of a point.
fn size_bucket(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Key with the highest weight; ties go to the smallest key.
pub(crate) fn mode<K: Copy + Ord>(weights: &BTreeMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (&key, &weight) in weights {
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((key, weight));
        }
    }
    best.map(|(key, _)| key)
}
