use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ChefError, Result};

/// Header lines of an annotated tag as printed by `git show <tag>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    /// Raw version string, e.g. "v1.4.0"
    pub version: String,
    /// Tagger name and email
    pub tagger: String,
    /// Tag date, in the format git prints and accepts for `--since`
    pub date: String,
}

fn tag_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"tag(.+)\nTagger:(.+)\nDate:(.+)").expect("tag block pattern is valid")
    })
}

impl TagBlock {
    /// Extract the tag/Tagger/Date triple from a tag's descriptive text.
    ///
    /// The first occurrence of three consecutive `tag <version>`,
    /// `Tagger: <tagger>` and `Date: <date>` lines wins; each field is trimmed.
    pub fn parse(text: &str) -> Result<Self> {
        let captures = tag_block_regex().captures(text).ok_or_else(|| {
            ChefError::tag_parse("expected 'tag', 'Tagger:' and 'Date:' lines in tag text")
        })?;

        let field = |i: usize| {
            captures
                .get(i)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };

        Ok(TagBlock {
            version: field(1),
            tagger: field(2),
            date: field(3),
        })
    }
}
