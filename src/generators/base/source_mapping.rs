//! Cross-language navigation metadata appended to generated headers.

use crate::error::Result;
use crate::models::SourceMapping;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Line width of the base64 block inside the comment.
pub const METADATA_LINE_WIDTH: usize = 76;

const METADATA_TYPE: &str = "kythe0";
const ANCHOR_TYPE: &str = "anchor_anchor";
const IMPUTES_EDGE: &str = "%/kythe/edge/imputes";

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    meta: Vec<Anchor<'a>>,
}

#[derive(Debug, Serialize)]
struct Anchor<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    source_begin: usize,
    source_end: usize,
    target_begin: usize,
    target_end: usize,
    edge: &'static str,
    source_vname: VName<'a>,
}

#[derive(Debug, Serialize)]
struct VName<'a> {
    corpus: &'a str,
    path: &'a str,
    language: &'static str,
}

/// JSON document mapping Java identifiers to header byte ranges.
pub fn metadata_json(mappings: &[SourceMapping], corpus: &str, source_path: &str) -> Result<String> {
    let metadata = Metadata {
        kind: METADATA_TYPE,
        meta: mappings
            .iter()
            .map(|mapping| Anchor {
                kind: ANCHOR_TYPE,
                source_begin: mapping.source.start,
                source_end: mapping.source.end,
                target_begin: mapping.target_begin,
                target_end: mapping.target_end,
                edge: IMPUTES_EDGE,
                source_vname: VName {
                    corpus,
                    path: source_path,
                    language: "java",
                },
            })
            .collect(),
    };
    Ok(serde_json::to_string(&metadata)?)
}

/// Base64 of the JSON, wrapped at [`METADATA_LINE_WIDTH`] columns.
pub fn encode_wrapped(json: &str) -> Vec<String> {
    let encoded = STANDARD.encode(json.as_bytes());
    // base64 output is ASCII, so byte chunks are valid lines.
    encoded
        .as_bytes()
        .chunks(METADATA_LINE_WIDTH)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// The comment block appended to a header, or `None` without mappings.
pub fn metadata_comment(
    mappings: &[SourceMapping],
    corpus: &str,
    source_path: &str,
) -> Result<Option<String>> {
    if mappings.is_empty() {
        return Ok(None);
    }
    let json = metadata_json(mappings, corpus, source_path)?;
    let mut comment = String::from("/* This file contains Kythe metadata.\n");
    for line in encode_wrapped(&json) {
        comment.push_str(&line);
        comment.push('\n');
    }
    comment.push_str("*/\n");
    Ok(Some(comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRange;

    fn mapping() -> SourceMapping {
        SourceMapping::new("run", SourceRange { start: 40, end: 43 }, 120, 3)
    }

    #[test]
    fn test_metadata_json_shape() {
        let json = metadata_json(&[mapping()], "corp", "com/foo/Bar.java").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "kythe0");
        let anchor = &value["meta"][0];
        assert_eq!(anchor["type"], "anchor_anchor");
        assert_eq!(anchor["source_begin"], 40);
        assert_eq!(anchor["target_end"], 123);
        assert_eq!(anchor["edge"], "%/kythe/edge/imputes");
        assert_eq!(anchor["source_vname"]["corpus"], "corp");
        assert_eq!(anchor["source_vname"]["path"], "com/foo/Bar.java");
        assert_eq!(anchor["source_vname"]["language"], "java");
    }

    #[test]
    fn test_lines_are_wrapped() {
        let mappings: Vec<SourceMapping> = (0..4).map(|_| mapping()).collect();
        let json = metadata_json(&mappings, "corp", "com/foo/Bar.java").unwrap();
        let lines = encode_wrapped(&json);
        assert!(lines.len() > 1);
        assert!(lines[..lines.len() - 1]
            .iter()
            .all(|line| line.len() == METADATA_LINE_WIDTH));
        let joined: String = lines.concat();
        let decoded = STANDARD.decode(joined).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), json);
    }

    #[test]
    fn test_comment_block() {
        let comment = metadata_comment(&[mapping()], "corp", "Bar.java")
            .unwrap()
            .unwrap();
        assert!(comment.starts_with("/* This file contains Kythe metadata.\n"));
        assert!(comment.ends_with("\n*/\n"));
        assert!(metadata_comment(&[], "corp", "Bar.java").unwrap().is_none());
    }
}
