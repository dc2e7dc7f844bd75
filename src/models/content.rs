use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tagged part inside segmented content. Only parts tagged `text`
/// contribute to flattening; unknown tags are preserved on the wire but
/// skipped for display. A part with no tag at all parses with an empty tag,
/// so malformed segments degrade to being skipped rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPart {
    #[serde(rename = "type", default)]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of segmented content: either a bare string or a tagged part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Text(String),
    Part(SegmentPart),
}

/// Message content as it arrives from a model provider: either a plain
/// string or an ordered sequence of mixed segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Segments(Vec<Segment>),
}

impl MessageContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        MessageContent::Text(text.into())
    }

    /// Flatten to a single display string.
    ///
    /// Plain string content is returned unchanged. Segmented content is
    /// concatenated in order with no separator: bare strings verbatim,
    /// `text` parts by their text field (missing field counts as empty),
    /// everything else skipped.
    pub fn flatten(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Segments(segments) => {
                let mut text = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(chunk) => text.push_str(chunk),
                        Segment::Part(part) if part.tag == "text" => {
                            if let Some(chunk) = &part.text {
                                text.push_str(chunk);
                            }
                        }
                        Segment::Part(part) => {
                            tracing::debug!("Skipping non-text content segment: {}", part.tag);
                        }
                    }
                }
                text
            }
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}
