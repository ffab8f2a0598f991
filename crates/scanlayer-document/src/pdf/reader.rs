// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — read a generated PDF back with `lopdf` and summarise its text
// layer. Used to report on debug runs and to check output in tests.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object};
use scanlayer_core::error::{Result, ScanlayerError};
use tracing::{debug, instrument};

/// What the single page of a generated PDF contains.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSummary {
    pub page_count: usize,
    /// MediaBox width and height of the first page, in points.
    pub page_size: (f64, f64),
    /// `/Title` from the info dictionary, if present.
    pub title: Option<String>,
    pub creator: Option<String>,
    pub subject: Option<String>,
    /// Number of text-showing operators (`Tj`, `TJ`, `'`, `"`).
    pub text_runs: usize,
    /// Number of `Tr 3` (invisible) render-mode selections.
    pub invisible_runs: usize,
    /// Number of path-stroking operators (`S`, `s`).
    pub strokes: usize,
    /// Number of XObjects painted (`Do`).
    pub xobjects: usize,
}

/// Reads existing PDF files.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to reopen {}: {}", path_ref.display(), err))
        })?;
        Ok(Self { document })
    }

    /// Summarise the first page and the info dictionary.
    pub fn summarize(&self) -> Result<PdfSummary> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&1).ok_or_else(|| {
            ScanlayerError::OutputWrite("generated PDF has no pages".into())
        })?;

        let page_size = self.media_box(page_id).unwrap_or((0.0, 0.0));

        let raw = self.document.get_page_content(page_id).map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to read page content: {}", err))
        })?;
        let content = Content::decode(&raw).map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to decode page content: {}", err))
        })?;

        let mut summary = PdfSummary {
            page_count: pages.len(),
            page_size,
            title: self.info_string(b"Title"),
            creator: self.info_string(b"Creator"),
            subject: self.info_string(b"Subject"),
            text_runs: 0,
            invisible_runs: 0,
            strokes: 0,
            xobjects: 0,
        };
        for op in &content.operations {
            match op.operator.as_str() {
                "Tj" | "TJ" | "'" | "\"" => summary.text_runs += 1,
                "Tr" => {
                    if op.operands.first().and_then(as_number) == Some(3.0) {
                        summary.invisible_runs += 1;
                    }
                }
                "S" | "s" => summary.strokes += 1,
                "Do" => summary.xobjects += 1,
                _ => {}
            }
        }

        debug!(?summary, "PDF summarised");
        Ok(summary)
    }

    /// MediaBox of a page, following `/Parent` links when it is inherited.
    fn media_box(&self, page_id: lopdf::ObjectId) -> Option<(f64, f64)> {
        let mut node = self.document.get_dictionary(page_id).ok()?;
        loop {
            if let Ok(mbox) = node.get(b"MediaBox") {
                let values = match mbox {
                    Object::Reference(id) => self.document.get_object(*id).ok()?.as_array().ok()?,
                    other => other.as_array().ok()?,
                };
                return media_box_size(values);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.document.get_dictionary(parent).ok()?;
        }
    }

    /// Read a string entry from the trailer's `/Info` dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.document.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match dict.get(key).ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

fn media_box_size(values: &[Object]) -> Option<(f64, f64)> {
    if values.len() != 4 {
        return None;
    }
    let nums: Vec<f64> = values.iter().filter_map(as_number).collect();
    if nums.len() != 4 {
        return None;
    }
    Some((nums[2] - nums[0], nums[3] - nums[1]))
}

/// Decode a PDF text string: UTF-16BE with a byte-order mark, otherwise
/// treated as single-byte text.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_owned(),
            Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf16_titles() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x63, 0x00, 0x6D, 0x00, 0x65];
        assert_eq!(decode_text_string(&bytes), "Acme");
    }

    #[test]
    fn decodes_single_byte_titles() {
        assert_eq!(decode_text_string(b"Invoice"), "Invoice");
        assert_eq!(decode_text_string(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn media_box_size_from_array() {
        let values = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.0),
            Object::Real(420.5),
        ];
        assert_eq!(media_box_size(&values), Some((595.0, 420.5)));
        assert_eq!(media_box_size(&values[..2]), None);
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();
        assert!(matches!(
            PdfReader::open(&path),
            Err(ScanlayerError::OutputWrite(_))
        ));
    }
}
