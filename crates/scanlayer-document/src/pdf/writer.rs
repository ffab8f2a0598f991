// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — serialise a page plan with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: a page is a `PdfPage` holding a
// `Vec<Op>`, and the document is serialised via `PdfDocument::save()`.
// Each `DrawOp` of the plan becomes a short, self-contained run of ops
// wrapped in save/restore so transforms never leak between regions.
//
// printpdf emits builtin-font strings as UTF-8 while the font dictionary
// declares `/WinAnsiEncoding`, so the serialised page is reopened with
// `lopdf` and every shown string is re-encoded to WinAnsi bytes.

use std::io::Write;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, Stream};
use printpdf::{
    BuiltinFont, Color, CurTransMat, Line, LinePoint, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, RawImage, RawImageData, RawImageFormat, Rgb, TextItem,
    TextRenderingMode, XObjectId, XObjectTransform,
};
use scanlayer_core::error::{Result, ScanlayerError};
use scanlayer_core::{DocumentMetadata, FontFamily, Rect, TextMode};
use tracing::{debug, info, instrument};

use crate::image::SourceImage;
use crate::layout::{DrawOp, FittedText, PagePlan, encode_winansi};

/// Serialises a [`PagePlan`] and its background image into a one-page PDF.
pub struct PdfWriter {
    /// Info dictionary entries, set before any page is added.
    metadata: DocumentMetadata,
}

impl PdfWriter {
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self { metadata }
    }

    /// Render the plan to PDF bytes.
    #[instrument(skip_all, fields(ops = plan.ops.len(), title = %self.metadata.title))]
    pub fn render(&self, plan: &PagePlan, image: &SourceImage) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&self.metadata.title);
        doc.metadata.info.creator = self.metadata.creator.clone();
        doc.metadata.info.subject = self.metadata.subject.clone();

        // printpdf wants tightly packed RGB8.
        let rgb = image.as_dynamic().to_rgb8();
        let (img_width, img_height) = rgb.dimensions();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        let font = builtin_font(plan.font);
        let mut ops: Vec<Op> = Vec::new();
        for op in &plan.ops {
            match op {
                DrawOp::Background { width, height } => {
                    push_background(&mut ops, &xobject_id, (img_width, img_height), *width, *height)
                }
                DrawOp::Outline { rect, line_width } => push_outline(&mut ops, rect, *line_width),
                DrawOp::Text(item) => push_text(&mut ops, item, font, plan.text_mode),
            }
        }

        let page_w = Pt(plan.geometry.width as f32);
        let page_h = Pt(plan.geometry.height as f32);
        let page_box = printpdf::Rect {
            x: Pt(0.0),
            y: Pt(0.0),
            width: page_w,
            height: page_h,
        };
        doc.with_pages(vec![PdfPage {
            media_box: page_box.clone(),
            trim_box: page_box.clone(),
            crop_box: page_box,
            ops,
        }]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if output.is_empty() {
            return Err(ScanlayerError::OutputWrite(
                "PDF serialisation produced no bytes".into(),
            ));
        }

        let output = encode_text_layer(&output)?;
        debug!(
            bytes = output.len(),
            warnings = warnings.len(),
            "PDF serialised"
        );
        Ok(output)
    }

    /// Render the plan and write it to `path`.
    ///
    /// The bytes go to a temporary file next to `path` that is renamed into
    /// place only after a complete write, so a failure never leaves a partial
    /// PDF at the destination.
    pub fn write_to_file(
        &self,
        plan: &PagePlan,
        image: &SourceImage,
        path: impl AsRef<Path>,
    ) -> Result<Vec<u8>> {
        let bytes = self.render(plan, image)?;
        write_atomic(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(bytes)
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|err| {
        ScanlayerError::OutputWrite(format!("cannot create file in {}: {}", dir.display(), err))
    })?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| ScanlayerError::OutputWrite(format!("{}: {}", path.display(), err)))?;
    tmp.persist(path)
        .map_err(|err| ScanlayerError::OutputWrite(format!("{}: {}", path.display(), err.error)))?;
    Ok(())
}

/// Rewrite the strings of every text-showing operator as WinAnsi bytes.
fn encode_text_layer(pdf: &[u8]) -> Result<Vec<u8>> {
    let mut document = Document::load_mem(pdf).map_err(|err| {
        ScanlayerError::OutputWrite(format!("failed to reopen serialised PDF: {}", err))
    })?;

    let page_ids: Vec<lopdf::ObjectId> = document.get_pages().into_values().collect();
    for page_id in page_ids {
        let raw = document.get_page_content(page_id).map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to read page content: {}", err))
        })?;
        let mut content = Content::decode(&raw).map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to decode page content: {}", err))
        })?;

        for op in &mut content.operations {
            match op.operator.as_str() {
                "Tj" | "'" | "\"" => op.operands.iter_mut().for_each(reencode_string),
                "TJ" => {
                    for operand in &mut op.operands {
                        if let Object::Array(items) = operand {
                            items.iter_mut().for_each(reencode_string);
                        }
                    }
                }
                _ => {}
            }
        }

        let encoded = content.encode().map_err(|err| {
            ScanlayerError::OutputWrite(format!("failed to encode page content: {}", err))
        })?;
        let stream_id = document.add_object(Stream::new(Dictionary::new(), encoded));
        document
            .get_dictionary_mut(page_id)
            .map_err(|err| ScanlayerError::OutputWrite(format!("page dictionary: {}", err)))?
            .set("Contents", stream_id);
    }

    document.prune_objects();
    document.compress();
    let mut output = Vec::new();
    document.save_to(&mut output).map_err(|err| {
        ScanlayerError::OutputWrite(format!("failed to serialise PDF: {}", err))
    })?;
    Ok(output)
}

fn reencode_string(operand: &mut Object) {
    if let Object::String(bytes, _) = operand {
        let text = String::from_utf8_lossy(bytes).into_owned();
        *bytes = encode_winansi(&text);
    }
}

// -- Op builders --------------------------------------------------------------

fn builtin_font(family: FontFamily) -> BuiltinFont {
    match family {
        FontFamily::Helvetica => BuiltinFont::Helvetica,
        FontFamily::TimesRoman => BuiltinFont::TimesRoman,
        FontFamily::Courier => BuiltinFont::Courier,
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

/// Stretch the image over the page. At 72 dpi one pixel is one point, so the
/// scale is simply page size over pixel size.
fn push_background(
    ops: &mut Vec<Op>,
    id: &XObjectId,
    (img_width, img_height): (u32, u32),
    width: f64,
    height: f64,
) {
    ops.push(Op::UseXobject {
        id: id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some((width / f64::from(img_width)) as f32),
            scale_y: Some((height / f64::from(img_height)) as f32),
            dpi: Some(72.0),
            rotate: None,
        },
    });
}

fn push_outline(ops: &mut Vec<Op>, rect: &Rect, line_width: f64) {
    let corner = |x: f64, y: f64| LinePoint {
        p: Point {
            x: Pt(x as f32),
            y: Pt(y as f32),
        },
        bezier: false,
    };
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: rgb(1.0, 0.5, 0.0),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(line_width as f32),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                corner(rect.x, rect.y),
                corner(rect.max_x(), rect.y),
                corner(rect.max_x(), rect.max_y()),
                corner(rect.x, rect.max_y()),
            ],
            is_closed: true,
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

fn push_text(ops: &mut Vec<Op>, item: &FittedText, font: BuiltinFont, mode: TextMode) {
    let t = &item.transform;
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetTransformationMatrix {
        matrix: CurTransMat::Translate(Pt(t.translate_x as f32), Pt(t.translate_y as f32)),
    });
    ops.push(Op::SetTransformationMatrix {
        matrix: CurTransMat::Scale(t.scale_x as f32, t.scale_y as f32),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(t.stroke_width() as f32),
    });
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextRenderingMode {
        mode: match mode {
            TextMode::Invisible => TextRenderingMode::Invisible,
            TextMode::Fill => TextRenderingMode::Fill,
        },
    });
    ops.push(Op::SetFillColor {
        col: rgb(0.0, 0.0, 0.0),
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(item.font_size as f32),
        font,
    });
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(0.0),
            y: Pt(item.baseline as f32),
        },
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(item.text.clone())],
        font,
    });
    ops.push(Op::EndTextSection);
    ops.push(Op::RestoreGraphicsState);
}
