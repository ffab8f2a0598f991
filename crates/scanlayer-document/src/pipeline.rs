// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline — one image in, one searchable single-page PDF out.
//
// Stages run strictly in order: load, recognize, infer title, compute page
// geometry, map boxes, fit text, plan the page, render, write. Any failure
// ends the run before the output path is touched.

use std::path::{Path, PathBuf};

use scanlayer_core::error::Result;
use scanlayer_core::{
    BoxOrigin, DocumentMetadata, LayerConfig, PageGeometry, TextMode, TextObservation,
};
use tracing::{info, instrument, warn};

use crate::image::SourceImage;
use crate::layout::{
    BuiltinMetrics, PagePlan, PlacedText, compute_page_geometry, fit_all, place_observations,
};
use crate::pdf::{PdfReader, PdfWriter};
use crate::scan::{EntityTagger, HeuristicTagger, TextRecognizer, infer_title, save_observations};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub title: String,
    pub geometry: PageGeometry,
    /// Observations returned by the recognizer, including skipped ones.
    pub observations: usize,
    pub plan: PagePlan,
    /// Size of the written PDF.
    pub bytes: usize,
}

impl RunReport {
    /// Observations that produced no text run (blank text or degenerate box).
    pub fn skipped(&self) -> usize {
        self.observations - self.plan.text_runs().count()
    }
}

/// Image-to-PDF conversion with a fixed configuration.
pub struct Pipeline {
    config: LayerConfig,
    recognizer: Box<dyn TextRecognizer>,
    tagger: Box<dyn EntityTagger>,
    save_observations: Option<PathBuf>,
}

impl Pipeline {
    /// Validates `config`; the heuristic tagger is used for titles.
    pub fn new(config: LayerConfig, recognizer: Box<dyn TextRecognizer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            recognizer,
            tagger: Box::new(HeuristicTagger),
            save_observations: None,
        })
    }

    pub fn with_tagger(mut self, tagger: Box<dyn EntityTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Also write the recognized observations to `path` as JSON.
    pub fn save_observations_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_observations = Some(path.into());
        self
    }

    /// Convert the image at `input` into a PDF at `output`.
    #[instrument(skip_all, fields(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
    ))]
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunReport> {
        let output = output.as_ref();
        let image = SourceImage::open(input)?;

        let observations = self.recognizer.recognize(&image)?;
        let origin = self.recognizer.box_origin();
        info!(count = observations.len(), ?origin, "Text recognized");

        if let Some(path) = &self.save_observations {
            save_observations(path, origin, &observations)?;
        }

        let full_text = observations
            .iter()
            .map(|obs| obs.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let title = infer_title(&full_text, self.tagger.as_ref(), &self.config.fallback_title);

        let plan = self.layout(image.width(), image.height(), origin, &observations);

        let writer = PdfWriter::new(DocumentMetadata {
            title: title.clone(),
            creator: self.config.creator.clone(),
            subject: self.config.subject.clone(),
        });
        let bytes = writer.write_to_file(&plan, &image, output)?;

        if self.config.debug {
            self.report_written(output);
        }

        let report = RunReport {
            title,
            geometry: plan.geometry,
            observations: observations.len(),
            bytes: bytes.len(),
            plan,
        };
        info!(
            title = %report.title,
            text_runs = report.plan.text_runs().count(),
            skipped = report.skipped(),
            bytes = report.bytes,
            "Conversion complete"
        );
        Ok(report)
    }

    /// Page geometry, box mapping, fitting and planning for an image of the
    /// given pixel size. Pure: nothing is read or written.
    pub fn layout(
        &self,
        width_px: u32,
        height_px: u32,
        origin: BoxOrigin,
        observations: &[TextObservation],
    ) -> PagePlan {
        let geometry = compute_page_geometry(width_px, height_px, &self.config.page);
        let placed = place_observations(observations, origin, &geometry);
        if self.config.debug {
            print_regions(&placed);
        }

        let measurer = BuiltinMetrics::for_family(self.config.fit.font);
        let fitted = fit_all(&placed, measurer, &self.config.fit);

        PagePlan::build(
            geometry,
            self.config.fit.font,
            self.config.text_mode,
            fitted,
            self.config.debug,
        )
    }

    /// Read the written file back and log what it contains.
    fn report_written(&self, output: &Path) {
        match PdfReader::open(output).and_then(|reader| reader.summarize()) {
            Ok(summary) => info!(
                pages = summary.page_count,
                width = summary.page_size.0,
                height = summary.page_size.1,
                text_runs = summary.text_runs,
                invisible = summary.invisible_runs,
                outlines = summary.strokes,
                hidden_layer = self.config.text_mode == TextMode::Invisible,
                "Output verified"
            ),
            Err(err) => warn!(error = %err, "Could not read back the written PDF"),
        }
    }
}

fn print_regions(placed: &[PlacedText]) {
    for item in placed {
        println!("Detected text: {} at {}", item.text, item.page_rect);
    }
}
