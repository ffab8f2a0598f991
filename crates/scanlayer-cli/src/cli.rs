// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they turn into a configured pipeline.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use scanlayer_core::error::Result;
use scanlayer_core::{FontFamily, LayerConfig, TextMode};
use scanlayer_document::{Pipeline, ReplayRecognizer, TextRecognizer};

#[derive(Debug, Parser)]
#[command(
    name = "scanlayer",
    version,
    about = "Turn a scanned image into a searchable one-page PDF"
)]
pub struct Args {
    /// Image to convert (PNG, JPEG, TIFF, ...)
    pub input: PathBuf,

    /// Where to write the PDF
    pub output: PathBuf,

    /// Outline each detected region and print it to stdout
    #[arg(long)]
    pub debug: bool,

    /// Paint the text layer in black instead of hiding it
    #[arg(long)]
    pub visible_text: bool,

    /// Vertical compression factor applied to each text run
    #[arg(long, value_name = "K")]
    pub vertical_compression: Option<f64>,

    /// Base-14 font used to measure and draw the text layer
    #[arg(long, value_enum)]
    pub font: Option<FontArg>,

    /// Directory holding text-detection.rten and text-recognition.rten
    #[arg(long, value_name = "DIR", conflicts_with = "observations")]
    pub model_dir: Option<PathBuf>,

    /// Replay observations from a JSON file instead of running OCR
    #[arg(long, value_name = "FILE")]
    pub observations: Option<PathBuf>,

    /// Save the recognized observations to a JSON file
    #[arg(long, value_name = "FILE")]
    pub save_observations: Option<PathBuf>,

    /// Load settings from a JSON file (flags override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FontArg {
    Helvetica,
    Times,
    Courier,
}

impl From<FontArg> for FontFamily {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::Helvetica => Self::Helvetica,
            FontArg::Times => Self::TimesRoman,
            FontArg::Courier => Self::Courier,
        }
    }
}

impl Args {
    /// The configuration file (or defaults) with flags applied on top.
    pub fn layer_config(&self) -> Result<LayerConfig> {
        let mut config = match &self.config {
            Some(path) => LayerConfig::load(path)?,
            None => LayerConfig::default(),
        };
        if self.debug {
            config.debug = true;
        }
        if self.visible_text {
            config.text_mode = TextMode::Fill;
        }
        if let Some(k) = self.vertical_compression {
            config.fit.vertical_compression = k;
        }
        if let Some(font) = self.font {
            config.fit.font = font.into();
        }
        Ok(config)
    }

    /// Saved observations when given, OCR otherwise.
    pub fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        if let Some(path) = &self.observations {
            return Ok(Box::new(ReplayRecognizer::load(path)?));
        }
        self.ocr_recognizer()
    }

    #[cfg(feature = "ocr")]
    fn ocr_recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        use scanlayer_document::OcrEngine;

        let engine = match &self.model_dir {
            Some(dir) => OcrEngine::from_model_dir(dir),
            None => OcrEngine::with_defaults(),
        };
        Ok(Box::new(engine))
    }

    #[cfg(not(feature = "ocr"))]
    fn ocr_recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        Err(scanlayer_core::ScanlayerError::Recognition(
            "this build has no OCR support; pass --observations <FILE>".into(),
        ))
    }

    /// Build the pipeline these arguments describe.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let config = self.layer_config()?;
        let mut pipeline = Pipeline::new(config, self.recognizer()?)?;
        if let Some(path) = &self.save_observations {
            pipeline = pipeline.save_observations_to(path);
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use scanlayer_core::ScanlayerError;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("scanlayer").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn two_positionals_are_required() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        let err = parse(&["scan.png"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn debug_flag_in_any_position() {
        for args in [
            ["--debug", "scan.png", "out.pdf"],
            ["scan.png", "--debug", "out.pdf"],
            ["scan.png", "out.pdf", "--debug"],
        ] {
            let parsed = parse(&args).unwrap();
            assert!(parsed.debug);
            assert_eq!(parsed.input, PathBuf::from("scan.png"));
            assert_eq!(parsed.output, PathBuf::from("out.pdf"));
        }
    }

    #[test]
    fn model_dir_conflicts_with_observations() {
        let err = parse(&[
            "scan.png",
            "out.pdf",
            "--model-dir",
            "models",
            "--observations",
            "obs.json",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn unreadable_input_is_reported_before_models_load() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png");
        let output = dir.path().join("out.pdf");
        let models = dir.path().join("no-models");
        let args = [
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
            "--model-dir".into(),
            models.to_string_lossy().into_owned(),
        ];

        let parsed = parse(&args.iter().map(String::as_str).collect::<Vec<_>>()).unwrap();
        let result = parsed.pipeline().unwrap().run(&parsed.input, &parsed.output);
        assert!(matches!(result, Err(ScanlayerError::InputLoad(_))));
        assert!(!output.exists());
    }

    #[test]
    fn defaults_without_flags() {
        let config = parse(&["scan.png", "out.pdf"]).unwrap().layer_config().unwrap();
        assert_eq!(config, LayerConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let parsed = parse(&[
            "scan.png",
            "out.pdf",
            "--visible-text",
            "--vertical-compression",
            "0.8",
            "--font",
            "courier",
        ])
        .unwrap();
        let config = parsed.layer_config().unwrap();
        assert_eq!(config.text_mode, TextMode::Fill);
        assert_eq!(config.fit.vertical_compression, 0.8);
        assert_eq!(config.fit.font, FontFamily::Courier);
        assert!(!config.debug);
    }

    #[test]
    fn config_file_is_loaded_before_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanlayer.json");
        let json = r#"{ "fit": { "vertical_compression": 0.5 }, "creator": "desk scanner" }"#;
        std::fs::write(&path, json).unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let config = parse(&["scan.png", "out.pdf", "--config", &path_arg, "--debug"])
            .unwrap()
            .layer_config()
            .unwrap();
        assert_eq!(config.fit.vertical_compression, 0.5);
        assert_eq!(config.creator, "desk scanner");
        assert!(config.debug);
    }

    #[test]
    fn invalid_compression_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let observations = dir.path().join("obs.json");
        std::fs::write(&observations, r#"{ "observations": [] }"#).unwrap();
        let obs_arg = observations.to_string_lossy().into_owned();

        let parsed = parse(&[
            "scan.png",
            "out.pdf",
            "--observations",
            &obs_arg,
            "--vertical-compression",
            "0",
        ])
        .unwrap();
        assert!(matches!(parsed.pipeline(), Err(ScanlayerError::Config(_))));
    }

    #[test]
    fn replayed_observations_drive_a_full_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.png");
        image::RgbImage::from_pixel(120, 80, image::Rgb([255, 255, 255]))
            .save(&input)
            .unwrap();
        let observations = dir.path().join("obs.json");
        std::fs::write(
            &observations,
            r#"{ "origin": "top-left", "observations": [
                { "text": "Receipt", "bounds": { "x": 0.1, "y": 0.1, "width": 0.5, "height": 0.2 } }
            ] }"#,
        )
        .unwrap();
        let output = dir.path().join("out.pdf");

        let args = [
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
            "--observations".into(),
            observations.to_string_lossy().into_owned(),
        ];
        let parsed = parse(&args.iter().map(String::as_str).collect::<Vec<_>>()).unwrap();
        let report = parsed.pipeline().unwrap().run(&parsed.input, &parsed.output).unwrap();

        assert!(output.exists());
        assert_eq!(report.plan.text_runs().count(), 1);
        assert_eq!(report.title, "OCR Generated PDF");
    }
}
