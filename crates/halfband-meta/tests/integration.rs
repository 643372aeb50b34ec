//! Integration tests for halfband-meta.
//!
//! These tests load manifests from disk and check them against compiled
//! processors.

use halfband_core::{
    Engine, InnerProcessor, OversamplingFactor, ParamBinding, ParamDescriptor, ScaleKind,
    parameters,
};
use halfband_meta::{Manifest, MetaError, TagValue};
use tempfile::TempDir;

const WAVEFOLDER: &str = r#"
name = "Wavefolder"
author = "Suds"
copyright = "(c) 2026"
license = "MIT"
version = "1.2"
identifier = "Wavefolder"
inputs = ["In"]
outputs = ["Out [meter:peak]"]
oversampling = 8
max_frames = 256

[meta]
description = "Sine fold"
revision = "7"

[[active]]
type = "hslider"
label = "Tone"
init = "4000.0f"
min = 200
max = 16000
step = 1
meta = [["0", ""], ["unit", "Hz"], ["scale", "log"]]

[[active]]
type = "checkbox"
label = "Bypass"

[[passive]]
type = "hbargraph"
label = "Peak"
min = 0
max = 1
"#;

/// Mono folder whose table matches the manifest above.
#[derive(Debug, Default)]
struct Folder {
    tone: f32,
    bypass: f32,
}

parameters! {
    Folder: FolderParams {
        tone as Tone => ParamDescriptor::slider("Tone", 4000.0, 200.0, 16000.0, 1.0)
            .with_unit("Hz")
            .with_scale(ScaleKind::Log),
        bypass as Bypass => ParamDescriptor::checkbox("Bypass"),
    }
}

impl InnerProcessor for Folder {
    const INPUTS: usize = 1;
    const OUTPUTS: usize = 1;

    fn instance_constants(&mut self, _sample_rate: f32) {}

    fn instance_clear(&mut self) {}

    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        outputs[0][..frames].copy_from_slice(&inputs[0][..frames]);
    }

    fn parameters() -> &'static [ParamBinding<Self>] {
        Self::PARAMETERS
    }

    fn meters() -> &'static [ParamDescriptor] {
        const METERS: &[ParamDescriptor] = &[ParamDescriptor::bargraph("Peak", 0.0, 1.0)];
        METERS
    }
}

fn write_manifest(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("processor.toml");
    std::fs::write(&path, text).expect("write manifest");
    path
}

#[test]
fn test_load_and_interpret() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, WAVEFOLDER);

    let manifest = Manifest::load(&path).unwrap();
    let meta = manifest.interpret().unwrap();

    assert_eq!(meta.name, "Wavefolder");
    assert_eq!(meta.copyright, "(c) 2026");
    assert_eq!(meta.version, "1.2");
    assert_eq!(meta.factor, OversamplingFactor::X8);
    assert_eq!(meta.max_segment_frames, 256);
    assert_eq!(meta.outputs[0].name, "Out");
    assert_eq!(meta.outputs[0].tags.get("meter"), Some("peak"));
    assert_eq!(
        meta.meta,
        [
            ("description".to_string(), TagValue::Str("Sine fold".into())),
            ("revision".to_string(), TagValue::Int(7)),
        ]
    );

    let params = meta.parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].init, 4000.0);
    assert_eq!(params[0].scale, "log");
    assert!(params[1].boolean);
}

#[test]
fn test_manifest_matches_processor() {
    let meta = Manifest::from_toml(WAVEFOLDER).unwrap().interpret().unwrap();
    meta.check_processor::<Folder>().unwrap();

    let mut engine = Engine::<Folder>::new(meta.engine_config()).unwrap();
    engine.init(48000.0);
    assert_eq!(engine.oversampled_rate(), 384000.0);
    assert_eq!(engine.get_Tone(), 4000.0);
}

#[test]
fn test_manifest_mismatch_detected() {
    let renamed = WAVEFOLDER.replace("label = \"Tone\"", "label = \"Color\"");
    let meta = Manifest::from_toml(&renamed).unwrap().interpret().unwrap();
    let err = meta.check_processor::<Folder>().unwrap_err();
    assert!(matches!(err, MetaError::ProcessorMismatch(_)));
    assert!(err.to_string().contains("Color"));

    let stereo = WAVEFOLDER.replace("inputs = [\"In\"]", "inputs = [\"L\", \"R\"]");
    let meta = Manifest::from_toml(&stereo).unwrap().interpret().unwrap();
    assert!(matches!(
        meta.check_processor::<Folder>(),
        Err(MetaError::ProcessorMismatch(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Manifest::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, MetaError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "name = \"x\"\nidentifier = ");
    assert!(matches!(
        Manifest::load(&path),
        Err(MetaError::TomlParse(_))
    ));
}

#[test]
fn test_passive_widget_in_active_list() {
    let text = WAVEFOLDER.replace("type = \"checkbox\"", "type = \"vbargraph\"\nmin = 0\nmax = 1");
    let err = Manifest::from_toml(&text).unwrap().interpret().unwrap_err();
    assert_eq!(
        err.to_string(),
        "widget 'Bypass' of type 'vbargraph' cannot be active"
    );
}

#[test]
fn test_defines_reconfigure_engine() {
    let mut manifest = Manifest::from_toml(WAVEFOLDER).unwrap();
    manifest.apply_define("oversampling=2").unwrap();
    manifest.apply_define("max_frames=64").unwrap();
    let config = manifest.interpret().unwrap().engine_config();
    assert_eq!(config.factor, OversamplingFactor::X2);
    assert_eq!(config.max_segment_frames, 64);
}

#[test]
fn test_parameter_listing_json() {
    let meta = Manifest::from_toml(WAVEFOLDER).unwrap().interpret().unwrap();
    let json = serde_json::to_string(&meta.parameters()).unwrap();
    assert!(json.contains("\"symbol\":\"Tone\""));
    assert!(json.contains("\"unit\":\"Hz\""));
}
