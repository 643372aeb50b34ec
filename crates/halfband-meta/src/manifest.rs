//! Processor manifest loading and validation.
//!
//! A manifest is a TOML file describing one processor: file metadata,
//! channel names, the oversampling setup and its widgets.
//!
//! ```toml
//! name = "Wavefolder"
//! author = "Suds"
//! license = "MIT"
//! version = "1.0"
//! identifier = "Wavefolder"
//! inputs = ["In"]
//! outputs = ["Out [meter:peak]"]
//! oversampling = 8
//! max_frames = 512
//!
//! [meta]
//! description = "Sine fold with tone control"
//!
//! [[active]]
//! type = "hslider"
//! label = "Tone"
//! init = "4000.0f"
//! min = 200
//! max = 16000
//! step = 1
//! meta = [["unit", "Hz"], ["scale", "log"]]
//! ```
//!
//! [`Manifest::interpret`] checks everything and produces a
//! [`ProcessorMeta`], from which an [`EngineConfig`] can be built.

use std::collections::BTreeMap;
use std::path::Path;

use halfband_core::{
    ChannelSide, EngineConfig, EngineError, InnerProcessor, InnerRate, MAX_CHANNELS,
    OversamplingFactor, ParamDescriptor, ParameterTable,
};
use serde::Deserialize;

use crate::error::MetaError;
use crate::mangle::{is_valid_identifier, mangle};
use crate::summary::ParameterSummary;
use crate::tags::{TagValue, Tags, split_label};
use crate::widget::{Widget, WidgetList, WidgetSpec};

fn default_oversampling() -> usize {
    1
}

fn default_max_frames() -> usize {
    EngineConfig::DEFAULT_MAX_SEGMENT_FRAMES
}

/// A processor manifest as written on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Processor name.
    pub name: String,

    /// Author.
    #[serde(default)]
    pub author: String,

    /// Copyright notice.
    #[serde(default)]
    pub copyright: String,

    /// License.
    #[serde(default)]
    pub license: String,

    /// Version string.
    #[serde(default)]
    pub version: String,

    /// Class identifier; must already be a valid identifier.
    pub identifier: String,

    /// Input channel names, in controller-string form.
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Output channel names, in controller-string form.
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Oversampling factor: 1, 2, 4, 8 or 16.
    #[serde(default = "default_oversampling")]
    pub oversampling: usize,

    /// Longest segment handed to the processor, in host frames.
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,

    /// Free file-level metadata.
    #[serde(default)]
    pub meta: BTreeMap<String, String>,

    /// Extra generator defines.
    #[serde(default)]
    pub defines: BTreeMap<String, String>,

    /// Controls.
    #[serde(default)]
    pub active: Vec<WidgetSpec>,

    /// Meters.
    #[serde(default)]
    pub passive: Vec<WidgetSpec>,
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetaError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| MetaError::read_file(path, e))?;
        let manifest = Self::from_toml(&contents)?;
        tracing::debug!(
            path = %path.display(),
            name = %manifest.name,
            active = manifest.active.len(),
            passive = manifest.passive.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, MetaError> {
        Ok(toml::from_str(s)?)
    }

    /// Applies a `KEY=VALUE` define.
    ///
    /// `identifier`, `name`, `oversampling` and `max_frames` override the
    /// manifest fields; any other key is recorded in `defines`.
    pub fn apply_define(&mut self, define: &str) -> Result<(), MetaError> {
        let (key, value) = define
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| MetaError::InvalidDefine(define.to_string()))?;
        let key = key.trim();

        match key {
            "identifier" => self.identifier = value.to_string(),
            "name" => self.name = value.to_string(),
            "oversampling" => self.oversampling = parse_count(key, value)?,
            "max_frames" => self.max_frames = parse_count(key, value)?,
            _ => {
                self.defines.insert(key.to_string(), value.to_string());
            }
        }
        tracing::debug!(key, value, "applied define");
        Ok(())
    }

    /// Validates the manifest and interprets its widgets and tags.
    pub fn interpret(&self) -> Result<ProcessorMeta, MetaError> {
        if !is_valid_identifier(&self.identifier) {
            return Err(MetaError::InvalidIdentifier(self.identifier.clone()));
        }

        let factor = OversamplingFactor::try_from(self.oversampling)?;
        if self.max_frames == 0 {
            return Err(EngineError::ZeroSegmentLength.into());
        }

        let inputs = channels(&self.inputs, ChannelSide::Input)?;
        let outputs = channels(&self.outputs, ChannelSide::Output)?;
        let active = widgets(&self.active, WidgetList::Active)?;
        let passive = widgets(&self.passive, WidgetList::Passive)?;

        let typed = |map: &BTreeMap<String, String>| {
            map.iter()
                .map(|(k, v)| (k.clone(), TagValue::parse(v)))
                .collect::<Vec<_>>()
        };

        Ok(ProcessorMeta {
            name: self.name.clone(),
            author: self.author.clone(),
            copyright: self.copyright.clone(),
            license: self.license.clone(),
            version: self.version.clone(),
            identifier: self.identifier.clone(),
            inputs,
            outputs,
            factor,
            max_segment_frames: self.max_frames,
            meta: typed(&self.meta),
            defines: typed(&self.defines),
            active,
            passive,
        })
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, MetaError> {
    match TagValue::parse(value.trim()) {
        TagValue::Int(n) if n >= 0 => Ok(n as usize),
        _ => Err(MetaError::invalid_number(key, value)),
    }
}

fn channels(names: &[String], side: ChannelSide) -> Result<Vec<Channel>, MetaError> {
    if names.len() > MAX_CHANNELS {
        return Err(EngineError::TooManyChannels {
            side,
            count: names.len(),
        }
        .into());
    }
    Ok(names
        .iter()
        .map(|text| {
            let (name, tags) = split_label(text);
            Channel { name, tags }
        })
        .collect())
}

fn widgets(specs: &[WidgetSpec], list: WidgetList) -> Result<Vec<Widget>, MetaError> {
    let mut out: Vec<Widget> = Vec::with_capacity(specs.len());
    for spec in specs {
        let widget = Widget::from_spec(spec, list)?;
        if out.iter().any(|w| w.symbol == widget.symbol) {
            return Err(MetaError::DuplicateSymbol(widget.symbol));
        }
        out.push(widget);
    }
    Ok(out)
}

/// A named audio channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Trimmed channel name.
    pub name: String,
    /// Tags following the name.
    pub tags: Tags,
}

/// A validated, interpreted manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorMeta {
    /// Processor name.
    pub name: String,
    /// Author.
    pub author: String,
    /// Copyright notice.
    pub copyright: String,
    /// License.
    pub license: String,
    /// Version string.
    pub version: String,
    /// Class identifier.
    pub identifier: String,
    /// Input channels.
    pub inputs: Vec<Channel>,
    /// Output channels.
    pub outputs: Vec<Channel>,
    /// Oversampling factor.
    pub factor: OversamplingFactor,
    /// Segment cap in host frames.
    pub max_segment_frames: usize,
    /// Typed file-level metadata, sorted by key.
    pub meta: Vec<(String, TagValue)>,
    /// Typed defines, sorted by key.
    pub defines: Vec<(String, TagValue)>,
    /// Controls.
    pub active: Vec<Widget>,
    /// Meters.
    pub passive: Vec<Widget>,
}

impl ProcessorMeta {
    /// Engine configuration described by the manifest.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
            factor: self.factor,
            max_segment_frames: self.max_segment_frames,
            inner_rate: InnerRate::Host,
        }
    }

    /// Listing of the controls.
    pub fn parameters(&self) -> Vec<ParameterSummary> {
        self.active
            .iter()
            .enumerate()
            .map(|(i, w)| ParameterSummary::from_widget(i, w))
            .collect()
    }

    /// Listing of the meters.
    pub fn meters(&self) -> Vec<ParameterSummary> {
        self.passive
            .iter()
            .enumerate()
            .map(|(i, w)| ParameterSummary::from_widget(i, w))
            .collect()
    }

    /// Checks that processor type `P` has the channels, controls and meters
    /// this manifest describes.
    pub fn check_processor<P: InnerProcessor>(&self) -> Result<(), MetaError> {
        if self.inputs.len() != P::INPUTS || self.outputs.len() != P::OUTPUTS {
            return Err(MetaError::ProcessorMismatch(format!(
                "manifest has {}in/{}out, processor has {}in/{}out",
                self.inputs.len(),
                self.outputs.len(),
                P::INPUTS,
                P::OUTPUTS
            )));
        }

        let table = ParameterTable::<P>::of();
        compare_symbols("control", &self.active, table.descriptors())?;
        compare_symbols("meter", &self.passive, P::meters().iter())
    }
}

fn descriptor_symbol(d: &ParamDescriptor) -> String {
    if d.symbol.is_empty() {
        mangle(d.label)
    } else {
        d.symbol.to_string()
    }
}

fn compare_symbols<'a>(
    what: &str,
    widgets: &[Widget],
    descriptors: impl Iterator<Item = &'a ParamDescriptor>,
) -> Result<(), MetaError> {
    let expected: Vec<String> = descriptors.map(descriptor_symbol).collect();
    let found: Vec<&str> = widgets.iter().map(|w| w.symbol.as_str()).collect();
    if expected != found {
        return Err(MetaError::ProcessorMismatch(format!(
            "{what} symbols differ: manifest {found:?}, processor {expected:?}"
        )));
    }
    Ok(())
}
