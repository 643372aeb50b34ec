//! Widget declarations and their interpretation.
//!
//! A [`WidgetSpec`] is what a manifest says; a [`Widget`] is what it means:
//! the kind is checked against the list it sits in, toggle ranges are
//! forced, interpreted tags are pulled out and flags are derived.

use halfband_core::{ParamFlags, ParamRange, ScaleKind, WidgetKind};
use serde::Deserialize;

use crate::error::MetaError;
use crate::mangle::mangle;
use crate::tags::{Tags, parse_float_literal};

/// Which widget list a declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetList {
    /// Controls written by the host.
    Active,
    /// Meters written by the processor.
    Passive,
}

impl WidgetList {
    /// Lowercase name, as used in manifests.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passive => "passive",
        }
    }

    fn accepts(self, kind: WidgetKind) -> bool {
        match self {
            Self::Active => kind.is_active(),
            Self::Passive => kind.is_passive(),
        }
    }
}

/// A number written either as a TOML number or as a C literal string
/// such as `"0.5f"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumLiteral {
    /// Plain TOML integer or float.
    Number(f64),
    /// C-style literal text.
    Text(String),
}

impl NumLiteral {
    /// Resolves the literal to `f32`; `field` names it in errors.
    pub fn resolve(&self, field: &str) -> Result<f32, MetaError> {
        match self {
            Self::Number(n) => Ok(*n as f32),
            Self::Text(text) => {
                parse_float_literal(text).ok_or_else(|| MetaError::invalid_number(field, text))
            }
        }
    }
}

/// A widget exactly as declared in a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetSpec {
    /// Type name: `button`, `checkbox`, `hslider`, `vslider`, `nentry`,
    /// `hbargraph` or `vbargraph`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label.
    pub label: String,
    /// Name of the backing field, if the generator recorded one.
    #[serde(default)]
    pub var: Option<String>,
    /// Initial value (sliders and entries).
    #[serde(default)]
    pub init: Option<NumLiteral>,
    /// Lower bound.
    #[serde(default)]
    pub min: Option<NumLiteral>,
    /// Upper bound.
    #[serde(default)]
    pub max: Option<NumLiteral>,
    /// Increment (sliders and entries).
    #[serde(default)]
    pub step: Option<NumLiteral>,
    /// Ordered `[key, value]` tags.
    #[serde(default)]
    pub meta: Vec<(String, String)>,
}

impl WidgetSpec {
    /// Creates a spec with no values and no tags.
    pub fn new(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            var: None,
            init: None,
            min: None,
            max: None,
            step: None,
            meta: Vec::new(),
        }
    }

    /// Sets init, min, max and step.
    pub fn with_range(mut self, init: f64, min: f64, max: f64, step: f64) -> Self {
        self.init = Some(NumLiteral::Number(init));
        self.min = Some(NumLiteral::Number(min));
        self.max = Some(NumLiteral::Number(max));
        self.step = Some(NumLiteral::Number(step));
        self
    }

    /// Appends a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.push((key.into(), value.into()));
        self
    }

    fn value(&self, literal: Option<&NumLiteral>, field: &'static str) -> Result<f32, MetaError> {
        literal
            .ok_or_else(|| MetaError::missing_value(&self.label, field))?
            .resolve(&format!("{}.{field}", self.label))
    }
}

/// An interpreted widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Widget kind.
    pub kind: WidgetKind,
    /// Display label.
    pub label: String,
    /// Backing field name; empty when not recorded.
    pub var: String,
    /// Identifier: mangled `symbol` tag, or mangled label.
    pub symbol: String,
    /// Value of the `abbrev` tag, or empty.
    pub short_label: String,
    /// Value of the `unit` tag, or empty.
    pub unit: String,
    /// Value of the `tooltip` tag, or empty.
    pub tooltip: String,
    /// Scale from the `scale` tag.
    pub scale: ScaleKind,
    /// Initial value and bounds.
    pub range: ParamRange,
    /// Increment; zero for meters.
    pub step: f32,
    /// Derived flags.
    pub flags: ParamFlags,
    /// Remaining tags, ordering tags removed.
    pub tags: Tags,
}

impl Widget {
    /// Interprets `spec` as a member of `list`.
    pub fn from_spec(spec: &WidgetSpec, list: WidgetList) -> Result<Self, MetaError> {
        let kind =
            WidgetKind::from_name(&spec.kind).ok_or_else(|| MetaError::UnsupportedWidget {
                label: spec.label.clone(),
                kind: spec.kind.clone(),
            })?;

        if !list.accepts(kind) {
            return Err(MetaError::WidgetPlacement {
                label: spec.label.clone(),
                kind: spec.kind.clone(),
                list: list.as_str(),
            });
        }

        let (range, step) = match kind {
            WidgetKind::Button | WidgetKind::Checkbox => (ParamRange::UNIT, 1.0),
            WidgetKind::HBarGraph | WidgetKind::VBarGraph => {
                let min = spec.value(spec.min.as_ref(), "min")?;
                let max = spec.value(spec.max.as_ref(), "max")?;
                (ParamRange::new(min, min, max), 0.0)
            }
            WidgetKind::HSlider | WidgetKind::VSlider | WidgetKind::NumEntry => {
                let init = spec.value(spec.init.as_ref(), "init")?;
                let min = spec.value(spec.min.as_ref(), "min")?;
                let max = spec.value(spec.max.as_ref(), "max")?;
                let step = spec.value(spec.step.as_ref(), "step")?;
                (ParamRange::new(init, min, max), step)
            }
        };

        let tags = Tags::new(spec.meta.iter().cloned());
        let scale = tags
            .get("scale")
            .map_or(ScaleKind::Linear, |name| parse_scale(&spec.label, name));

        let mut tagged = ParamFlags::NONE;
        if tags.contains("trigger") {
            tagged = tagged.union(ParamFlags::TRIGGER);
        }
        if tags.contains("boolean") {
            tagged = tagged.union(ParamFlags::BOOLEAN);
        }
        if tags.contains("integer") {
            tagged = tagged.union(ParamFlags::INTEGER);
        }

        Ok(Self {
            kind,
            label: spec.label.clone(),
            var: spec.var.clone().unwrap_or_default(),
            symbol: mangle(tags.get("symbol").unwrap_or(&spec.label)),
            short_label: tags.get("abbrev").unwrap_or_default().to_string(),
            unit: tags.get("unit").unwrap_or_default().to_string(),
            tooltip: tags.get("tooltip").unwrap_or_default().to_string(),
            scale,
            range,
            step,
            flags: ParamFlags::derive(kind, tagged),
            tags,
        })
    }

    /// Returns `true` for momentary controls.
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(ParamFlags::TRIGGER)
    }

    /// Returns `true` for on/off controls.
    pub fn is_boolean(&self) -> bool {
        self.flags.contains(ParamFlags::BOOLEAN)
    }

    /// Returns `true` for whole-number controls.
    pub fn is_integer(&self) -> bool {
        self.flags.contains(ParamFlags::INTEGER)
    }

    /// Returns `true` if the scale is logarithmic.
    pub fn is_logarithmic(&self) -> bool {
        self.scale == ScaleKind::Log
    }
}

/// Unknown scale names fall back to linear with a warning.
fn parse_scale(label: &str, name: &str) -> ScaleKind {
    match name {
        "log" => ScaleKind::Log,
        "exp" => ScaleKind::Exp,
        "linear" | "" => ScaleKind::Linear,
        other => {
            tracing::warn!(widget = %label, scale = %other, "unrecognized scale type, using linear");
            ScaleKind::Linear
        }
    }
}
