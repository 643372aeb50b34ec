//! Serializable parameter listings.
//!
//! [`ParameterSummary`] gives compiled descriptors and manifest widgets the
//! same flat shape, so listings and JSON output look identical whichever
//! side they came from.

use halfband_core::{ParamDescriptor, ParamFlags};
use serde::Serialize;

use crate::widget::Widget;

/// One row of a parameter listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSummary {
    /// Position in the table.
    pub index: usize,
    /// Widget type name.
    pub kind: &'static str,
    /// Display label.
    pub label: String,
    /// Short label, or empty.
    pub short_label: String,
    /// Identifier.
    pub symbol: String,
    /// Unit, or empty.
    pub unit: String,
    /// Initial value.
    pub init: f32,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Increment.
    pub step: f32,
    /// `"linear"`, `"log"` or `"exp"`.
    pub scale: &'static str,
    /// Momentary control.
    pub trigger: bool,
    /// On/off control.
    pub boolean: bool,
    /// Whole-number control.
    pub integer: bool,
    /// Help text, or empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tooltip: String,
}

impl ParameterSummary {
    /// Summarizes a compiled descriptor.
    pub fn from_descriptor(index: usize, d: &ParamDescriptor) -> Self {
        Self {
            index,
            kind: d.kind.as_str(),
            label: d.label.to_string(),
            short_label: d.short_label.to_string(),
            symbol: d.symbol.to_string(),
            unit: d.unit.to_string(),
            init: d.range.init,
            min: d.range.min,
            max: d.range.max,
            step: d.step,
            scale: d.scale.as_str(),
            trigger: d.flags.contains(ParamFlags::TRIGGER),
            boolean: d.flags.contains(ParamFlags::BOOLEAN),
            integer: d.flags.contains(ParamFlags::INTEGER),
            tooltip: d.tooltip.to_string(),
        }
    }

    /// Summarizes a manifest widget.
    pub fn from_widget(index: usize, w: &Widget) -> Self {
        Self {
            index,
            kind: w.kind.as_str(),
            label: w.label.clone(),
            short_label: w.short_label.clone(),
            symbol: w.symbol.clone(),
            unit: w.unit.clone(),
            init: w.range.init,
            min: w.range.min,
            max: w.range.max,
            step: w.step,
            scale: w.scale.as_str(),
            trigger: w.is_trigger(),
            boolean: w.is_boolean(),
            integer: w.is_integer(),
            tooltip: w.tooltip.clone(),
        }
    }

    /// Summarizes a slice of descriptors in order.
    pub fn list(descriptors: &[ParamDescriptor]) -> Vec<Self> {
        descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| Self::from_descriptor(i, d))
            .collect()
    }

    /// Comma-separated flag names, or `-`.
    pub fn flag_names(&self) -> String {
        let names: Vec<&str> = [
            (self.trigger, "trigger"),
            (self.boolean, "boolean"),
            (self.integer, "integer"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();
        if names.is_empty() {
            "-".to_string()
        } else {
            names.join(",")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{WidgetList, WidgetSpec};
    use halfband_core::ScaleKind;

    #[test]
    fn descriptor_and_widget_agree() {
        let descriptor = ParamDescriptor::slider("Tone", 2000.0, 200.0, 12000.0, 1.0)
            .with_symbol("Tone")
            .with_unit("Hz")
            .with_scale(ScaleKind::Log);
        let spec = WidgetSpec::new("hslider", "Tone")
            .with_range(2000.0, 200.0, 12000.0, 1.0)
            .with_tag("unit", "Hz")
            .with_tag("scale", "log");
        let widget = Widget::from_spec(&spec, WidgetList::Active).unwrap();

        assert_eq!(
            ParameterSummary::from_descriptor(3, &descriptor),
            ParameterSummary::from_widget(3, &widget)
        );
    }

    #[test]
    fn flag_names() {
        let button = ParameterSummary::from_descriptor(0, &ParamDescriptor::button("Go"));
        assert_eq!(button.flag_names(), "trigger,boolean,integer");
        let slider = ParameterSummary::from_descriptor(
            0,
            &ParamDescriptor::slider("A", 0.0, 0.0, 1.0, 0.1),
        );
        assert_eq!(slider.flag_names(), "-");
    }

    #[test]
    fn serializes_to_json() {
        let summary = ParameterSummary::from_descriptor(
            1,
            &ParamDescriptor::checkbox("Bypass").with_symbol("Bypass"),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["index"], 1);
        assert_eq!(json["kind"], "checkbox");
        assert_eq!(json["symbol"], "Bypass");
        assert_eq!(json["boolean"], true);
        assert!(json.get("tooltip").is_none());
    }
}
