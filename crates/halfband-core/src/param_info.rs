//! Parameter metadata for inner-processor controls.
//!
//! Each control of an inner processor is described by a [`ParamDescriptor`]:
//! display strings, a [`ParamRange`], a [`ScaleKind`] and a set of
//! [`ParamFlags`]. Descriptors are built with `const fn` constructors so that a
//! processor's whole table can live in a `static` or associated `const`.
//!
//! # Flag derivation
//!
//! Flags are never set by hand. They follow from the widget kind and from the
//! flags explicitly requested through metadata tags
//! (see [`ParamFlags::derive`]):
//!
//! | Flag      | Set when |
//! |-----------|----------|
//! | `TRIGGER` | button, or tagged trigger |
//! | `BOOLEAN` | button or checkbox, or tagged boolean |
//! | `INTEGER` | boolean, or tagged integer |
//!
//! "Logarithmic" is not a flag: [`ParamDescriptor::is_logarithmic`] reports
//! `scale == ScaleKind::Log` only. An `Exp` scale is kept as metadata and does
//! not make a parameter logarithmic.
//!
//! # Example
//!
//! ```rust
//! use halfband_core::{ParamDescriptor, ScaleKind};
//!
//! const CUTOFF: ParamDescriptor = ParamDescriptor::slider("Cutoff", 1000.0, 20.0, 20000.0, 1.0)
//!     .with_unit("Hz")
//!     .with_scale(ScaleKind::Log);
//!
//! assert!(CUTOFF.is_logarithmic());
//! assert!(!CUTOFF.is_integer());
//! ```

/// Normalization curve declared by a control's `scale` tag.
///
/// # Normalization Formulas
///
/// - **Linear**: `(value - min) / (max - min)`
/// - **Log**: `(ln value - ln min) / (ln max - ln min)`, requires `min > 0`
/// - **Exp**: `(e^value - e^min) / (e^max - e^min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleKind {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    Log,
    /// Exponential mapping. More resolution at high values.
    Exp,
}

impl ScaleKind {
    /// Tag spelling of this scale kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Exp => "exp",
        }
    }
}

/// Kind of UI widget a control was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Momentary push button (active).
    Button,
    /// Latching toggle (active).
    Checkbox,
    /// Vertical slider (active).
    VSlider,
    /// Horizontal slider (active).
    HSlider,
    /// Numeric entry box (active).
    NumEntry,
    /// Vertical level meter (passive).
    VBarGraph,
    /// Horizontal level meter (passive).
    HBarGraph,
}

impl WidgetKind {
    /// Every widget kind, active kinds first.
    pub const ALL: [Self; 7] = [
        Self::Button,
        Self::Checkbox,
        Self::VSlider,
        Self::HSlider,
        Self::NumEntry,
        Self::VBarGraph,
        Self::HBarGraph,
    ];

    /// Returns `true` for input-like (automatable) widgets.
    pub const fn is_active(self) -> bool {
        !self.is_passive()
    }

    /// Returns `true` for output-like (metering) widgets.
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::VBarGraph | Self::HBarGraph)
    }

    /// Manifest spelling of this widget kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::VSlider => "vslider",
            Self::HSlider => "hslider",
            Self::NumEntry => "nentry",
            Self::VBarGraph => "vbargraph",
            Self::HBarGraph => "hbargraph",
        }
    }

    /// Parses a manifest spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Boolean properties of a control.
///
/// Bitflag type; use [`union`](Self::union) to combine.
///
/// ```rust
/// use halfband_core::{ParamFlags, WidgetKind};
///
/// let flags = ParamFlags::derive(WidgetKind::Checkbox, ParamFlags::NONE);
/// assert!(flags.contains(ParamFlags::BOOLEAN.union(ParamFlags::INTEGER)));
/// assert!(!flags.contains(ParamFlags::TRIGGER));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Momentary control; only the transition matters.
    pub const TRIGGER: Self = Self(1 << 0);
    /// Two-state control (0 or 1).
    pub const BOOLEAN: Self = Self(1 << 1);
    /// Whole-number control.
    pub const INTEGER: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no flag is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Derives a control's flags from its widget kind and tagged flags.
    ///
    /// `tagged` holds the flags requested explicitly by metadata tags
    /// (`trigger`, `boolean`, `integer`).
    pub const fn derive(kind: WidgetKind, tagged: Self) -> Self {
        let button = matches!(kind, WidgetKind::Button);
        let checkbox = matches!(kind, WidgetKind::Checkbox);

        let trigger = button || tagged.contains(Self::TRIGGER);
        let boolean = button || checkbox || tagged.contains(Self::BOOLEAN);
        let integer = boolean || tagged.contains(Self::INTEGER);

        let mut flags = Self::NONE;
        if trigger {
            flags = flags.union(Self::TRIGGER);
        }
        if boolean {
            flags = flags.union(Self::BOOLEAN);
        }
        if integer {
            flags = flags.union(Self::INTEGER);
        }
        flags
    }
}

/// Initial value and bounds of a control.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParamRange {
    /// Value after construction or a parameter reset.
    pub init: f32,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl ParamRange {
    /// Range of a button or checkbox: `0..=1`, initially 0.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a range.
    pub const fn new(init: f32, min: f32, max: f32) -> Self {
        Self { init, min, max }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Describes one control of an inner processor.
///
/// Strings are `'static` because descriptor tables are fixed per processor
/// type. The `symbol` is the stable identifier used by named accessors and by
/// [`ParameterTable::find_by_symbol`](crate::ParameterTable::find_by_symbol).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name (e.g. "Drive").
    pub label: &'static str,
    /// Abbreviated name for narrow displays; empty when not declared.
    pub short_label: &'static str,
    /// Identifier derived from the label or the `symbol` tag.
    pub symbol: &'static str,
    /// Unit string (e.g. "dB", "Hz"); empty for unitless controls.
    pub unit: &'static str,
    /// Free-form help text; empty when not declared.
    pub tooltip: &'static str,
    /// Widget the control was declared with.
    pub kind: WidgetKind,
    /// Initial value and bounds.
    pub range: ParamRange,
    /// Recommended increment.
    pub step: f32,
    /// Normalization curve.
    pub scale: ScaleKind,
    /// Derived boolean properties.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Creates a descriptor for any widget kind.
    ///
    /// Buttons and checkboxes ignore `range` and `step` and always span
    /// `0..=1` in steps of 1.
    pub const fn new(kind: WidgetKind, label: &'static str, range: ParamRange, step: f32) -> Self {
        let toggle = matches!(kind, WidgetKind::Button | WidgetKind::Checkbox);
        Self {
            label,
            short_label: "",
            symbol: "",
            unit: "",
            tooltip: "",
            kind,
            range: if toggle { ParamRange::UNIT } else { range },
            step: if toggle { 1.0 } else { step },
            scale: ScaleKind::Linear,
            flags: ParamFlags::derive(kind, ParamFlags::NONE),
        }
    }

    /// Horizontal slider.
    pub const fn slider(label: &'static str, init: f32, min: f32, max: f32, step: f32) -> Self {
        Self::new(
            WidgetKind::HSlider,
            label,
            ParamRange::new(init, min, max),
            step,
        )
    }

    /// Vertical slider.
    pub const fn vslider(label: &'static str, init: f32, min: f32, max: f32, step: f32) -> Self {
        Self::new(
            WidgetKind::VSlider,
            label,
            ParamRange::new(init, min, max),
            step,
        )
    }

    /// Numeric entry.
    pub const fn entry(label: &'static str, init: f32, min: f32, max: f32, step: f32) -> Self {
        Self::new(
            WidgetKind::NumEntry,
            label,
            ParamRange::new(init, min, max),
            step,
        )
    }

    /// Momentary button.
    pub const fn button(label: &'static str) -> Self {
        Self::new(WidgetKind::Button, label, ParamRange::UNIT, 1.0)
    }

    /// Toggle checkbox.
    pub const fn checkbox(label: &'static str) -> Self {
        Self::new(WidgetKind::Checkbox, label, ParamRange::UNIT, 1.0)
    }

    /// Horizontal level meter (passive).
    pub const fn bargraph(label: &'static str, min: f32, max: f32) -> Self {
        Self::new(
            WidgetKind::HBarGraph,
            label,
            ParamRange::new(min, min, max),
            0.0,
        )
    }

    /// Sets the abbreviated label.
    pub const fn with_short_label(mut self, short_label: &'static str) -> Self {
        self.short_label = short_label;
        self
    }

    /// Sets the identifier.
    pub const fn with_symbol(mut self, symbol: &'static str) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets the unit string.
    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the help text.
    pub const fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Sets the normalization curve.
    pub const fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }

    /// Re-derives the flags with explicitly tagged `trigger` / `boolean` /
    /// `integer` properties.
    pub const fn with_tagged_flags(mut self, tagged: ParamFlags) -> Self {
        self.flags = ParamFlags::derive(self.kind, tagged);
        self
    }

    /// Returns `true` for a momentary control.
    #[inline]
    pub const fn is_trigger(&self) -> bool {
        self.flags.contains(ParamFlags::TRIGGER)
    }

    /// Returns `true` for a two-state control.
    #[inline]
    pub const fn is_boolean(&self) -> bool {
        self.flags.contains(ParamFlags::BOOLEAN)
    }

    /// Returns `true` for a whole-number control.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        self.flags.contains(ParamFlags::INTEGER)
    }

    /// Returns `true` iff the scale kind is [`ScaleKind::Log`].
    #[inline]
    pub const fn is_logarithmic(&self) -> bool {
        matches!(self.scale, ScaleKind::Log)
    }

    /// Returns the label to show in narrow displays.
    ///
    /// Falls back to the full label when no short label was declared.
    pub fn display_short_label(&self) -> &'static str {
        if self.short_label.is_empty() {
            self.label
        } else {
            self.short_label
        }
    }

    /// Clamps a value to the declared bounds.
    ///
    /// The engine never clamps on its own; hosts that want bounded values
    /// call this before `set_parameter`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.range.min {
            self.range.min
        } else if value > self.range.max {
            self.range.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// ```rust
    /// use halfband_core::ParamDescriptor;
    ///
    /// let mix = ParamDescriptor::slider("Mix", 50.0, 0.0, 100.0, 1.0);
    /// assert_eq!(mix.normalize(25.0), 0.25);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let ParamRange { min, max, .. } = self.range;
        if max == min {
            return 0.0;
        }
        match self.scale {
            ScaleKind::Linear => (value - min) / (max - min),
            ScaleKind::Log => {
                if min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                let lo = libm::logf(min);
                (libm::logf(value) - lo) / (libm::logf(max) - lo)
            }
            ScaleKind::Exp => {
                let lo = libm::expf(min);
                (libm::expf(value) - lo) / (libm::expf(max) - lo)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let ParamRange { min, max, .. } = self.range;
        match self.scale {
            ScaleKind::Linear => min + normalized * (max - min),
            ScaleKind::Log => {
                if min <= 0.0 {
                    return min;
                }
                let lo = libm::logf(min);
                libm::expf(lo + normalized * (libm::logf(max) - lo))
            }
            ScaleKind::Exp => {
                let lo = libm::expf(min);
                libm::logf(lo + normalized * (libm::expf(max) - lo))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_derivation_table() {
        let derive = |kind| ParamFlags::derive(kind, ParamFlags::NONE);

        let button = derive(WidgetKind::Button);
        assert!(button.contains(ParamFlags::TRIGGER));
        assert!(button.contains(ParamFlags::BOOLEAN));
        assert!(button.contains(ParamFlags::INTEGER));

        let checkbox = derive(WidgetKind::Checkbox);
        assert!(!checkbox.contains(ParamFlags::TRIGGER));
        assert!(checkbox.contains(ParamFlags::BOOLEAN.union(ParamFlags::INTEGER)));

        for kind in [WidgetKind::HSlider, WidgetKind::VSlider, WidgetKind::NumEntry] {
            assert!(derive(kind).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn tagged_flags() {
        let slider = WidgetKind::HSlider;
        assert_eq!(
            ParamFlags::derive(slider, ParamFlags::INTEGER),
            ParamFlags::INTEGER
        );
        assert_eq!(
            ParamFlags::derive(slider, ParamFlags::BOOLEAN),
            ParamFlags::BOOLEAN.union(ParamFlags::INTEGER)
        );
        let trig = ParamFlags::derive(slider, ParamFlags::TRIGGER);
        assert!(trig.contains(ParamFlags::TRIGGER));
        assert!(!trig.contains(ParamFlags::BOOLEAN));
    }

    #[test]
    fn toggles_force_unit_range() {
        let button = ParamDescriptor::new(
            WidgetKind::Button,
            "Reset",
            ParamRange::new(5.0, -3.0, 9.0),
            0.1,
        );
        assert_eq!(button.range, ParamRange::UNIT);
        assert_eq!(button.step, 1.0);

        let checkbox = ParamDescriptor::checkbox("Bypass");
        assert_eq!(checkbox.range, ParamRange::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn logarithmic_only_for_log_scale() {
        let base = ParamDescriptor::slider("Freq", 440.0, 20.0, 20000.0, 1.0);
        assert!(!base.is_logarithmic());
        assert!(base.with_scale(ScaleKind::Log).is_logarithmic());
        assert!(!base.with_scale(ScaleKind::Exp).is_logarithmic());
    }

    #[test]
    fn linear_normalization() {
        let desc = ParamDescriptor::slider("Level", 0.0, -60.0, 0.0, 0.5);
        assert_eq!(desc.normalize(-60.0), 0.0);
        assert_eq!(desc.normalize(-30.0), 0.5);
        assert_eq!(desc.denormalize(1.0), 0.0);
    }

    #[test]
    fn log_normalization_is_geometric() {
        let desc = ParamDescriptor::slider("Freq", 1000.0, 20.0, 20000.0, 1.0)
            .with_scale(ScaleKind::Log);
        // Geometric midpoint of 20..20000.
        let mid = libm::sqrtf(20.0 * 20000.0);
        assert!((desc.normalize(mid) - 0.5).abs() < 1e-4);
        assert!((desc.denormalize(0.5) - mid).abs() < 0.5);
        assert_eq!(desc.normalize(-1.0), 0.0);
    }

    #[test]
    fn exp_normalization_round_trips() {
        let desc = ParamDescriptor::slider("Curve", 0.5, 0.0, 2.0, 0.01).with_scale(ScaleKind::Exp);
        for v in [0.0_f32, 0.3, 1.0, 1.7, 2.0] {
            let back = desc.denormalize(desc.normalize(v));
            assert!((back - v).abs() < 1e-4, "{v} -> {back}");
        }
        // More resolution toward the top of the range.
        assert!(desc.normalize(1.0) < 0.5);
    }

    #[test]
    fn degenerate_range_normalizes_to_zero() {
        let desc = ParamDescriptor::slider("Fixed", 1.0, 1.0, 1.0, 0.0);
        assert_eq!(desc.normalize(1.0), 0.0);
    }

    #[test]
    fn clamp_and_contains() {
        let desc = ParamDescriptor::slider("Gain", 0.0, -12.0, 12.0, 0.1);
        assert_eq!(desc.clamp(-20.0), -12.0);
        assert_eq!(desc.clamp(20.0), 12.0);
        assert_eq!(desc.clamp(3.0), 3.0);
        assert!(desc.range.contains(12.0));
        assert!(!desc.range.contains(12.5));
    }

    #[test]
    fn widget_names() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(WidgetKind::from_name("knob"), None);
        assert!(WidgetKind::VBarGraph.is_passive());
        assert!(WidgetKind::NumEntry.is_active());
    }

    #[test]
    fn short_label_falls_back() {
        let desc = ParamDescriptor::slider("Output Level", 0.0, 0.0, 1.0, 0.01);
        assert_eq!(desc.display_short_label(), "Output Level");
        assert_eq!(desc.with_short_label("Out").display_short_label(), "Out");
    }
}
