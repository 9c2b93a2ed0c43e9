//! Render parameters adjustable while the demo is running.

use re::math::color::{Color4, rgba};

/// The adjustable parameters of the fish scene.
///
/// A single instance is the source of truth for both the GUI layer and
/// the frame loop: widget callbacks write to it between frames and the
/// renderer reads it once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    /// Icosphere subdivision level.
    pub tessellation: u32,
    /// Animation speed multiplier. Zero freezes the animation.
    pub speed: f32,
    /// Height where the dorsal fin begins, as a fraction of the body.
    pub fin_start: f32,
    /// Body coordinate where the tail sway begins.
    pub tail_start: f32,
    /// Base color of the body.
    pub base_color: Color4,
    /// Accent color of the fin and the eyes.
    pub edge_color: Color4,
}

/// Identifies one scalar field of [`Controls`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Field {
    Tessellation,
    Speed,
    FinStart,
    TailStart,
}

/// Descriptor of a scalar control widget.
///
/// Consumed by the GUI builders: the wasm frontend turns each entry into
/// a range input, the native binary into a key binding.
#[derive(Copy, Clone, Debug)]
pub struct Widget {
    pub label: &'static str,
    pub field: Field,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// The scalar control widgets of the demo, indexed by `Field` discriminant.
#[rustfmt::skip]
pub const WIDGETS: [Widget; 4] = [
    Widget { label: "Tessellation", field: Field::Tessellation, min: 0.0, max: 8.0, step: 1.0 },
    Widget { label: "Speed", field: Field::Speed, min: 0.0, max: 8.0, step: 0.25 },
    Widget { label: "Fin start", field: Field::FinStart, min: 0.6, max: 1.0, step: 0.05 },
    Widget { label: "Tail start", field: Field::TailStart, min: -3.0, max: 0.5, step: 0.05 },
];

//
// Inherent impls
//

impl Field {
    /// Returns the widget descriptor bound to this field.
    pub fn widget(self) -> &'static Widget {
        &WIDGETS[self as usize]
    }
}

impl Controls {
    /// Returns the value of the field `f`.
    pub fn get(&self, f: Field) -> f32 {
        use Field::*;
        match f {
            Tessellation => self.tessellation as f32,
            Speed => self.speed,
            FinStart => self.fin_start,
            TailStart => self.tail_start,
        }
    }

    /// Sets the field `f` to `val`, clamped to the range of its widget.
    pub fn set(&mut self, f: Field, val: f32) {
        use Field::*;
        let Widget { min, max, .. } = *f.widget();
        let val = val.clamp(min, max);
        match f {
            Tessellation => self.tessellation = val.round() as u32,
            Speed => self.speed = val,
            FinStart => self.fin_start = val,
            TailStart => self.tail_start = val,
        }
    }
}

//
// Trait impls
//

impl Default for Controls {
    /// Returns the initial parameters of the scene.
    fn default() -> Self {
        Self {
            tessellation: 5,
            speed: 1.0,
            fin_start: 0.85,
            tail_start: -0.5,
            base_color: rgba(155, 0, 0, 255),
            edge_color: rgba(230, 230, 0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widgets_indexed_by_field_discriminant() {
        for (i, w) in WIDGETS.iter().enumerate() {
            assert_eq!(w.field as usize, i, "{}", w.label);
        }
    }

    #[test]
    fn defaults_lie_within_widget_ranges() {
        let ctl = Controls::default();
        for w in &WIDGETS {
            let val = ctl.get(w.field);
            assert!(w.min <= val && val <= w.max, "{}", w.label);
        }
    }

    #[test]
    fn set_clamps_to_widget_range() {
        let mut ctl = Controls::default();

        ctl.set(Field::Speed, 99.0);
        assert_eq!(ctl.speed, 8.0);
        ctl.set(Field::Speed, -1.0);
        assert_eq!(ctl.speed, 0.0);

        ctl.set(Field::TailStart, -99.0);
        assert_eq!(ctl.tail_start, -3.0);

        ctl.set(Field::Tessellation, 100.0);
        assert_eq!(ctl.tessellation, 8);
    }

    #[test]
    fn set_assigns_in_range_values_exactly() {
        let mut ctl = Controls::default();

        ctl.set(Field::FinStart, 0.7);
        assert_eq!(ctl.fin_start, 0.7);

        ctl.set(Field::Tessellation, 3.0);
        assert_eq!(ctl.tessellation, 3);
    }
}
