//! Browser frontend of the fish demo.
//!
//! Renders the scene into a canvas element and builds a control panel
//! from the widget descriptors with plain DOM elements. The panel and
//! the frame callback share the controls through an `Rc<RefCell<_>>`;
//! widget callbacks write new values, the frame callback reads them
//! once per frame.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow::Continue;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use re::prelude::*;

use re_demos::controls::{Controls, Widget, WIDGETS};
use re_demos::fish::{Scene, camera};
use re_front::{dims::SVGA_800_600, wasm::Window};

// Entry point from JS
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let mut win = Window::builder()
        .dims(SVGA_800_600)
        .build()
        .expect("could not create window");
    win.ctx.color_clear = Some(rgba(102, 51, 51, 0xFF));

    let ctl = Rc::new(RefCell::new(Controls::default()));
    let reload = Rc::new(Cell::new(false));
    build_gui(&ctl, &reload).expect("could not build the control panel");

    let mut scene = Scene::load(&ctl.borrow());
    let mut cam = camera(win.dims);

    let mut frame_count = 0;
    win.run(move |frame| {
        cam.update();

        let ctl = ctl.borrow();
        if reload.replace(false) {
            scene = Scene::load(&ctl);
        } else {
            scene.refresh(&ctl);
        }
        scene.draw(&cam, &ctl, frame_count, &mut frame.buf, frame.ctx);
        frame_count += 1;
        Continue(())
    });
}

/// Builds the control panel under the document body and wires its
/// callbacks. A failure to create any DOM element is fatal at startup.
fn build_gui(
    ctl: &Rc<RefCell<Controls>>,
    reload: &Rc<Cell<bool>>,
) -> Result<(), &'static str> {
    const ERR: &str = "could not create a widget";

    let doc = Window::document().ok_or("could not access the document")?;
    let body = doc.body().ok_or("document has no body")?;

    let panel = doc.create_element("div").map_err(|_| ERR)?;
    body.append_child(&panel).map_err(|_| ERR)?;

    let mut sliders = Vec::new();
    for w in &WIDGETS {
        sliders.push((add_slider(&doc, &panel, w, ctl)?, w.field));
    }

    let base = add_color(&doc, &panel, "Base color")?;
    base.set_value(&hex(ctl.borrow().base_color));
    let cb = {
        let ctl = ctl.clone();
        let input = base.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(c) = parse_hex(&input.value()) {
                ctl.borrow_mut().base_color = c;
            }
        })
    };
    base.set_oninput(Some(cb.as_ref().unchecked_ref()));
    cb.forget();

    let edge = add_color(&doc, &panel, "Edge color")?;
    edge.set_value(&hex(ctl.borrow().edge_color));
    let cb = {
        let ctl = ctl.clone();
        let input = edge.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(c) = parse_hex(&input.value()) {
                ctl.borrow_mut().edge_color = c;
            }
        })
    };
    edge.set_oninput(Some(cb.as_ref().unchecked_ref()));
    cb.forget();

    let button = doc.create_element("button").map_err(|_| ERR)?;
    button.set_text_content(Some("Load Scene"));
    panel.append_child(&button).map_err(|_| ERR)?;
    let button: HtmlElement = button.dyn_into().map_err(|_| ERR)?;
    let cb = {
        let ctl = ctl.clone();
        let reload = reload.clone();
        Closure::<dyn FnMut()>::new(move || {
            *ctl.borrow_mut() = Controls::default();
            reload.set(true);
            // Make the widgets show the restored defaults
            let ctl = ctl.borrow();
            for (input, field) in &sliders {
                input.set_value(&ctl.get(*field).to_string());
            }
            base.set_value(&hex(ctl.base_color));
            edge.set_value(&hex(ctl.edge_color));
        })
    };
    button.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();

    Ok(())
}

/// Appends a labeled range input bound to the field of `w`.
fn add_slider(
    doc: &Document,
    panel: &Element,
    w: &Widget,
    ctl: &Rc<RefCell<Controls>>,
) -> Result<HtmlInputElement, &'static str> {
    const ERR: &str = "could not create a widget";

    let label = doc.create_element("label").map_err(|_| ERR)?;
    label.set_text_content(Some(w.label));

    let input: HtmlInputElement = doc
        .create_element("input")
        .map_err(|_| ERR)?
        .dyn_into()
        .map_err(|_| ERR)?;
    input.set_type("range");
    input.set_min(&w.min.to_string());
    input.set_max(&w.max.to_string());
    input.set_step(&w.step.to_string());
    input.set_value(&ctl.borrow().get(w.field).to_string());

    let cb = {
        let ctl = ctl.clone();
        let input = input.clone();
        let field = w.field;
        Closure::<dyn FnMut()>::new(move || {
            if let Ok(v) = input.value().parse() {
                ctl.borrow_mut().set(field, v);
            }
        })
    };
    input.set_oninput(Some(cb.as_ref().unchecked_ref()));
    cb.forget();

    label.append_child(&input).map_err(|_| ERR)?;
    panel.append_child(&label).map_err(|_| ERR)?;
    Ok(input)
}

/// Appends a labeled color input, without wiring a callback.
fn add_color(
    doc: &Document,
    panel: &Element,
    text: &str,
) -> Result<HtmlInputElement, &'static str> {
    const ERR: &str = "could not create a widget";

    let label = doc.create_element("label").map_err(|_| ERR)?;
    label.set_text_content(Some(text));

    let input: HtmlInputElement = doc
        .create_element("input")
        .map_err(|_| ERR)?
        .dyn_into()
        .map_err(|_| ERR)?;
    input.set_type("color");

    label.append_child(&input).map_err(|_| ERR)?;
    panel.append_child(&label).map_err(|_| ERR)?;
    Ok(input)
}

/// Formats the RGB part of `c` as a `#rrggbb` hex string.
///
/// The color input element does not support an alpha channel.
fn hex(c: Color4) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

/// Parses a `#rrggbb` hex string into a fully opaque color.
fn parse_hex(s: &str) -> Option<Color4> {
    let s = s.strip_prefix('#')?;
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(s.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(s.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(s.get(4..6)?, 16).ok()?;
    Some(rgba(r, g, b, 0xFF))
}

#[cfg(test)]
mod tests {
    use re::math::color::rgba;

    use super::{hex, parse_hex};

    #[test]
    fn color_to_hex_and_back() {
        let c = rgba(155, 0, 230, 0xFF);
        assert_eq!(hex(c), "#9b00e6");
        assert_eq!(parse_hex(&hex(c)), Some(c));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(parse_hex("9b00e6"), None);
        assert_eq!(parse_hex("#9b00e"), None);
        assert_eq!(parse_hex("#9b00zz"), None);
        assert_eq!(parse_hex("#9b00é"), None);
    }
}
