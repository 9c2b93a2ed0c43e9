use std::ops::ControlFlow::Continue;

use minifb::{Key, KeyRepeat, WindowOptions};

use re::prelude::*;

use re_front::{dims::SVGA_800_600, minifb::Window};
use redfin_demos::controls::{Controls, WIDGETS};
use redfin_demos::fish::{Scene, camera};

fn main() {
    let mut win = Window::builder()
        .title("redfin//fish")
        .dims(SVGA_800_600)
        .options(WindowOptions { resize: true, ..WindowOptions::default() })
        .build()
        .unwrap();

    win.ctx.color_clear = Some(rgba(102, 51, 51, 0xFF));

    let mut ctl = Controls::default();
    let mut scene = Scene::load(&ctl);
    let mut cam = camera(win.dims);

    let mut sel = 0;
    let mut frame_count = 0;
    win.run(|frame| {
        let dims = frame.buf.color_buf.dims();
        if dims != cam.dims {
            cam.set_size(dims);
        }
        cam.update();

        let imp = &frame.win.imp;
        if imp.is_key_pressed(Key::Tab, KeyRepeat::No) {
            sel = (sel + 1) % WIDGETS.len();
            let w = &WIDGETS[sel];
            println!("{}: {}", w.label, ctl.get(w.field));
        }
        let w = &WIDGETS[sel];
        if imp.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            ctl.set(w.field, ctl.get(w.field) + w.step);
            println!("{}: {}", w.label, ctl.get(w.field));
        } else if imp.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            ctl.set(w.field, ctl.get(w.field) - w.step);
            println!("{}: {}", w.label, ctl.get(w.field));
        }
        if imp.is_key_pressed(Key::R, KeyRepeat::No) {
            ctl = Controls::default();
            scene = Scene::load(&ctl);
        }

        scene.refresh(&ctl);
        scene.draw(&cam, &ctl, frame_count, &mut frame.buf, frame.ctx);
        frame_count += 1;
        Continue(())
    });
}
