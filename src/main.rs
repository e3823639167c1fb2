// main.rs — desktop host: window, event routing, menus and status bar around the sphere

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console window in release builds

mod i18n;
mod renderer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use glam::IVec2;
use renderer::Renderer;
use sphere_wireframe::{RenderTarget, SphereScene};
use winit::{
    dpi::{LogicalPosition, LogicalSize, PhysicalPosition},
    event::*,
    event_loop::EventLoop,
    window::{Fullscreen, Window, WindowBuilder},
};

/// Cursor position in whole logical pixels, so drag sensitivity does not
/// depend on the display's scale factor.
fn to_pointer(position: PhysicalPosition<f64>, scale_factor: f64) -> IVec2 {
    let p: LogicalPosition<f64> = position.to_logical(scale_factor);
    IVec2::new(p.x.round() as i32, p.y.round() as i32)
}

fn toggle_fullscreen(window: &Window, is_fullscreen: &mut bool) {
    *is_fullscreen = !*is_fullscreen;
    if *is_fullscreen {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        window.set_fullscreen(None);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut current_lang = i18n::resolve_lang_from_args();
    i18n::init(current_lang.clone());

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(i18n::tr("app.title"))
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)
            .context("failed to create the main window")?,
    );

    let mut scene = SphereScene::new();
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), scene.style.background))?;

    let mut cursor = IVec2::ZERO;
    let mut is_fullscreen = false;

    event_loop.run(move |event, _, control_flow| match event {
        Event::NewEvents(StartCause::Init) => control_flow.set_wait(),

        Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
            control_flow.set_wait();
            window.request_redraw();
        }

        Event::WindowEvent { event, .. } => {
            if let WindowEvent::CursorMoved { position, .. } = &event {
                cursor = to_pointer(*position, window.scale_factor());
            }

            let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
            if response.repaint {
                window.request_redraw();
            }
            // A drag that started on the sphere keeps its events even over the menus.
            if response.consumed && !scene.camera.is_dragging() {
                return;
            }

            match event {
                WindowEvent::CloseRequested => control_flow.set_exit(),

                WindowEvent::Resized(new_size) => {
                    renderer.resize(new_size);
                    window.request_redraw();
                }

                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    renderer.resize(*new_inner_size);
                    window.request_redraw();
                }

                WindowEvent::KeyboardInput { input, .. }
                    if input.state == ElementState::Pressed =>
                {
                    match input.virtual_keycode {
                        Some(VirtualKeyCode::F11) => toggle_fullscreen(&window, &mut is_fullscreen),
                        Some(VirtualKeyCode::R) => {
                            scene.camera.reset();
                            window.request_redraw();
                        }
                        _ => {}
                    }
                }

                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => {
                    match state {
                        ElementState::Pressed => scene.on_pointer_down(cursor),
                        ElementState::Released => scene.on_pointer_up(cursor),
                    }
                    // Status bar shows the drag state.
                    window.request_redraw();
                }

                WindowEvent::CursorMoved { .. } => {
                    if scene.on_pointer_move(cursor) {
                        window.request_redraw();
                    }
                }

                _ => {}
            }
        }

        Event::RedrawRequested(_) => {
            let mut exit_requested = false;
            let render_result = renderer.render_with_ui(&window, |ctx| {
                draw_ui(
                    ctx,
                    &mut scene,
                    &mut is_fullscreen,
                    &mut exit_requested,
                    &window,
                    &mut current_lang,
                );
            });

            match render_result {
                Ok(repaint_after) if repaint_after.is_zero() => window.request_redraw(),
                Ok(repaint_after) if repaint_after < Duration::MAX => {
                    control_flow.set_wait_until(Instant::now() + repaint_after)
                }
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    renderer.resize(renderer.size);
                    window.request_redraw();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => control_flow.set_exit(),
                Err(e) => log::error!(
                    "{}",
                    i18n::tr_with("error.render", &[("err", format!("{e:?}"))])
                ),
            }

            if exit_requested {
                control_flow.set_exit();
            }
        }

        _ => {}
    })
}

fn draw_ui(
    ctx: &egui::Context,
    scene: &mut SphereScene,
    is_fullscreen: &mut bool,
    exit_requested: &mut bool,
    window: &Window,
    current_lang: &mut String,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(i18n::tr("menu.file"), |ui| {
                if ui.button(i18n::tr("menu.exit")).clicked() {
                    *exit_requested = true;
                    ui.close_menu();
                }
            });

            ui.menu_button(i18n::tr("menu.view"), |ui| {
                if ui.button(i18n::tr("view.reset")).clicked() {
                    scene.camera.reset();
                    ui.close_menu();
                }

                let fullscreen_label = if *is_fullscreen {
                    i18n::tr("view.fullscreen.exit")
                } else {
                    i18n::tr("view.fullscreen.enter")
                };
                if ui.button(fullscreen_label).clicked() {
                    toggle_fullscreen(window, is_fullscreen);
                    ui.close_menu();
                }
            });

            ui.menu_button(i18n::tr("menu.language"), |ui| {
                for (code, name) in i18n::LANGUAGES {
                    if ui.radio_value(current_lang, code.to_string(), name).clicked() {
                        i18n::init(current_lang.clone());
                        log::info!("[i18n] language set to {}", i18n::current_lang());
                        window.set_title(&i18n::tr("app.title"));
                        ui.close_menu();
                    }
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let fmt_deg = |rad: f32| format!("{:.1}", rad.to_degrees());
            ui.label(i18n::tr_with("status.yaw", &[("deg", fmt_deg(scene.camera.yaw))]));
            ui.label("|");
            ui.label(i18n::tr_with("status.pitch", &[("deg", fmt_deg(scene.camera.pitch))]));
            ui.label("|");
            if scene.camera.is_dragging() {
                ui.label(
                    egui::RichText::new(i18n::tr("status.dragging")).color(egui::Color32::YELLOW),
                );
            } else {
                ui.label(i18n::tr("status.hint"));
            }
        });
    });

    renderer::paint_scene(ctx, &*scene);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_rounded_logical_pixels() {
        let p = to_pointer(PhysicalPosition::new(301.0, 149.0), 2.0);
        assert_eq!(p, IVec2::new(151, 75));
        let p = to_pointer(PhysicalPosition::new(10.4, -3.6), 1.0);
        assert_eq!(p, IVec2::new(10, -4));
    }
}
