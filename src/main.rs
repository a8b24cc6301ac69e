//! Gorillas entry point
//!
//! Web builds wire the DOM and a Canvas 2D context to the state machine.
//! Native builds play a short scripted match headlessly and log it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use gorillas::Settings;
    use gorillas::scene::shapes::BANANA_OUTLINE;
    use gorillas::scene::{Hud, Path, Scene, Shape, palette};
    use gorillas::sim::{FlightToken, GameStateMachine, Player, Viewport};

    /// Game instance holding all state
    struct Game {
        machine: GameStateMachine,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Client coordinates where the current drag started
        drag_origin: Option<(f32, f32)>,
    }

    impl Game {
        fn viewport_px(&self) -> (f32, f32) {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Repaint the canvas and refresh the DOM overlay
        fn draw(&self) {
            let scene = Scene::build(self.machine.state(), self.machine.settings());
            let (_, height) = self.viewport_px();
            if let Err(e) = paint(&self.ctx, &scene, height as f64) {
                log::warn!("Paint failed: {:?}", e);
            }
            self.update_hud();
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = Hud::from_state(self.machine.state());

            for (player, panel) in [(Player::One, "#info-left"), (Player::Two, "#info-right")] {
                let readout = hud.readout(player);
                set_text(&document, &format!("{} .angle", panel), &readout.angle.to_string());
                set_text(&document, &format!("{} .velocity", panel), &readout.speed.to_string());
            }

            set_text(&document, "#winner", &hud.winner_label);
            let visibility = if hud.winner_visible { "visible" } else { "hidden" };
            set_style(&document, "#congratulations", "visibility", visibility);

            // Keep the drag handle on the resting projectile
            let grab = self.machine.state().grab_area();
            set_style(&document, "#bomb-grab-area", "left", &format!("{}px", grab.left));
            set_style(&document, "#bomb-grab-area", "bottom", &format!("{}px", grab.bottom));
            set_style(&document, "#bomb-grab-area", "width", &format!("{}px", grab.size));
            set_style(&document, "#bomb-grab-area", "height", &format!("{}px", grab.size));
        }

        fn resize_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            if self.machine.on_resize(width as f32, height as f32) {
                self.canvas.set_width(width as u32);
                self.canvas.set_height(height as u32);
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(document: &Document, selector: &str, property: &str, value: &str) {
        if let Some(el) = document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property(property, value);
        }
    }

    /// Paint a scene; world space is flipped to Y-up and scaled to the canvas
    fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene, height_px: f64) -> Result<(), JsValue> {
        let scale = scene.scale as f64;
        let (w, h) = (scene.world_size.x as f64, scene.world_size.y as f64);

        ctx.save();
        ctx.translate(0.0, height_px)?;
        ctx.scale(1.0, -1.0)?;
        ctx.scale(scale, scale)?;

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        gradient.add_color_stop(0.0, scene.sky[0])?;
        gradient.add_color_stop(1.0, scene.sky[1])?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);

        for shape in &scene.background {
            paint_shape(ctx, shape)?;
        }

        // Each crater clips everything outside its circle
        ctx.save();
        for hole in &scene.holes {
            ctx.begin_path();
            ctx.rect(0.0, 0.0, w, h);
            ctx.arc_with_anticlockwise(
                hole.center.x as f64,
                hole.center.y as f64,
                hole.radius as f64,
                0.0,
                TAU,
                true,
            )?;
            ctx.clip();
        }
        for shape in &scene.foreground {
            paint_shape(ctx, shape)?;
        }
        ctx.restore();

        for shape in &scene.actors {
            paint_shape(ctx, shape)?;
        }

        ctx.restore();
        Ok(())
    }

    fn paint_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
        match shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            Shape::Polygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Stroke {
                path,
                width,
                color,
                dash,
            } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                if let Some([on, off]) = dash {
                    let pattern = js_sys::Array::of2(&(*on as f64).into(), &(*off as f64).into());
                    ctx.set_line_dash(&pattern)?;
                }
                ctx.begin_path();
                match path {
                    Path::Line { from, to } => {
                        ctx.move_to(from.x as f64, from.y as f64);
                        ctx.line_to(to.x as f64, to.y as f64);
                    }
                    Path::Quadratic {
                        start,
                        control,
                        end,
                    } => {
                        ctx.move_to(start.x as f64, start.y as f64);
                        ctx.quadratic_curve_to(
                            control.x as f64,
                            control.y as f64,
                            end.x as f64,
                            end.y as f64,
                        );
                    }
                }
                ctx.stroke();
                if dash.is_some() {
                    ctx.set_line_dash(&js_sys::Array::new())?;
                }
            }
            Shape::Banana { center, rotation } => {
                let (start, segments) = BANANA_OUTLINE;
                ctx.save();
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*rotation as f64)?;
                ctx.set_fill_style_str(palette::BANANA);
                ctx.begin_path();
                ctx.move_to(start.x as f64, start.y as f64);
                for (control, end) in segments {
                    ctx.quadratic_curve_to(
                        control.x as f64,
                        control.y as f64,
                        end.x as f64,
                        end.y as f64,
                    );
                }
                ctx.fill();
                ctx.restore();
            }
        }
        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gorillas starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            if settings.apply_query(&query) {
                settings.save();
            }
        }
        let machine = GameStateMachine::new(seed, settings, Viewport::default());
        let game = Rc::new(RefCell::new(Game {
            machine,
            canvas,
            ctx,
            drag_origin: None,
        }));

        {
            let mut g = game.borrow_mut();
            g.resize_canvas();
            g.draw();
        }

        setup_input_handlers(&document, game.clone());
        setup_new_game_button(&document, game.clone());

        log::info!("Gorillas running with seed {}", seed);
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Press on the projectile starts a drag
        if let Some(grab) = document.get_element_by_id("bomb-grab-area") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.machine.on_drag_start() {
                    g.drag_origin = Some((event.client_x() as f32, event.client_y() as f32));
                    set_cursor("grabbing");
                }
            });
            let _ = grab
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag moves the aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let Some((x0, y0)) = g.drag_origin else {
                    return;
                };
                let dx = event.client_x() as f32 - x0;
                let dy = event.client_y() as f32 - y0;
                if g.machine.on_drag_move(dx, dy) {
                    g.draw();
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release throws
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let token = {
                    let mut g = game.borrow_mut();
                    if g.drag_origin.take().is_none() {
                        return;
                    }
                    set_cursor("default");
                    g.machine.on_drag_end()
                };
                if let Some(token) = token {
                    request_animation_frame(game.clone(), token);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize refits the city
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.resize_canvas();
                g.draw();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_new_game_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("new-game") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.drag_origin = None;
                g.machine.on_new_game_requested();
                g.draw();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_cursor(cursor: &str) {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let _ = body.style().set_property("cursor", cursor);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: FlightToken) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(f64)>::once(move |time: f64| {
            flight_frame(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn flight_frame(game: Rc<RefCell<Game>>, token: FlightToken, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            let outcome = g.machine.animation_frame(token, time);
            if outcome != gorillas::sim::FrameOutcome::Stale {
                g.draw();
            }
            outcome.keep_running()
        };

        if keep_running {
            request_animation_frame(game, token);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gorillas (native) starting...");
    log::info!("Native mode is headless - build for wasm32 and serve index.html to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    // Options use the same `key=value` form as the web query string
    let mut settings = gorillas::Settings::load();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if settings.apply_query(&args.join("&")) {
        settings.save();
    }
    headless_match(seed, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted drags, cycled for both players, until someone wins
#[cfg(not(target_arch = "wasm32"))]
fn headless_match(seed: u64, settings: gorillas::Settings) {
    use glam::Vec2;
    use gorillas::sim::{FrameOutcome, GameStateMachine, Player, TickOutcome, Viewport};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_THROWS: usize = 40;
    /// Player one's drags; player two mirrors them horizontally
    const DRAGS: [(f32, f32); 6] = [
        (-50.0, 80.0),
        (-70.0, 60.0),
        (-90.0, 50.0),
        (-60.0, 100.0),
        (-110.0, 40.0),
        (-80.0, 80.0),
    ];

    let mut machine = GameStateMachine::new(seed, settings, Viewport::default());
    println!(
        "Seed {}: {} buildings, scale {:.3}",
        seed,
        machine.state().city.buildings.len(),
        machine.state().scale
    );

    for throw in 0..MAX_THROWS {
        let player = machine.state().current_player;
        let (dx, dy) = DRAGS[throw % DRAGS.len()];
        let dx = if player == Player::One { dx } else { -dx };
        machine.set_aim(Vec2::new(dx, dy));

        let Some(token) = machine.release() else {
            break;
        };
        let mut time = 0.0;
        let outcome = loop {
            match machine.animation_frame(token, time) {
                FrameOutcome::Ticked(TickOutcome::Continue) | FrameOutcome::Anchored => {
                    time += FRAME_MS
                }
                FrameOutcome::Ticked(outcome) => break outcome,
                FrameOutcome::Stale => break TickOutcome::Idle,
            }
        };

        let readout = machine.state().readout(player);
        println!(
            "Throw {:2}: player {} at {:3} deg, speed {:3} -> {:?} after {:.0} ms",
            throw + 1,
            player.number(),
            readout.angle,
            readout.speed,
            outcome,
            time
        );

        if let TickOutcome::RoundEnded { winner } = outcome {
            println!(
                "Player {} wins with {} craters in the skyline",
                winner.number(),
                machine.state().craters.len()
            );
            return;
        }
    }

    println!("No winner after {} throws", MAX_THROWS);
}
