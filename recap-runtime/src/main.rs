use std::num::NonZeroU32;
use std::sync::Arc;

use eyre::WrapErr;
use palette::Srgb;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Carousel selection state machine
pub mod carousel;

/// Schedule feed client
pub mod feed;

/// Graphics primitives: glyph cache and decoded photos
pub mod graphics;

/// Pixel geometry
pub mod layout;

/// Rendering engine implementation
pub mod render;

use carousel::CarouselState;
use feed::GameRecord;
use graphics::glyphs::GlyphCache;
use graphics::photo::Photo;
use layout::Rect;
use render::{text, DrawHandle};

const DEFAULT_WIDTH: u32 = 1920 / 2;
const DEFAULT_HEIGHT: u32 = 1080 / 2;

const FONT_PATH: &str = "res/fonts/Roboto-Regular.ttf";

const BACKDROP_TOP: Srgb<u8> = Srgb::new(18, 32, 58);
const BACKDROP_BOTTOM: Srgb<u8> = Srgb::new(4, 8, 16);
const TEXT_COLOR: Srgb<u8> = Srgb::new(255, 255, 255);

fn main() -> eyre::Result<()> {
    env_logger::init();

    // Everything is loaded up front, before the window opens; any failure
    // here aborts startup.
    let records = feed::fetch().wrap_err("loading schedule feed")?;
    log::info!("loaded {} game records", records.len());

    let photos = records
        .iter()
        .map(|record| Photo::decode(&record.photo))
        .collect::<eyre::Result<Vec<_>>>()
        .wrap_err("decoding photo cuts")?;

    let glyphs = GlyphCache::load(FONT_PATH.as_ref()).wrap_err("loading font")?;

    let mut state = CarouselState::new(records.len());

    let event_loop = EventLoop::new()
        .map_err(|err| eyre::eyre!("initializing event loop: {err}"))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("MLB Recap")
            .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
            .build(&event_loop)
            .wrap_err("creating window")?,
    );

    let context = softbuffer::Context::new(window.clone())
        .map_err(|err| eyre::eyre!("initializing graphics context: {err}"))?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())
        .map_err(|err| eyre::eyre!("creating presentation surface: {err}"))?;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),

                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(code),
                                    state: ElementState::Released,
                                    ..
                                },
                            ..
                        } => match code {
                            KeyCode::Escape => elwt.exit(),
                            KeyCode::ArrowLeft => state.select_previous(),
                            KeyCode::ArrowRight => state.select_next(),
                            _ => (),
                        },

                        WindowEvent::RedrawRequested => {
                            let (width, height) = {
                                let size = window.inner_size();
                                (size.width, size.height)
                            };
                            let (Some(surface_width), Some(surface_height)) =
                                (NonZeroU32::new(width), NonZeroU32::new(height))
                            else {
                                return;
                            };
                            surface.resize(surface_width, surface_height).unwrap();

                            let mut buffer = surface.buffer_mut().unwrap();
                            let mut frame = DrawHandle {
                                buffer: &mut buffer[..],
                                width: width as usize,
                                height: height as usize,
                            };
                            draw_frame(&mut frame, &state, &records, &photos, &glyphs);

                            buffer.present().unwrap();
                        }

                        _ => (),
                    }
                }

                Event::AboutToWait => window.request_redraw(),

                _ => (),
            }
        })
        .map_err(|err| eyre::eyre!("running event loop: {err}"))?;

    Ok(())
}

/// Draws one frame: backdrop, the photo tiles across the render range,
/// then the selected record's headline and subhead. Mutates nothing.
fn draw_frame(
    frame: &mut DrawHandle,
    state: &CarouselState,
    records: &[GameRecord],
    photos: &[Photo],
    glyphs: &GlyphCache,
) {
    let width = frame.width as f32;
    let height = frame.height as f32;

    frame.fill_vertical_gradient(BACKDROP_TOP, BACKDROP_BOTTOM);

    // Tiles are spaced evenly across the viewable window; the records one
    // past each edge land partially offscreen.
    let frac = 2.0 / (state.viewable_count() as f32 + 1.0);
    let tile_center_x = |index: usize| -> f32 {
        let offset = index as f32 - state.lower() as f32;
        let ndc = -(1.0 - frac) + offset * frac;
        (ndc + 1.0) / 2.0 * width
    };

    for index in state.render_range() {
        let tile_scale = if index == state.selected() { 1.5 } else { 1.0 };
        let tile = Rect::centered_at(
            tile_center_x(index),
            height / 2.0,
            0.10 * width * tile_scale,
            0.10 * height * tile_scale,
        );
        frame.photo(&photos[index], tile);
    }

    let record = &records[state.selected()];
    let center_x = tile_center_x(state.selected());
    let budget = 0.25 * width;

    let headline =
        text::layout_headline(glyphs, &record.headline, 1.0, center_x, 0.375 * height, budget);
    headline.draw(frame, glyphs, TEXT_COLOR);

    let subhead =
        text::layout_wrapped(glyphs, &record.subhead, 0.8, center_x, 0.65 * height, budget);
    subhead.draw(frame, glyphs, TEXT_COLOR);
}
