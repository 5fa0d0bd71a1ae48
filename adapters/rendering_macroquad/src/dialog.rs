//! Win dialog drawing for the Macroquad rendering backend.
//!
//! This module hosts all Macroquad drawing calls for the modal summary so the
//! rest of the adapter only deals with layout and latched input.

use super::to_macroquad_color;
use glam::Vec2;
use macroquad::{
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};
use maze_game_rendering::{Color, DialogButton, DialogLayout, ScreenRect, WinDialog};

const PANEL_COLOR: Color = Color::from_rgb_u8(200, 200, 200);
const BORDER_COLOR: Color = Color::from_rgb_u8(100, 100, 100);
const BUTTON_COLOR: Color = Color::from_rgb_u8(150, 150, 150);
const TEXT_COLOR: Color = Color::from_rgb_u8(0, 0, 0);
const BORDER_THICKNESS: f32 = 2.0;
const FONT_SIZE: u16 = 24;
const LABEL_FONT_SIZE: u16 = 18;

/// Draws the modal win summary with its two buttons.
pub(crate) fn draw_win_dialog(dialog: &WinDialog, layout: &DialogLayout, cursor: Vec2) {
    let panel = layout.panel;
    draw_rectangle(
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        to_macroquad_color(PANEL_COLOR),
    );
    draw_rectangle_lines(
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        BORDER_THICKNESS,
        to_macroquad_color(BORDER_COLOR),
    );

    for (index, line) in dialog.lines().iter().enumerate() {
        let origin = layout.line_origin(index);
        let _ = draw_text(
            line,
            origin.x,
            origin.y,
            f32::from(FONT_SIZE),
            to_macroquad_color(TEXT_COLOR),
        );
    }

    for button in [DialogButton::Exit, DialogButton::NewGame] {
        let rect = layout.button(button);
        let hovered = rect.contains(cursor);
        draw_button(rect, button.label(), hovered);
    }
}

fn draw_button(rect: ScreenRect, label: &str, hovered: bool) {
    let fill = if hovered {
        BUTTON_COLOR.lighten(0.2)
    } else {
        BUTTON_COLOR
    };
    draw_rectangle(
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        to_macroquad_color(fill),
    );

    let dimensions = measure_text(label, None, LABEL_FONT_SIZE, 1.0);
    let x = rect.x + ((rect.width - dimensions.width) * 0.5).max(0.0);
    let y = rect.y + (rect.height + dimensions.height) * 0.5;
    let _ = draw_text(
        label,
        x,
        y,
        f32::from(LABEL_FONT_SIZE),
        to_macroquad_color(TEXT_COLOR),
    );
}

/// Resolves a mouse click at `cursor` against the dialog buttons.
pub(crate) fn dialog_click(layout: &DialogLayout, cursor: Vec2) -> Option<DialogButton> {
    layout.hit_test(cursor)
}
