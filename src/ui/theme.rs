//! Theme constants for the Connect Four GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(30, 80, 170);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(20, 55, 125);
pub const HOLE: Color32 = Color32::from_rgb(40, 42, 46);
pub const COLUMN_LABEL: Color32 = Color32::from_rgb(200, 210, 235);

// Pieces
pub const HUMAN_PIECE: Color32 = Color32::from_rgb(220, 50, 50);
pub const HUMAN_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(250, 110, 100);
pub const MACHINE_PIECE: Color32 = Color32::from_rgb(245, 200, 40);
pub const MACHINE_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 235, 130);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(255, 255, 255);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn hover_column() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 30)
}

pub fn hover_preview() -> Color32 {
    Color32::from_rgba_unmultiplied(220, 50, 50, 110)
}

// Panel colors
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.42;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
