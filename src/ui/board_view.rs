//! Board rendering for the Connect Four GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Piece, Pos, COLS, ROWS};
use crate::rules::WIN_LENGTH;

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked column if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        last_move: Option<Pos>,
        winning_line: Option<[Pos; WIN_LENGTH]>,
        accepts_input: bool,
    ) -> Option<usize> {
        let available = ui.available_size();

        // Largest cell that fits both dimensions
        let cell_w = (available.x - 2.0 * BOARD_MARGIN) / COLS as f32;
        let cell_h = (available.y - 2.0 * BOARD_MARGIN) / ROWS as f32;
        self.cell_size = cell_w.min(cell_h).max(10.0);

        let size = Vec2::new(
            self.cell_size * COLS as f32 + 2.0 * BOARD_MARGIN,
            self.cell_size * ROWS as f32 + 2.0 * BOARD_MARGIN,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(12), BOARD_BG);
        painter.rect_stroke(
            self.board_rect,
            CornerRadius::same(12),
            Stroke::new(3.0, BOARD_BORDER),
            egui::StrokeKind::Inside,
        );

        let hovered_col = if accepts_input {
            response.hover_pos().and_then(|p| self.screen_to_column(p))
        } else {
            None
        };

        if let Some(col) = hovered_col {
            self.draw_column_highlight(&painter, col);
        }

        self.draw_column_labels(&painter);
        self.draw_pieces(&painter, board);

        if let Some(col) = hovered_col {
            if let Ok(row) = board.lowest_open_row(col) {
                let center = self.cell_center(Pos::new(row as u8, col as u8));
                painter.circle_filled(center, self.cell_size * PIECE_RADIUS_RATIO, hover_preview());
            }
        }

        if let Some(pos) = last_move {
            painter.circle_filled(self.cell_center(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, &line);
        }

        match hovered_col {
            Some(col) if response.clicked() && board.is_column_open(col) => Some(col),
            _ => None,
        }
    }

    fn draw_column_highlight(&self, painter: &Painter, col: usize) {
        let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;
        let rect = Rect::from_min_size(
            Pos2::new(x, self.board_rect.min.y + BOARD_MARGIN),
            Vec2::new(self.cell_size, self.cell_size * ROWS as f32),
        );
        painter.rect_filled(rect, CornerRadius::same(6), hover_column());
    }

    /// Column numbers along the bottom edge, matching the terminal shell
    fn draw_column_labels(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        for col in 0..COLS {
            let x = self.board_rect.min.x + BOARD_MARGIN + (col as f32 + 0.5) * self.cell_size;
            let pos = Pos2::new(x, self.board_rect.max.y - BOARD_MARGIN * 0.5);
            painter.text(pos, egui::Align2::CENTER_CENTER, col, font.clone(), COLUMN_LABEL);
        }
    }

    fn draw_pieces(&self, painter: &Painter, board: &Board) {
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        for row in 0..ROWS {
            for col in 0..COLS {
                let pos = Pos::new(row as u8, col as u8);
                let center = self.cell_center(pos);
                match board.get(pos) {
                    Piece::Empty => {
                        painter.circle_filled(center, radius, HOLE);
                    }
                    Piece::PlayerOne => {
                        Self::draw_piece(painter, center, radius, HUMAN_PIECE, HUMAN_PIECE_HIGHLIGHT)
                    }
                    Piece::PlayerTwo => {
                        Self::draw_piece(painter, center, radius, MACHINE_PIECE, MACHINE_PIECE_HIGHLIGHT)
                    }
                }
            }
        }
    }

    fn draw_piece(painter: &Painter, center: Pos2, radius: f32, fill: Color32, highlight: Color32) {
        painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
        painter.circle_filled(center, radius, fill);
        painter.circle_filled(center + Vec2::new(-radius * 0.3, -radius * 0.3), radius * 0.2, highlight);
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; WIN_LENGTH]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        for pair in line.windows(2) {
            painter.line_segment([self.cell_center(pair[0]), self.cell_center(pair[1])], stroke);
        }
        let radius = self.cell_size * PIECE_RADIUS_RATIO + 3.0;
        for pos in line {
            painter.circle_stroke(self.cell_center(*pos), radius, stroke);
        }
    }

    /// Column under a screen point, if it is over the grid
    pub fn screen_to_column(&self, screen_pos: Pos2) -> Option<usize> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN) / self.cell_size;
        if x < 0.0 || y < 0.0 || y >= ROWS as f32 {
            return None;
        }
        let col = x.floor() as usize;
        (col < COLS).then_some(col)
    }

    /// Center of a cell on screen; row 0 is drawn at the bottom
    pub fn cell_center(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + ((ROWS - 1 - pos.row as usize) as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
